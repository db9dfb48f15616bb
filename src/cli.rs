//! Command-line arguments.
//!
//! ```text
//! breaklock [--config <path>] [COUNTDOWN]
//! ```
//!
//! `COUNTDOWN` is the break length in minutes.  A value that does not parse
//! is logged and ignored, so the lock still happens.

use crate::command::Countdown;
use log::warn;
use std::path::PathBuf;

pub const USAGE: &str = "usage: breaklock [--config <path>] [COUNTDOWN_MINUTES]";

/// Parsed command line.
#[derive(Debug, Default, PartialEq)]
pub struct CliArgs {
    pub countdown: Option<Countdown>,
    pub config_path: Option<PathBuf>,
    pub help: bool,
}

/// Command-line usage errors.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CliError {
    #[error("--config requires a path")]
    MissingConfigPath,
    #[error("unknown option: {0}")]
    UnknownOption(String),
}

/// Parse the arguments that follow the program name.
pub fn parse_args<I>(args: I) -> Result<CliArgs, CliError>
where
    I: IntoIterator<Item = String>,
{
    let mut parsed = CliArgs::default();
    let mut positional = None;
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => parsed.help = true,
            "--config" => {
                let path = args.next().ok_or(CliError::MissingConfigPath)?;
                parsed.config_path = Some(PathBuf::from(path));
            }
            s if s.starts_with("--") => return Err(CliError::UnknownOption(arg)),
            _ if positional.is_none() => positional = Some(arg),
            _ => warn!("ignoring extra argument {:?}", arg),
        }
    }

    if let Some(raw) = positional {
        match raw.parse::<Countdown>() {
            Ok(countdown) => parsed.countdown = Some(countdown),
            Err(e) => warn!("{}, continuing without a break reminder", e),
        }
    }
    Ok(parsed)
}
