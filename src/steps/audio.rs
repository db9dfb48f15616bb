//! Mute the default audio sink.

use super::StepError;
use crate::config::AudioConfig;
use crate::process::chain::run_chain;
use crate::traits::CommandRunner;
use log::info;

/// Run the mute chain and return the program that muted the sink.
pub fn mute_audio<R: CommandRunner>(runner: &R, config: &AudioConfig) -> Result<String, StepError> {
    let used = run_chain(runner, &config.mute_commands, config.timeout())?;
    info!("audio muted with {}", used.program);
    Ok(used.program.clone())
}
