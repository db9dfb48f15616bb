//! Shared vocabulary for breaklock.
//!
//! [`CommandSpec`] describes an external tool invocation, [`Countdown`] is the
//! break length handed to the companion program, and [`Platform`] decides
//! which code paths run.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An external command: a program name (looked up on `PATH`) plus a fixed
/// argument vector.
///
/// Deserializes from `{"program": "xdg-screensaver", "args": ["lock"]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandSpec {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl CommandSpec {
    /// Build a spec from a program and its arguments.
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Break length in minutes.
///
/// Accepts anything that parses as a floating-point number (`"5"`, `"2.5"`,
/// `"-1"`, `"inf"`).  The value is not range-checked here; it is forwarded to
/// the companion program via its [`Display`] form and the companion decides
/// what to make of it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Countdown(f64);

impl Countdown {
    /// The countdown in minutes.
    pub fn minutes(self) -> f64 {
        self.0
    }
}

/// Error from parsing a [`Countdown`].
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("invalid countdown {0:?}: expected a number of minutes")]
pub struct CountdownError(String);

impl FromStr for Countdown {
    type Err = CountdownError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<f64>()
            .map(Countdown)
            .map_err(|_| CountdownError(s.to_string()))
    }
}

impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The platform family this process runs on.
///
/// `Primary` has a native workstation-lock call and skips the media, audio
/// and break-reminder steps.  Everything else goes through the desktop
/// session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Primary,
    Other,
}

impl Platform {
    /// Detect the platform of the running binary.
    pub fn current() -> Self {
        if cfg!(windows) {
            Platform::Primary
        } else {
            Platform::Other
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Primary => write!(f, "windows"),
            Platform::Other => write!(f, "desktop session"),
        }
    }
}
