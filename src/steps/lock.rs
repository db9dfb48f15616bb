//! Screen locking.
//!
//! Two [`ScreenLocker`]s exist, chosen once at start-up by [`select_locker`]:
//!
//! * [`WorkstationLocker`] makes the single native OS call.  Any error is
//!   final.
//! * [`FallbackChainLocker`] asks the desktop session's screensaver over the
//!   session bus and, if that fails or no bus is available, walks the
//!   configured lock commands in order until one exits successfully.

use crate::command::{CommandSpec, Platform};
use crate::config::LockConfig;
use crate::process::chain::{run_chain, ChainError};
use crate::traits::{CommandRunner, ScreenLocker, SessionBus};
use log::{info, warn};
use std::fmt;
use std::io;
use std::time::Duration;

/// How the screen ended up locked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LockMethod {
    /// The native workstation lock call.
    Workstation,
    /// The screensaver service on the session bus.
    SessionBus,
    /// A fallback lock command, named by its program.
    Fallback(String),
}

impl fmt::Display for LockMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LockMethod::Workstation => write!(f, "workstation lock"),
            LockMethod::SessionBus => write!(f, "session bus"),
            LockMethod::Fallback(program) => write!(f, "{}", program),
        }
    }
}

/// The screen could not be locked.
#[derive(Debug, thiserror::Error)]
pub enum LockError {
    #[error("workstation lock failed: {0}")]
    Workstation(#[source] io::Error),
    /// The session bus lock and every fallback command failed.
    #[error("session bus lock failed ({session}); {chain}")]
    Exhausted { session: String, chain: ChainError },
}

//  Workstation lock

/// Locks through the operating system's own workstation-lock call.
pub struct WorkstationLocker {
    lock_fn: fn() -> io::Result<()>,
}

impl Default for WorkstationLocker {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkstationLocker {
    pub fn new() -> Self {
        Self {
            lock_fn: lock_workstation,
        }
    }

    /// Use `lock_fn` in place of the native call.
    pub fn with_lock_fn(lock_fn: fn() -> io::Result<()>) -> Self {
        Self { lock_fn }
    }
}

impl ScreenLocker for WorkstationLocker {
    fn lock(&self) -> Result<LockMethod, LockError> {
        (self.lock_fn)().map_err(LockError::Workstation)?;
        info!("workstation locked");
        Ok(LockMethod::Workstation)
    }
}

#[cfg(windows)]
fn lock_workstation() -> io::Result<()> {
    use windows::Win32::System::Shutdown::LockWorkStation;

    // SAFETY: LockWorkStation takes no arguments and only posts a request to
    // the session; it has no memory-safety preconditions.
    unsafe { LockWorkStation() }.map_err(|e| io::Error::other(e.to_string()))
}

#[cfg(not(windows))]
fn lock_workstation() -> io::Result<()> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "workstation lock is only available on Windows",
    ))
}

//  Session bus + fallback chain

/// Locks through the session bus, falling back to external lock commands.
pub struct FallbackChainLocker<B, R> {
    bus: Option<B>,
    runner: R,
    commands: Vec<CommandSpec>,
    timeout: Duration,
}

impl<B: SessionBus, R: CommandRunner> FallbackChainLocker<B, R> {
    /// `bus` is `None` when the session bus probe failed at start-up; the
    /// lock commands are then used straight away.
    pub fn new(bus: Option<B>, runner: R, commands: Vec<CommandSpec>, timeout: Duration) -> Self {
        Self {
            bus,
            runner,
            commands,
            timeout,
        }
    }

    /// Build from the `lock` config section.
    pub fn from_config(bus: Option<B>, runner: R, config: &LockConfig) -> Self {
        Self::new(bus, runner, config.fallback_commands.clone(), config.timeout())
    }
}

impl<B: SessionBus, R: CommandRunner> ScreenLocker for FallbackChainLocker<B, R> {
    fn lock(&self) -> Result<LockMethod, LockError> {
        let session = match &self.bus {
            Some(bus) => match bus.lock_screensaver() {
                Ok(()) => {
                    info!("screen locked via the session bus");
                    return Ok(LockMethod::SessionBus);
                }
                Err(e) => {
                    warn!("session bus lock failed: {}", e);
                    e.to_string()
                }
            },
            None => {
                info!("no session bus, using lock commands");
                "session bus unavailable".to_string()
            }
        };

        match run_chain(&self.runner, &self.commands, self.timeout) {
            Ok(cmd) => {
                info!("screen locked with {}", cmd.program);
                Ok(LockMethod::Fallback(cmd.program.clone()))
            }
            Err(chain) => Err(LockError::Exhausted { session, chain }),
        }
    }
}

/// Pick the locker for `platform`.
pub fn select_locker<B, R>(
    platform: Platform,
    bus: Option<B>,
    runner: R,
    config: &LockConfig,
) -> Box<dyn ScreenLocker>
where
    B: SessionBus + 'static,
    R: CommandRunner + 'static,
{
    match platform {
        Platform::Primary => Box::new(WorkstationLocker::new()),
        Platform::Other => Box::new(FallbackChainLocker::from_config(bus, runner, config)),
    }
}
