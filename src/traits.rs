//! Core traits that decouple breaklock from the desktop it runs on.
//!
//! Every concrete backend (the zbus session connection, the process runner,
//! a test double, …) implements one of these traits.  The steps and the
//! [`BreakSequence`](crate::sequence::BreakSequence) only depend on these
//! abstractions.

use crate::command::CommandSpec;
use crate::process::runner::RunError;
use crate::steps::lock::{LockError, LockMethod};
use std::time::Duration;

/// Abstraction over the desktop session bus.
///
/// An implementation might talk to D-Bus through zbus, or it might be a
/// recording stub used in tests.
pub trait SessionBus {
    /// The error type produced by this bus.
    type Error: std::error::Error + Send + 'static;

    /// Return the MPRIS `PlaybackStatus` of `player` (`"Playing"`,
    /// `"Paused"`, `"Stopped"`).
    ///
    /// Fails when the player is not present on the bus.
    fn playback_status(&self, player: &str) -> Result<String, Self::Error>;

    /// Call MPRIS `Pause` on `player`.
    fn pause(&self, player: &str) -> Result<(), Self::Error>;

    /// Ask the desktop session's screensaver service to lock the screen.
    fn lock_screensaver(&self) -> Result<(), Self::Error>;
}

/// Abstraction over spawning external programs.
pub trait CommandRunner {
    /// Run `cmd` to completion, waiting at most `timeout`.
    ///
    /// Succeeds only if the program exits with status zero.  A program that
    /// is still running when the timeout expires is killed.
    fn run(&self, cmd: &CommandSpec, timeout: Duration) -> Result<(), RunError>;

    /// Start `cmd` without waiting for it.  Its standard streams are not
    /// connected to ours.
    fn spawn_detached(&self, cmd: &CommandSpec) -> Result<(), RunError>;
}

/// A way of locking the screen.
///
/// Selected once at start-up from the [`Platform`](crate::command::Platform).
pub trait ScreenLocker {
    /// Lock the screen, returning how it was done.
    fn lock(&self) -> Result<LockMethod, LockError>;
}

impl<T: SessionBus + ?Sized> SessionBus for &T {
    type Error = T::Error;

    fn playback_status(&self, player: &str) -> Result<String, Self::Error> {
        (**self).playback_status(player)
    }

    fn pause(&self, player: &str) -> Result<(), Self::Error> {
        (**self).pause(player)
    }

    fn lock_screensaver(&self) -> Result<(), Self::Error> {
        (**self).lock_screensaver()
    }
}

impl<T: CommandRunner + ?Sized> CommandRunner for &T {
    fn run(&self, cmd: &CommandSpec, timeout: Duration) -> Result<(), RunError> {
        (**self).run(cmd, timeout)
    }

    fn spawn_detached(&self, cmd: &CommandSpec) -> Result<(), RunError> {
        (**self).spawn_detached(cmd)
    }
}

impl<T: ScreenLocker + ?Sized> ScreenLocker for &T {
    fn lock(&self) -> Result<LockMethod, LockError> {
        (**self).lock()
    }
}

impl<T: ScreenLocker + ?Sized> ScreenLocker for Box<T> {
    fn lock(&self) -> Result<LockMethod, LockError> {
        (**self).lock()
    }
}
