//! **breaklock**: take a break.
//!
//! Pauses whatever media is playing, mutes the default audio sink, starts a
//! break-reminder companion with a countdown, and locks the screen.  Every
//! step is best-effort; only the lock decides whether the run succeeded.
//!
//! # Architecture
//!
//! The crate is organised around three traits:
//!
//! * [`traits::SessionBus`]: MPRIS player control and the screensaver
//!   service, so the steps are not coupled to D-Bus.
//! * [`traits::CommandRunner`]: external programs (mute tools, lock tools,
//!   the companion).
//! * [`traits::ScreenLocker`]: the platform-specific way of locking,
//!   chosen once at start-up.
//!
//! Concrete implementations live in [`session`] (zbus), [`process`]
//! (`std::process`) and [`steps::lock`].  [`sequence::BreakSequence`] runs
//! the steps in order.

pub mod cli;
pub mod command;
pub mod config;
pub mod process;
pub mod sequence;
pub mod session;
pub mod steps;
pub mod traits;
