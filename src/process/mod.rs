//! External program execution.
//!
//! [`runner::SystemRunner`] is the [`CommandRunner`](crate::traits::CommandRunner)
//! backed by `std::process`; [`chain`] walks an ordered list of alternative
//! commands until one succeeds.

pub mod chain;
pub mod runner;
