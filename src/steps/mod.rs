//! The individual steps of the break sequence.
//!
//! Every step is total: it returns a `Result` carrying either its output or
//! a [`StepError`] that says why it failed, and never panics or propagates
//! past its own boundary.  The [`BreakSequence`](crate::sequence::BreakSequence)
//! decides what a failure means for the run.

pub mod audio;
pub mod companion;
pub mod lock;
pub mod media;

use crate::process::chain::ChainError;
use crate::process::runner::RunError;
use std::path::PathBuf;

/// Why a step failed.
#[derive(Debug, thiserror::Error)]
pub enum StepError {
    /// No session bus connection could be made at start-up.
    #[error("session bus unavailable")]
    BusUnavailable,
    /// Every command of a fallback chain failed.
    #[error(transparent)]
    Chain(#[from] ChainError),
    /// The directory of the running executable could not be determined.
    #[error("cannot determine the directory of the running executable")]
    NoExecutableDir,
    #[error("companion not found: {}", .0.display())]
    CompanionMissing(PathBuf),
    #[error("failed to start companion: {0}")]
    Spawn(#[source] RunError),
}
