//! Ordered fallback chains of external commands.
//!
//! Each command is attempted at most once, in declared order.  The chain
//! stops at the first command that exits successfully; a command that is
//! missing, exits non-zero or times out moves the chain on to the next entry.

use crate::command::CommandSpec;
use crate::process::runner::RunError;
use crate::traits::CommandRunner;
use log::{debug, info};
use std::time::Duration;

/// Every command of a chain failed.
#[derive(Debug, thiserror::Error)]
#[error("{}", describe_attempts(.attempts))]
pub struct ChainError {
    /// One error per attempted command, in attempt order.
    pub attempts: Vec<RunError>,
}

fn describe_attempts(attempts: &[RunError]) -> String {
    if attempts.is_empty() {
        return "no commands configured".into();
    }
    let details: Vec<String> = attempts.iter().map(ToString::to_string).collect();
    format!("all {} commands failed: {}", attempts.len(), details.join("; "))
}

/// Run `chain` until one command succeeds and return that command.
pub fn run_chain<'a, R: CommandRunner + ?Sized>(
    runner: &R,
    chain: &'a [CommandSpec],
    timeout: Duration,
) -> Result<&'a CommandSpec, ChainError> {
    let mut attempts = Vec::with_capacity(chain.len());
    for cmd in chain {
        match runner.run(cmd, timeout) {
            Ok(()) => {
                info!("{} succeeded", cmd.program);
                return Ok(cmd);
            }
            Err(e) => {
                debug!("{}", e);
                attempts.push(e);
            }
        }
    }
    Err(ChainError { attempts })
}
