//! [`CommandRunner`] implementation backed by `std::process`.
//!
//! Programs are looked up on `PATH`.  All standard streams are detached from
//! ours, so tools that print diagnostics cannot interleave with the log.

use crate::command::CommandSpec;
use crate::traits::CommandRunner;
use log::debug;
use std::io;
use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};

/// How often a running child is polled while waiting for it to exit.
const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Runs real programs.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl SystemRunner {
    pub fn new() -> Self {
        Self
    }
}

/// Errors from running an external program.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("{0}: command not found")]
    NotFound(String),
    #[error("{program} exited with {}", describe_code(.code))]
    Failed { program: String, code: Option<i32> },
    #[error("{program} timed out after {timeout:?}")]
    TimedOut { program: String, timeout: Duration },
    #[error("{program}: {source}")]
    Io {
        program: String,
        #[source]
        source: io::Error,
    },
}

fn describe_code(code: &Option<i32>) -> String {
    match code {
        Some(c) => format!("status {}", c),
        None => "a signal".into(),
    }
}

fn spawn(cmd: &CommandSpec) -> Result<Child, RunError> {
    Command::new(&cmd.program)
        .args(&cmd.args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => RunError::NotFound(cmd.program.clone()),
            _ => RunError::Io {
                program: cmd.program.clone(),
                source: e,
            },
        })
}

impl CommandRunner for SystemRunner {
    fn run(&self, cmd: &CommandSpec, timeout: Duration) -> Result<(), RunError> {
        debug!("running {}", cmd);
        let mut child = spawn(cmd)?;
        let deadline = Instant::now() + timeout;

        loop {
            let polled = child.try_wait().map_err(|e| RunError::Io {
                program: cmd.program.clone(),
                source: e,
            })?;
            match polled {
                Some(status) if status.success() => return Ok(()),
                Some(status) => {
                    return Err(RunError::Failed {
                        program: cmd.program.clone(),
                        code: status.code(),
                    })
                }
                None if Instant::now() >= deadline => {
                    // Kill and reap so no zombie outlives the attempt.
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(RunError::TimedOut {
                        program: cmd.program.clone(),
                        timeout,
                    });
                }
                None => std::thread::sleep(POLL_INTERVAL),
            }
        }
    }

    fn spawn_detached(&self, cmd: &CommandSpec) -> Result<(), RunError> {
        let child = spawn(cmd)?;
        debug!("spawned {} (pid {})", cmd, child.id());
        Ok(())
    }
}
