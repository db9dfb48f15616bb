//! Launch the break-reminder companion program.
//!
//! The companion lives next to the breaklock executable.  It is started
//! detached with the countdown as its only argument and runs on its own after
//! the screen is locked.

use super::StepError;
use crate::command::{CommandSpec, Countdown};
use crate::config::CompanionConfig;
use crate::traits::CommandRunner;
use log::info;
use std::path::{Path, PathBuf};

/// Directory containing the running executable, or `None` if it cannot be
/// determined.
pub fn executable_dir() -> Option<PathBuf> {
    let exe = std::env::current_exe().ok()?;
    let exe = exe.canonicalize().unwrap_or(exe);
    exe.parent().map(Path::to_path_buf)
}

/// Build the invocation that starts the companion at `path`.
pub fn companion_command(path: &Path, config: &CompanionConfig, countdown: Countdown) -> CommandSpec {
    let path = path.to_string_lossy().into_owned();
    let countdown = countdown.to_string();
    match &config.interpreter {
        Some(interpreter) => CommandSpec::new(interpreter.clone(), [path, countdown]),
        None => CommandSpec::new(path, [countdown]),
    }
}

/// Start the companion found in `dir`, returning its path.
///
/// Nothing is spawned when the companion file does not exist.
pub fn launch_break_reminder<R: CommandRunner>(
    runner: &R,
    dir: Option<&Path>,
    config: &CompanionConfig,
    countdown: Countdown,
) -> Result<PathBuf, StepError> {
    let dir = dir.ok_or(StepError::NoExecutableDir)?;
    let path = dir.join(&config.file_name);
    if !path.is_file() {
        return Err(StepError::CompanionMissing(path));
    }

    info!(
        "starting {} with a {} minute countdown",
        path.display(),
        countdown
    );
    let cmd = companion_command(&path, config, countdown);
    runner.spawn_detached(&cmd).map_err(StepError::Spawn)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::mock::MockRunner;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// Monotonic counter to generate unique directories per test.
    static TEST_ID: AtomicU32 = AtomicU32::new(0);

    fn tmp_dir() -> PathBuf {
        let id = TEST_ID.fetch_add(1, Ordering::SeqCst);
        let dir = std::env::temp_dir().join(format!(
            "breaklock-companion-{}-{}",
            std::process::id(),
            id
        ));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn five() -> Countdown {
        "5".parse().unwrap()
    }

    #[test]
    fn missing_companion_spawns_nothing() {
        let dir = tmp_dir();
        let runner = MockRunner::default();
        let err = launch_break_reminder(&runner, Some(&dir), &CompanionConfig::default(), five())
            .unwrap_err();
        assert!(matches!(err, StepError::CompanionMissing(ref p) if p.ends_with("fullscreen_break.pyw")));
        assert!(runner.spawn_log.borrow().is_empty());
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn present_companion_is_spawned_through_the_interpreter() {
        let dir = tmp_dir();
        let script = dir.join("fullscreen_break.pyw");
        std::fs::write(&script, "").unwrap();
        let runner = MockRunner::default();

        let path = launch_break_reminder(&runner, Some(&dir), &CompanionConfig::default(), five())
            .unwrap();
        assert_eq!(path, script);

        let spawned = runner.spawn_log.borrow();
        assert_eq!(spawned.len(), 1);
        assert_eq!(spawned[0].program, "python3");
        assert_eq!(
            spawned[0].args,
            [script.to_string_lossy().into_owned(), "5".to_string()]
        );
        drop(spawned);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn companion_without_interpreter_runs_directly() {
        let config = CompanionConfig {
            file_name: "break.sh".into(),
            interpreter: None,
        };
        let cmd = companion_command(Path::new("/opt/bl/break.sh"), &config, "2.5".parse().unwrap());
        assert_eq!(cmd, CommandSpec::new("/opt/bl/break.sh", ["2.5"]));
    }

    #[test]
    fn directory_is_not_a_companion() {
        let dir = tmp_dir();
        std::fs::create_dir_all(dir.join("fullscreen_break.pyw")).unwrap();
        let runner = MockRunner::default();
        let err = launch_break_reminder(&runner, Some(&dir), &CompanionConfig::default(), five())
            .unwrap_err();
        assert!(matches!(err, StepError::CompanionMissing(_)));
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn unknown_executable_dir_is_an_error() {
        let runner = MockRunner::default();
        let err = launch_break_reminder(&runner, None, &CompanionConfig::default(), five())
            .unwrap_err();
        assert!(matches!(err, StepError::NoExecutableDir));
    }
}
