//! The orchestrator that runs the steps in order.
//!
//! [`BreakSequence`] owns the session bus handle, the command runner and the
//! chosen [`ScreenLocker`], and runs pause → mute → break reminder → settle
//! delay → lock.  Step failures are logged and recorded in the
//! [`SequenceReport`]; none of them stops the sequence.

use crate::command::{Countdown, Platform};
use crate::config::Config;
use crate::steps::lock::{LockError, LockMethod};
use crate::steps::{audio, companion, media, StepError};
use crate::traits::{CommandRunner, ScreenLocker, SessionBus};
use log::{info, warn};
use std::path::PathBuf;

/// What happened during one run.
///
/// A `None` step was skipped, either because the platform does not run it or
/// because no countdown was given.
#[derive(Debug)]
pub struct SequenceReport {
    pub media: Option<Result<Vec<String>, StepError>>,
    pub mute: Option<Result<String, StepError>>,
    pub companion: Option<Result<PathBuf, StepError>>,
    pub lock: Result<LockMethod, LockError>,
}

impl SequenceReport {
    /// Overall result of the run.  Only the lock counts.
    pub fn locked(&self) -> bool {
        self.lock.is_ok()
    }

    /// Players paused by the media step (empty if it failed or was skipped).
    pub fn paused_players(&self) -> &[String] {
        match &self.media {
            Some(Ok(players)) => players.as_slice(),
            _ => &[],
        }
    }
}

/// Runs the break sequence.
///
/// Generic over the bus, the runner and the locker so tests can drive it
/// with recording doubles.
///
/// # Typical usage
///
/// ```ignore
/// let sequence = BreakSequence::new(Platform::current(), bus, SystemRunner::new(), locker, config)
///     .with_companion_dir(executable_dir());
/// let report = sequence.run(countdown);
/// ```
pub struct BreakSequence<B, R, L> {
    platform: Platform,
    bus: Option<B>,
    runner: R,
    locker: L,
    config: Config,
    companion_dir: Option<PathBuf>,
}

impl<B: SessionBus, R: CommandRunner, L: ScreenLocker> BreakSequence<B, R, L> {
    /// Create a sequence.
    ///
    /// `bus` is the result of the start-up session bus probe.
    pub fn new(platform: Platform, bus: Option<B>, runner: R, locker: L, config: Config) -> Self {
        Self {
            platform,
            bus,
            runner,
            locker,
            config,
            companion_dir: None,
        }
    }

    /// Directory in which the break-reminder companion is looked up.
    pub fn with_companion_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.companion_dir = dir;
        self
    }

    /// Run every step once and report the outcome.
    pub fn run(&self, countdown: Option<Countdown>) -> SequenceReport {
        info!("preparing to lock the screen");

        let (media, mute, companion) = match self.platform {
            Platform::Primary => {
                info!("{} platform, skipping media, audio and break reminder", self.platform);
                (None, None, None)
            }
            Platform::Other => {
                let media = self.pause_media();
                let mute = self.mute_audio();
                let companion = countdown.map(|c| self.launch_break_reminder(c));
                (Some(media), Some(mute), companion)
            }
        };

        std::thread::sleep(self.config.settle_delay());

        info!("locking the screen");
        let lock = self.locker.lock();
        match &lock {
            Ok(method) => info!("screen locked ({})", method),
            Err(e) => warn!("screen lock failed: {}", e),
        }

        SequenceReport {
            media,
            mute,
            companion,
            lock,
        }
    }

    fn pause_media(&self) -> Result<Vec<String>, StepError> {
        info!("pausing media playback");
        let result = media::pause_media(self.bus.as_ref(), &self.config.media.players);
        match &result {
            Ok(paused) if paused.is_empty() => info!("nothing was playing"),
            Ok(paused) => info!("paused {} player(s)", paused.len()),
            Err(e) => warn!("media pause failed: {}", e),
        }
        result
    }

    fn mute_audio(&self) -> Result<String, StepError> {
        info!("muting audio");
        let result = audio::mute_audio(&self.runner, &self.config.audio);
        if let Err(e) = &result {
            warn!("could not mute audio: {}", e);
        }
        result
    }

    fn launch_break_reminder(&self, countdown: Countdown) -> Result<PathBuf, StepError> {
        let result = companion::launch_break_reminder(
            &self.runner,
            self.companion_dir.as_deref(),
            &self.config.companion,
            countdown,
        );
        if let Err(e) = &result {
            warn!("break reminder not started: {}", e);
        }
        result
    }
}
