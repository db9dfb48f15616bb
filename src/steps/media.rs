//! Pause every known media player that is currently playing.

use super::StepError;
use crate::traits::SessionBus;
use log::{debug, info, warn};

/// MPRIS status of a player that is producing sound.
pub const PLAYING: &str = "Playing";

/// Pause each player in `players` whose playback status is `"Playing"`.
///
/// Players that cannot be reached are skipped.  Returns the players that were
/// paused, in registry order.  Fails only when there is no bus at all.
pub fn pause_media<B: SessionBus>(
    bus: Option<&B>,
    players: &[String],
) -> Result<Vec<String>, StepError> {
    let bus = bus.ok_or(StepError::BusUnavailable)?;

    let mut paused = Vec::new();
    for player in players {
        let status = match bus.playback_status(player) {
            Ok(status) => status,
            Err(e) => {
                debug!("{} not reachable: {}", player, e);
                continue;
            }
        };
        if status != PLAYING {
            debug!("{} is {}, leaving it alone", player, status);
            continue;
        }
        match bus.pause(player) {
            Ok(()) => {
                info!("paused {}", player);
                paused.push(player.clone());
            }
            Err(e) => warn!("failed to pause {}: {}", player, e),
        }
    }
    Ok(paused)
}
