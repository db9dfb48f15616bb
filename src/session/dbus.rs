//! [`SessionBus`] implementation backed by zbus.
//!
//! Uses the blocking zbus API so the whole sequence stays synchronous.  One
//! connection to the session bus is opened at start-up and shared by every
//! call; per-player proxies are built on demand and dropped right after use.

use crate::traits::SessionBus;
use std::time::Duration;
use zbus::blocking::{connection, Connection};
use zbus::proxy;
use zbus::proxy::CacheProperties;

/// MPRIS player control, at the well-known object path every player exports.
#[proxy(
    interface = "org.mpris.MediaPlayer2.Player",
    default_path = "/org/mpris/MediaPlayer2"
)]
trait MediaPlayer {
    fn pause(&self) -> zbus::Result<()>;

    #[zbus(property)]
    fn playback_status(&self) -> zbus::Result<String>;
}

/// GNOME's screensaver service.
#[proxy(
    interface = "org.gnome.ScreenSaver",
    default_service = "org.gnome.ScreenSaver",
    default_path = "/org/gnome/ScreenSaver"
)]
trait GnomeScreenSaver {
    fn lock(&self) -> zbus::Result<()>;
}

/// Errors that can occur when talking to the session bus.
#[derive(Debug, thiserror::Error)]
#[error("session bus error: {0}")]
pub struct SessionError(#[from] zbus::Error);

/// A live connection to the user's session bus.
#[derive(Clone)]
pub struct ZbusSession {
    conn: Connection,
}

impl ZbusSession {
    /// Connect to the session bus.
    ///
    /// Every method call made through this connection gives up after
    /// `method_timeout`, so a peer that owns a name but never answers cannot
    /// stall the sequence.
    ///
    /// Fails when no session bus is running (headless login, missing
    /// `DBUS_SESSION_BUS_ADDRESS`, …).
    pub fn connect(method_timeout: Duration) -> Result<Self, SessionError> {
        let conn = connection::Builder::session()?
            .method_timeout(method_timeout)
            .build()?;
        Ok(Self { conn })
    }

    fn player(&self, name: &str) -> Result<MediaPlayerProxyBlocking<'_>, SessionError> {
        let proxy = MediaPlayerProxyBlocking::builder(&self.conn)
            .destination(name.to_string())?
            .cache_properties(CacheProperties::No)
            .build()?;
        Ok(proxy)
    }
}

impl SessionBus for ZbusSession {
    type Error = SessionError;

    fn playback_status(&self, player: &str) -> Result<String, Self::Error> {
        Ok(self.player(player)?.playback_status()?)
    }

    fn pause(&self, player: &str) -> Result<(), Self::Error> {
        Ok(self.player(player)?.pause()?)
    }

    fn lock_screensaver(&self) -> Result<(), Self::Error> {
        let screensaver = GnomeScreenSaverProxyBlocking::new(&self.conn)?;
        Ok(screensaver.lock()?)
    }
}
