//! Application configuration.
//!
//! The configuration is loaded from a JSON file, either the path passed with
//! `--config <path>` or `$XDG_CONFIG_HOME/breaklock/config.json`.  Each step
//! has its own section so the defaults can be overridden piecemeal.
//!
//! # Example
//!
//! ```json
//! {
//!   "session": { "method_timeout_ms": 5000 },
//!   "media": { "players": ["org.mpris.MediaPlayer2.mpv"] },
//!   "audio": { "timeout_ms": 2000 },
//!   "companion": { "file_name": "break.sh", "interpreter": null },
//!   "lock": {
//!     "fallback_commands": [
//!       { "program": "loginctl", "args": ["lock-session"] },
//!       { "program": "xdg-screensaver", "args": ["lock"] }
//!     ],
//!     "timeout_ms": 5000
//!   },
//!   "settle_delay_ms": 500
//! }
//! ```

use crate::command::CommandSpec;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Top-level configuration.
///
/// Every field is optional: a minimal `{}` file is valid and all sections
/// fall back to their compiled-in defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Session bus connection.
    pub session: SessionConfig,
    /// MPRIS players to pause.
    pub media: MediaConfig,
    /// Audio mute chain.
    pub audio: AudioConfig,
    /// Break-reminder companion program.
    pub companion: CompanionConfig,
    /// Screen lock fallback chain.
    pub lock: LockConfig,
    /// Pause between the preparation steps and the lock (ms).
    pub settle_delay_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            session: SessionConfig::default(),
            media: MediaConfig::default(),
            audio: AudioConfig::default(),
            companion: CompanionConfig::default(),
            lock: LockConfig::default(),
            settle_delay_ms: 500,
        }
    }
}

impl Config {
    /// Load configuration from a JSON file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError(format!("failed to read {}: {}", path.display(), e)))?;
        let config: Self = serde_json::from_str(&contents)
            .map_err(|e| ConfigError(format!("failed to parse {}: {}", path.display(), e)))?;
        Ok(config)
    }

    /// Load `explicit` if given, otherwise `fallback` if it exists, otherwise
    /// the compiled-in defaults.
    ///
    /// A file that was asked for explicitly, or one that exists but does not
    /// parse, is reported as a warning.  A missing default file is normal.
    pub fn load_or_default(explicit: Option<&Path>, fallback: &Path) -> (Self, ConfigSource) {
        let path = match explicit {
            Some(path) => path,
            None if !fallback.exists() => {
                info!("no config file at {}, using defaults", fallback.display());
                return (Self::default(), ConfigSource::Defaults);
            }
            None => fallback,
        };
        match Self::load(path) {
            Ok(cfg) => {
                info!("loaded config from {}", path.display());
                (cfg, ConfigSource::File(path.to_path_buf()))
            }
            Err(e) => {
                warn!("{}, using defaults", e);
                (Self::default(), ConfigSource::Defaults)
            }
        }
    }

    /// The settle delay as a [`Duration`].
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }
}

/// Where the effective configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    Defaults,
}

/// Session bus settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// How long a bus method call may wait for its reply (ms).
    pub method_timeout_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            method_timeout_ms: 5000,
        }
    }
}

impl SessionConfig {
    pub fn method_timeout(&self) -> Duration {
        Duration::from_millis(self.method_timeout_ms)
    }
}

/// Well-known MPRIS bus names, tried in this order.
pub const DEFAULT_PLAYERS: &[&str] = &[
    "org.mpris.MediaPlayer2.vlc",
    "org.mpris.MediaPlayer2.spotify",
    "org.mpris.MediaPlayer2.rhythmbox",
    "org.mpris.MediaPlayer2.chromium",
    "org.mpris.MediaPlayer2.firefox",
    "org.mpris.MediaPlayer2.browser",
    "org.mpris.MediaPlayer2.amarok",
];

/// Media pause settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaConfig {
    pub players: Vec<String>,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            players: DEFAULT_PLAYERS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Audio mute settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    /// Mute commands, tried in order until one succeeds.
    pub mute_commands: Vec<CommandSpec>,
    /// Per-command timeout (ms).
    pub timeout_ms: u64,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            mute_commands: vec![
                CommandSpec::new("pactl", ["set-sink-mute", "@DEFAULT_SINK@", "1"]),
                CommandSpec::new("amixer", ["-D", "pulse", "set", "Master", "mute"]),
            ],
            timeout_ms: 5000,
        }
    }
}

impl AudioConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Break-reminder companion settings.
///
/// The companion is looked up next to the running executable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanionConfig {
    /// File name of the companion program.
    pub file_name: String,
    /// Program used to run the companion.  `null` executes it directly.
    pub interpreter: Option<String>,
}

impl Default for CompanionConfig {
    fn default() -> Self {
        Self {
            file_name: "fullscreen_break.pyw".into(),
            interpreter: Some("python3".into()),
        }
    }
}

/// Screen lock settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LockConfig {
    /// Lock commands tried, in order, when the session-bus lock fails.
    pub fallback_commands: Vec<CommandSpec>,
    /// Per-command timeout (ms).
    pub timeout_ms: u64,
}

impl Default for LockConfig {
    fn default() -> Self {
        Self {
            fallback_commands: vec![
                CommandSpec::new("gnome-screensaver-command", ["--lock"]),
                CommandSpec::new(
                    "dbus-send",
                    [
                        "--type=method_call",
                        "--dest=org.gnome.ScreenSaver",
                        "/org/gnome/ScreenSaver",
                        "org.gnome.ScreenSaver.Lock",
                    ],
                ),
                CommandSpec::new("xdg-screensaver", ["lock"]),
            ],
            timeout_ms: 5000,
        }
    }
}

impl LockConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Error from loading or parsing a configuration file.
#[derive(Debug, thiserror::Error)]
#[error("config error: {0}")]
pub struct ConfigError(String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_full_config() {
        let json = r#"{
            "session": { "method_timeout_ms": 250 },
            "media": { "players": ["org.mpris.MediaPlayer2.mpv"] },
            "audio": {
                "mute_commands": [{ "program": "wpctl", "args": ["set-mute", "@DEFAULT_AUDIO_SINK@", "1"] }],
                "timeout_ms": 1000
            },
            "companion": { "file_name": "break.sh", "interpreter": null },
            "lock": {
                "fallback_commands": [{ "program": "loginctl", "args": ["lock-session"] }],
                "timeout_ms": 2000
            },
            "settle_delay_ms": 0
        }"#;
        let cfg: Config = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.session.method_timeout(), Duration::from_millis(250));
        assert_eq!(cfg.media.players, vec!["org.mpris.MediaPlayer2.mpv"]);
        assert_eq!(cfg.audio.mute_commands[0].program, "wpctl");
        assert_eq!(cfg.audio.timeout(), Duration::from_secs(1));
        assert_eq!(cfg.companion.file_name, "break.sh");
        assert_eq!(cfg.companion.interpreter, None);
        assert_eq!(
            cfg.lock.fallback_commands,
            vec![CommandSpec::new("loginctl", ["lock-session"])]
        );
        assert_eq!(cfg.lock.timeout(), Duration::from_secs(2));
        assert_eq!(cfg.settle_delay(), Duration::ZERO);
    }

    #[test]
    fn deserialize_empty_uses_defaults() {
        let cfg: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg.session.method_timeout(), Duration::from_secs(5));
        assert_eq!(cfg.media.players.len(), DEFAULT_PLAYERS.len());
        assert_eq!(cfg.media.players[0], "org.mpris.MediaPlayer2.vlc");
        let programs: Vec<&str> = cfg
            .audio
            .mute_commands
            .iter()
            .map(|c| c.program.as_str())
            .collect();
        assert_eq!(programs, ["pactl", "amixer"]);
        let programs: Vec<&str> = cfg
            .lock
            .fallback_commands
            .iter()
            .map(|c| c.program.as_str())
            .collect();
        assert_eq!(programs, ["gnome-screensaver-command", "dbus-send", "xdg-screensaver"]);
        assert_eq!(cfg.lock.timeout(), Duration::from_secs(5));
        assert_eq!(cfg.companion.file_name, "fullscreen_break.pyw");
        assert_eq!(cfg.companion.interpreter.as_deref(), Some("python3"));
        assert_eq!(cfg.settle_delay(), Duration::from_millis(500));
    }

    #[test]
    fn deserialize_partial_lock() {
        let json = r#"{ "lock": { "timeout_ms": 100 } }"#;
        let cfg: Config = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.lock.timeout_ms, 100);
        assert_eq!(
            cfg.lock.fallback_commands,
            LockConfig::default().fallback_commands
        );
    }

    #[test]
    fn unknown_top_level_keys_ignored() {
        let json = r#"{ "media": {}, "future_section": { "key": 42 } }"#;
        let _cfg: Config = serde_json::from_str(json).unwrap();
    }

    #[test]
    fn load_reports_missing_file() {
        let path = std::env::temp_dir().join(format!(
            "breaklock-missing-{}.json",
            std::process::id()
        ));
        let err = Config::load(&path).unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }

    #[test]
    fn load_reads_file_from_disk() {
        let path = std::env::temp_dir().join(format!(
            "breaklock-config-{}.json",
            std::process::id()
        ));
        std::fs::write(&path, r#"{ "settle_delay_ms": 42 }"#).unwrap();
        let cfg = Config::load(&path).unwrap();
        assert_eq!(cfg.settle_delay_ms, 42);
        let _ = std::fs::remove_file(&path);
    }

    fn tmp_path(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "breaklock-{}-{}.json",
            tag,
            std::process::id()
        ))
    }

    #[test]
    fn missing_default_file_uses_defaults() {
        let (cfg, source) = Config::load_or_default(None, &tmp_path("absent-default"));
        assert_eq!(source, ConfigSource::Defaults);
        assert_eq!(cfg.settle_delay_ms, 500);
    }

    #[test]
    fn explicit_file_takes_precedence() {
        let explicit = tmp_path("explicit");
        std::fs::write(&explicit, r#"{ "settle_delay_ms": 7 }"#).unwrap();
        let (cfg, source) = Config::load_or_default(Some(explicit.as_path()), &tmp_path("unused-default"));
        assert_eq!(source, ConfigSource::File(explicit.clone()));
        assert_eq!(cfg.settle_delay_ms, 7);
        let _ = std::fs::remove_file(&explicit);
    }

    #[test]
    fn explicit_invalid_file_falls_back_to_defaults() {
        let explicit = tmp_path("invalid");
        std::fs::write(&explicit, "{ not json").unwrap();
        let (cfg, source) = Config::load_or_default(Some(explicit.as_path()), &tmp_path("unused-default2"));
        assert_eq!(source, ConfigSource::Defaults);
        assert_eq!(cfg.settle_delay_ms, 500);
        let _ = std::fs::remove_file(&explicit);
    }

    #[test]
    fn explicit_missing_file_falls_back_to_defaults() {
        let (_, source) =
            Config::load_or_default(Some(tmp_path("explicit-absent").as_path()), &tmp_path("unused-default3"));
        assert_eq!(source, ConfigSource::Defaults);
    }
}
