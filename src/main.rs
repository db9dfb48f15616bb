//! Entry point for **breaklock**.
//!
//! Loads the configuration, probes the session bus once, picks the screen
//! locker for this platform and runs the break sequence.  The outcome is
//! printed on stdout; the exit status is zero either way.

use breaklock::cli::{self, USAGE};
use breaklock::command::Platform;
use breaklock::config::Config;
use breaklock::process::runner::SystemRunner;
use breaklock::sequence::BreakSequence;
use breaklock::session::dbus::ZbusSession;
use breaklock::steps::companion::executable_dir;
use breaklock::steps::lock::select_locker;
use log::{error, warn};
use std::path::{Path, PathBuf};

/// Resolve the config directory (`$XDG_CONFIG_HOME/breaklock`).
fn config_dir() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME").unwrap_or_else(|_| {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
        format!("{}/.config", home)
    });
    PathBuf::from(base).join("breaklock")
}

/// Load the config from `path`, or `$XDG_CONFIG_HOME/breaklock/config.json`,
/// falling back to compiled-in defaults.
fn load_config(path: Option<&Path>) -> Config {
    let (config, _) = Config::load_or_default(path, &config_dir().join("config.json"));
    config
}

/// Connect to the session bus once; every step reuses the result.
fn probe_session_bus(platform: Platform, config: &Config) -> Option<ZbusSession> {
    if platform == Platform::Primary {
        return None;
    }
    match ZbusSession::connect(config.session.method_timeout()) {
        Ok(bus) => Some(bus),
        Err(e) => {
            warn!("{}, media control and session lock disabled", e);
            None
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = match cli::parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            error!("{}", e);
            eprintln!("{}", USAGE);
            std::process::exit(2);
        }
    };
    if args.help {
        println!("{}", USAGE);
        return;
    }

    let config = load_config(args.config_path.as_deref());
    let platform = Platform::current();
    let bus = probe_session_bus(platform, &config);
    let locker = select_locker(platform, bus.clone(), SystemRunner::new(), &config.lock);

    let sequence = BreakSequence::new(platform, bus, SystemRunner::new(), locker, config)
        .with_companion_dir(executable_dir());
    let report = sequence.run(args.countdown);

    if report.locked() {
        println!("screen lock sequence complete");
    } else {
        println!("screen lock failed");
    }
}
