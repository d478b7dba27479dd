//! Server configuration from environment variables.
//!
//! | Variable                 | Default   |
//! |--------------------------|-----------|
//! | `HOST`                   | `0.0.0.0` |
//! | `PORT`                   | `8080`    |
//! | `DATA_FILE`              | unset (state is kept in memory only) |
//! | `SNAPSHOT_INTERVAL_SECS` | `30`      |
//! | `STATIC_DIR`             | `static`  |

use std::path::PathBuf;
use std::time::Duration;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// JSON snapshot of the store, loaded at start and flushed periodically.
    pub data_file: Option<PathBuf>,
    pub snapshot_interval: Duration,
    /// Served at `/static` when the directory exists.
    pub static_dir: PathBuf,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_snapshot_interval() -> Duration {
    Duration::from_secs(30)
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            data_file: None,
            snapshot_interval: default_snapshot_interval(),
            static_dir: PathBuf::from("static"),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Unparseable numbers fall back to their defaults with a
    /// warning.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match non_empty("PORT") {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                log::warn!("Ignoring invalid PORT {:?}", raw);
                defaults.port
            }),
            None => defaults.port,
        };
        let snapshot_interval = match non_empty("SNAPSHOT_INTERVAL_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    log::warn!("Ignoring invalid SNAPSHOT_INTERVAL_SECS {:?}", raw);
                    defaults.snapshot_interval
                }
            },
            None => defaults.snapshot_interval,
        };

        Self {
            host: non_empty("HOST").unwrap_or(defaults.host),
            port,
            data_file: non_empty("DATA_FILE").map(PathBuf::from),
            snapshot_interval,
            static_dir: non_empty("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.static_dir),
        }
    }
}
