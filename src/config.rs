//! Runtime parameters: history file location and class minimum.

use std::path::PathBuf;

use crate::generator::DEFAULT_MIN_CLASSES;

pub const HISTORY_PATH_ENV: &str = "PWD_HISTORY_PATH";
pub const MIN_CLASSES_ENV: &str = "PWD_MIN_CLASSES";

const DEFAULT_HISTORY_PATH: &str = "./password_history.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub history_path: PathBuf,
    pub min_classes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            history_path: PathBuf::from(DEFAULT_HISTORY_PATH),
            min_classes: DEFAULT_MIN_CLASSES,
        }
    }
}

impl Config {
    /// Reads the configuration from the environment.
    ///
    /// Priority for each value:
    /// 1. Environment variable (`PWD_HISTORY_PATH`, `PWD_MIN_CLASSES`)
    /// 2. Default (`./password_history.json`, 3)
    ///
    /// An unparsable `PWD_MIN_CLASSES` falls back to the default.
    pub fn from_env() -> Self {
        Self {
            history_path: get_history_path(),
            min_classes: get_min_classes(),
        }
    }
}

/// Returns the history file path.
pub fn get_history_path() -> PathBuf {
    std::env::var(HISTORY_PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_HISTORY_PATH))
}

/// Returns the minimum number of distinct classes a request must enable.
pub fn get_min_classes() -> usize {
    match std::env::var(MIN_CLASSES_ENV) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            #[cfg(feature = "tracing")]
            tracing::warn!(
                "Ignoring invalid {}={:?}, using {}",
                MIN_CLASSES_ENV,
                raw,
                DEFAULT_MIN_CLASSES
            );
            DEFAULT_MIN_CLASSES
        }),
        Err(_) => DEFAULT_MIN_CLASSES,
    }
}
