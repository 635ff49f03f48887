//! Error types shared by the generator, the evaluator and the history store.

use std::path::PathBuf;
use thiserror::Error;

use crate::charset::CharacterClass;
use crate::history::HistoryEntry;

/// Request-validation failures. Never retried; the caller fixes the input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Password must be at least {min} characters (requested {length})")]
    LengthTooShort { length: usize, min: usize },
    #[error("At least {required} character classes are required, enabled: {enabled}")]
    InsufficientVariety { required: usize, enabled: String },
    #[error("No characters left to choose from after exclusions")]
    InsufficientPool,
    #[error("Need at least {needed} distinct characters, only {available} available")]
    PoolTooSmall { needed: usize, available: usize },
    #[error("Every {0} character was excluded")]
    ClassExhausted(CharacterClass),
    #[error("Password is empty")]
    EmptyPassword,
}

/// Failures of [`crate::HistoryStore::save_entry`].
#[derive(Error, Debug)]
pub enum HistoryError {
    #[error(transparent)]
    Password(#[from] PasswordError),
    /// The entry was appended in memory but could not be written to disk.
    #[error("Entry kept in memory only, failed to write history file {path}: {source}")]
    Persist {
        path: PathBuf,
        entry: Box<HistoryEntry>,
        #[source]
        source: std::io::Error,
    },
}

/// Non-fatal problems met while loading the history file.
///
/// The store falls back to an empty history in every case.
#[derive(Error, Debug)]
pub enum HistoryLoadWarning {
    #[error("History file not found: {0}")]
    Missing(PathBuf),
    #[error("Failed to read history file {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("History file {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
