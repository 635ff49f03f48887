//! History store
//!
//! Keeps a hash-only record of generated passwords in a JSON file. The
//! whole file is rewritten after every append.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{SecondsFormat, Utc};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::config::Config;
use crate::error::{HistoryError, HistoryLoadWarning, PasswordError};
use crate::evaluator::{StrengthMetrics, evaluate_password_strength};

/// A record of one generated password. Never holds the plaintext.
///
/// Every entry this crate writes carries all fields. Only files written by
/// older versions can lack `purpose`, `tags`, `strength` or `timestamp`,
/// so those default on load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub password_hash: String,
    #[serde(default)]
    pub purpose: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strength: Option<StrengthMetrics>,
    #[serde(default)]
    pub timestamp: String,
}

impl HistoryEntry {
    /// `needle` must already be lowercase.
    fn matches(&self, needle: &str) -> bool {
        self.purpose.to_lowercase().contains(needle)
            || self.tags.iter().any(|t| t.to_lowercase().contains(needle))
    }
}

/// Hex-encoded SHA-256 digest of the password.
pub fn hash_password(password: &SecretString) -> String {
    hex::encode(Sha256::digest(password.expose_secret().as_bytes()))
}

/// Append-only password history backed by a single JSON file.
///
/// Assumes it is the only writer of its file.
#[derive(Debug)]
pub struct HistoryStore {
    path: PathBuf,
    entries: Vec<HistoryEntry>,
    load_warning: Option<HistoryLoadWarning>,
}

impl HistoryStore {
    /// Opens the store at `path` and loads it.
    ///
    /// A missing or corrupt file leaves the store empty; the reason is kept
    /// in [`HistoryStore::load_warning`].
    pub fn open<P: Into<PathBuf>>(path: P) -> Self {
        let mut store = Self {
            path: path.into(),
            entries: Vec::new(),
            load_warning: None,
        };
        let _ = store.load();
        store
    }

    pub fn from_config(config: &Config) -> Self {
        Self::open(&config.history_path)
    }

    /// Re-reads the backing file, replacing the in-memory entries.
    ///
    /// # Errors
    ///
    /// The returned warning is non-fatal: the store is left empty, the
    /// warning stays available from [`HistoryStore::load_warning`] and the
    /// next save overwrites the file.
    pub fn load(&mut self) -> Result<&[HistoryEntry], &HistoryLoadWarning> {
        self.load_warning = None;
        match read_entries(&self.path) {
            Ok(entries) => {
                #[cfg(feature = "tracing")]
                tracing::info!("History loaded: {} entries from {:?}", entries.len(), self.path);
                self.entries = entries;
                Ok(self.entries.as_slice())
            }
            Err(warning) => {
                #[cfg(feature = "tracing")]
                match &warning {
                    HistoryLoadWarning::Missing(_) => tracing::debug!("{}", warning),
                    _ => tracing::warn!("{}, starting with empty history", warning),
                }
                self.entries.clear();
                Err(&*self.load_warning.insert(warning))
            }
        }
    }

    /// Hashes and scores `password`, appends the entry and rewrites the file.
    ///
    /// # Errors
    ///
    /// - [`PasswordError::EmptyPassword`] if `password` is empty; nothing is
    ///   appended.
    /// - [`HistoryError::Persist`] if the file cannot be written. The entry
    ///   stays in memory for the rest of the process.
    pub fn save_entry<I, S>(
        &mut self,
        password: &SecretString,
        purpose: &str,
        tags: I,
    ) -> Result<HistoryEntry, HistoryError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if password.expose_secret().is_empty() {
            return Err(PasswordError::EmptyPassword.into());
        }

        let entry = HistoryEntry {
            password_hash: hash_password(password),
            purpose: purpose.to_string(),
            tags: tags.into_iter().map(Into::into).collect(),
            strength: Some(evaluate_password_strength(password)?),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        };
        self.entries.push(entry.clone());

        if let Err(source) = self.persist() {
            #[cfg(feature = "tracing")]
            tracing::error!("Failed to write history file {:?}: {}", self.path, source);
            return Err(HistoryError::Persist {
                path: self.path.clone(),
                entry: Box::new(entry),
                source,
            });
        }

        #[cfg(feature = "tracing")]
        tracing::info!("History saved: {} entries to {:?}", self.entries.len(), self.path);

        Ok(entry)
    }

    /// Entries whose purpose or any tag contains `term`, ignoring case,
    /// in insertion order.
    pub fn search(&self, term: &str) -> Vec<HistoryEntry> {
        let needle = term.to_lowercase();
        self.entries
            .iter()
            .filter(|e| e.matches(&needle))
            .cloned()
            .collect()
    }

    /// A copy of every entry in insertion order.
    pub fn all(&self) -> Vec<HistoryEntry> {
        self.entries.clone()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Why the most recent load came up empty, if it did.
    pub fn load_warning(&self) -> Option<&HistoryLoadWarning> {
        self.load_warning.as_ref()
    }

    fn persist(&self) -> io::Result<()> {
        let json = serde_json::to_string_pretty(&self.entries).map_err(io::Error::other)?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, json)
    }
}

fn read_entries(path: &Path) -> Result<Vec<HistoryEntry>, HistoryLoadWarning> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(HistoryLoadWarning::Missing(path.to_path_buf()));
        }
        Err(source) => {
            return Err(HistoryLoadWarning::Unreadable {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    serde_json::from_str(&content).map_err(|source| HistoryLoadWarning::Corrupt {
        path: path.to_path_buf(),
        source,
    })
}
