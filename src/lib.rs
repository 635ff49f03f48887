//! Password generation library
//!
//! This library generates passwords from configurable character classes,
//! scores their strength and keeps a hash-only history of generated
//! passwords.
//!
//! # Features
//!
//! - `tracing`: Enables logging via tracing crate
//!
//! # Environment Variables
//!
//! - `PWD_HISTORY_PATH`: Custom path to the history file
//!   (default: `./password_history.json`)
//! - `PWD_MIN_CLASSES`: Minimum number of enabled character classes
//!   (default: 3)
//!
//! # Example
//!
//! ```rust,no_run
//! use pwd_forge::{Config, GenerationRequest, HistoryStore, PasswordGenerator};
//! use pwd_forge::evaluate_password_strength;
//!
//! let config = Config::from_env();
//! let generator = PasswordGenerator::from_config(&config);
//!
//! let request = GenerationRequest::new(20).excluding("0O1lI");
//! let password = generator.generate(&request).expect("Invalid request");
//!
//! let metrics = evaluate_password_strength(&password).expect("Empty password");
//! println!("Strength: {} ({})", metrics.tier, metrics.crack_time);
//!
//! let mut history = HistoryStore::from_config(&config);
//! history
//!     .save_entry(&password, "work email", ["work"])
//!     .expect("Failed to save history");
//! ```

mod charset;
mod config;
mod error;
mod evaluator;
mod generator;
mod history;
mod sections;

// Public API
pub use charset::{CharacterClass, CharacterPool};
pub use config::{Config, HISTORY_PATH_ENV, MIN_CLASSES_ENV, get_history_path, get_min_classes};
pub use error::{HistoryError, HistoryLoadWarning, PasswordError};
pub use evaluator::{
    StrengthMetrics, StrengthTier, evaluate_password_strength, evaluate_password_strength_with,
};
pub use generator::{DEFAULT_MIN_CLASSES, GenerationRequest, PasswordGenerator, generate_password};
pub use history::{HistoryEntry, HistoryStore, hash_password};
pub use sections::MIN_LENGTH;

// Re-exported so callers can build and read passwords without a direct dependency.
pub use secrecy::{ExposeSecret, SecretString};
