//! Password strength evaluator - metrics and tier from a password string.

use std::collections::HashSet;
use std::fmt;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::charset::CharacterClass;
use crate::error::PasswordError;
use crate::sections::MIN_LENGTH;

/// Qualitative strength tier, decided by entropy thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StrengthTier {
    #[default]
    Weak,
    Medium,
    Strong,
    VeryStrong,
}

impl StrengthTier {
    /// Descriptive label only, not a real estimate.
    pub fn crack_time(self) -> &'static str {
        match self {
            StrengthTier::Weak => "seconds to minutes",
            StrengthTier::Medium => "hours to days",
            StrengthTier::Strong => "months to years",
            StrengthTier::VeryStrong => "decades to centuries",
        }
    }

    fn from_entropy(entropy: f64, length: usize, min_length: usize) -> Self {
        if entropy < 40.0 || length < min_length {
            StrengthTier::Weak
        } else if entropy < 60.0 {
            StrengthTier::Medium
        } else if entropy < 80.0 {
            StrengthTier::Strong
        } else {
            StrengthTier::VeryStrong
        }
    }
}

impl fmt::Display for StrengthTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StrengthTier::Weak => write!(f, "WEAK"),
            StrengthTier::Medium => write!(f, "MEDIUM"),
            StrengthTier::Strong => write!(f, "STRONG"),
            StrengthTier::VeryStrong => write!(f, "VERY_STRONG"),
        }
    }
}

/// Descriptive metrics of a password. Recomputed on every evaluation.
///
/// Field names are the keys of the `strength` object in the history file;
/// missing keys in older files fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StrengthMetrics {
    pub length: usize,
    pub uppercase: usize,
    pub lowercase: usize,
    pub digits: usize,
    pub symbols: usize,
    pub unique_chars: usize,
    pub pool_size: usize,
    pub entropy: f64,
    #[serde(alias = "strength")]
    pub tier: StrengthTier,
    pub crack_time: String,
}

impl StrengthMetrics {
    pub fn count(&self, class: CharacterClass) -> usize {
        match class {
            CharacterClass::Uppercase => self.uppercase,
            CharacterClass::Lowercase => self.lowercase,
            CharacterClass::Digits => self.digits,
            CharacterClass::Symbols => self.symbols,
        }
    }
}

/// Evaluates a password with the default minimum length of 8.
pub fn evaluate_password_strength(
    password: &SecretString,
) -> Result<StrengthMetrics, PasswordError> {
    evaluate_password_strength_with(password, MIN_LENGTH)
}

/// Evaluates a password; anything shorter than `min_length` is `WEAK`
/// regardless of entropy.
///
/// Entropy here is the heuristic `length * sqrt(pool_size)`, where
/// `pool_size` sums the alphabet sizes of the classes present.
///
/// # Errors
///
/// Returns [`PasswordError::EmptyPassword`] for an empty password.
pub fn evaluate_password_strength_with(
    password: &SecretString,
    min_length: usize,
) -> Result<StrengthMetrics, PasswordError> {
    let pwd = password.expose_secret();
    if pwd.is_empty() {
        return Err(PasswordError::EmptyPassword);
    }

    let mut metrics = StrengthMetrics {
        length: pwd.chars().count(),
        ..StrengthMetrics::default()
    };

    for class in pwd.chars().filter_map(CharacterClass::of) {
        match class {
            CharacterClass::Uppercase => metrics.uppercase += 1,
            CharacterClass::Lowercase => metrics.lowercase += 1,
            CharacterClass::Digits => metrics.digits += 1,
            CharacterClass::Symbols => metrics.symbols += 1,
        }
    }

    let unique_chars: HashSet<char> = pwd.chars().collect();
    metrics.unique_chars = unique_chars.len();

    metrics.pool_size = CharacterClass::ALL
        .into_iter()
        .filter(|&class| metrics.count(class) > 0)
        .map(CharacterClass::size)
        .sum();

    metrics.entropy = if metrics.pool_size > 0 {
        metrics.length as f64 * (metrics.pool_size as f64).sqrt()
    } else {
        0.0
    };

    metrics.tier = StrengthTier::from_entropy(metrics.entropy, metrics.length, min_length);
    metrics.crack_time = metrics.tier.crack_time().to_string();

    Ok(metrics)
}
