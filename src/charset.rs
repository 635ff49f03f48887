//! Character classes and pool building for password generation.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::error::PasswordError;

const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
const DIGITS: &str = "0123456789";
const SYMBOLS: &str = r##"!"#$%&'()*+,-./:;<=>?@[\]^_`{|}~"##;

/// One of the four fixed alphabets a password is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CharacterClass {
    Uppercase,
    Lowercase,
    Digits,
    Symbols,
}

impl CharacterClass {
    pub const ALL: [CharacterClass; 4] = [
        CharacterClass::Uppercase,
        CharacterClass::Lowercase,
        CharacterClass::Digits,
        CharacterClass::Symbols,
    ];

    pub fn alphabet(self) -> &'static str {
        match self {
            CharacterClass::Uppercase => UPPERCASE,
            CharacterClass::Lowercase => LOWERCASE,
            CharacterClass::Digits => DIGITS,
            CharacterClass::Symbols => SYMBOLS,
        }
    }

    /// Size of the class alphabet (26, 26, 10 and 32).
    pub fn size(self) -> usize {
        self.alphabet().len()
    }

    /// Returns the class `c` belongs to, or `None` for characters outside
    /// every alphabet (spaces, non-ASCII).
    pub fn of(c: char) -> Option<CharacterClass> {
        if c.is_ascii_uppercase() {
            Some(CharacterClass::Uppercase)
        } else if c.is_ascii_lowercase() {
            Some(CharacterClass::Lowercase)
        } else if c.is_ascii_digit() {
            Some(CharacterClass::Digits)
        } else if c.is_ascii_punctuation() {
            Some(CharacterClass::Symbols)
        } else {
            None
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            CharacterClass::Uppercase => "uppercase",
            CharacterClass::Lowercase => "lowercase",
            CharacterClass::Digits => "digits",
            CharacterClass::Symbols => "symbols",
        }
    }
}

impl fmt::Display for CharacterClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Characters eligible for sampling, after exclusions.
///
/// Keeps both the combined pool and each enabled class's own remaining
/// alphabet, so the generator can draw one guaranteed representative
/// per class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterPool {
    by_class: BTreeMap<CharacterClass, Vec<char>>,
    combined: Vec<char>,
}

impl CharacterPool {
    /// Builds the pool from the enabled classes minus every excluded character.
    ///
    /// # Errors
    ///
    /// Returns [`PasswordError::InsufficientPool`] if nothing is left.
    pub fn build(
        classes: &BTreeSet<CharacterClass>,
        excluded: &BTreeSet<char>,
    ) -> Result<Self, PasswordError> {
        let mut by_class = BTreeMap::new();
        let mut combined = Vec::new();

        for &class in classes {
            let remaining: Vec<char> = class
                .alphabet()
                .chars()
                .filter(|c| !excluded.contains(c))
                .collect();
            combined.extend_from_slice(&remaining);
            by_class.insert(class, remaining);
        }

        if combined.is_empty() {
            return Err(PasswordError::InsufficientPool);
        }

        Ok(Self { by_class, combined })
    }

    /// The combined pool, in class order.
    pub fn chars(&self) -> &[char] {
        &self.combined
    }

    pub fn len(&self) -> usize {
        self.combined.len()
    }

    pub fn is_empty(&self) -> bool {
        self.combined.is_empty()
    }

    /// Remaining characters of one class; empty if the class is not enabled.
    pub fn class_chars(&self, class: CharacterClass) -> &[char] {
        self.by_class.get(&class).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn classes(&self) -> impl Iterator<Item = CharacterClass> + '_ {
        self.by_class.keys().copied()
    }

    /// First enabled class whose whole alphabet was excluded.
    pub fn exhausted_class(&self) -> Option<CharacterClass> {
        self.by_class
            .iter()
            .find(|(_, chars)| chars.is_empty())
            .map(|(class, _)| *class)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set_of(classes: &[CharacterClass]) -> BTreeSet<CharacterClass> {
        classes.iter().copied().collect()
    }

    #[test]
    fn test_alphabet_sizes() {
        assert_eq!(CharacterClass::Uppercase.size(), 26);
        assert_eq!(CharacterClass::Lowercase.size(), 26);
        assert_eq!(CharacterClass::Digits.size(), 10);
        assert_eq!(CharacterClass::Symbols.size(), 32);
    }

    #[test]
    fn test_symbols_are_ascii_punctuation() {
        assert!(SYMBOLS.chars().all(|c| c.is_ascii_punctuation()));
        let unique: BTreeSet<char> = SYMBOLS.chars().collect();
        assert_eq!(unique.len(), 32);
    }

    #[test]
    fn test_classify_characters() {
        assert_eq!(CharacterClass::of('Q'), Some(CharacterClass::Uppercase));
        assert_eq!(CharacterClass::of('q'), Some(CharacterClass::Lowercase));
        assert_eq!(CharacterClass::of('7'), Some(CharacterClass::Digits));
        assert_eq!(CharacterClass::of('~'), Some(CharacterClass::Symbols));
        assert_eq!(CharacterClass::of(' '), None);
        assert_eq!(CharacterClass::of('é'), None);
    }

    #[test]
    fn test_build_all_classes() {
        let pool = CharacterPool::build(&set_of(&CharacterClass::ALL), &BTreeSet::new()).unwrap();
        assert_eq!(pool.len(), 94);
        assert_eq!(pool.exhausted_class(), None);
    }

    #[test]
    fn test_build_removes_excluded_characters() {
        let excluded: BTreeSet<char> = "0O1lI".chars().collect();
        let pool = CharacterPool::build(
            &set_of(&[CharacterClass::Uppercase, CharacterClass::Digits]),
            &excluded,
        )
        .unwrap();

        assert_eq!(pool.len(), 36 - 4);
        assert!(!pool.chars().contains(&'0'));
        assert!(!pool.chars().contains(&'O'));
        assert!(!pool.chars().contains(&'I'));
        assert_eq!(pool.class_chars(CharacterClass::Digits).len(), 8);
        assert!(pool.class_chars(CharacterClass::Lowercase).is_empty());
    }

    #[test]
    fn test_build_empty_pool() {
        let excluded: BTreeSet<char> = DIGITS.chars().collect();
        let result = CharacterPool::build(&set_of(&[CharacterClass::Digits]), &excluded);
        assert_eq!(result, Err(PasswordError::InsufficientPool));
    }

    #[test]
    fn test_build_no_classes() {
        let result = CharacterPool::build(&BTreeSet::new(), &BTreeSet::new());
        assert_eq!(result, Err(PasswordError::InsufficientPool));
    }

    #[test]
    fn test_exhausted_class_detected() {
        let excluded: BTreeSet<char> = DIGITS.chars().collect();
        let pool = CharacterPool::build(
            &set_of(&[CharacterClass::Lowercase, CharacterClass::Digits]),
            &excluded,
        )
        .unwrap();
        assert_eq!(pool.exhausted_class(), Some(CharacterClass::Digits));
    }
}
