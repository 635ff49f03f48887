//! Password generator - draws passwords from a character pool.

use std::collections::BTreeSet;

use rand::rngs::OsRng;
use rand::seq::SliceRandom;
use rand::{CryptoRng, RngCore};
use secrecy::SecretString;

use crate::charset::{CharacterClass, CharacterPool};
use crate::config::Config;
use crate::error::PasswordError;
use crate::sections::{length_section, pool_section, variety_section};

/// Default number of distinct character classes a request must enable.
pub const DEFAULT_MIN_CLASSES: usize = 3;

const DEFAULT_LENGTH: usize = 16;

/// What to generate: length, enabled classes and characters to leave out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub length: usize,
    pub classes: BTreeSet<CharacterClass>,
    pub excluded: BTreeSet<char>,
}

impl GenerationRequest {
    /// A request for `length` characters with every class enabled.
    pub fn new(length: usize) -> Self {
        Self {
            length,
            classes: CharacterClass::ALL.into_iter().collect(),
            excluded: BTreeSet::new(),
        }
    }

    /// Replaces the enabled classes.
    pub fn with_classes<I>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = CharacterClass>,
    {
        self.classes = classes.into_iter().collect();
        self
    }

    /// Adds every character of `chars` to the exclusion set.
    pub fn excluding(mut self, chars: &str) -> Self {
        self.excluded.extend(chars.chars());
        self
    }
}

impl Default for GenerationRequest {
    fn default() -> Self {
        Self::new(DEFAULT_LENGTH)
    }
}

/// Generates passwords that contain at least one character of every
/// enabled class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordGenerator {
    min_classes: usize,
}

impl PasswordGenerator {
    pub fn new() -> Self {
        Self::with_min_classes(DEFAULT_MIN_CLASSES)
    }

    pub fn with_min_classes(min_classes: usize) -> Self {
        Self { min_classes }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::with_min_classes(config.min_classes)
    }

    pub fn min_classes(&self) -> usize {
        self.min_classes
    }

    /// Runs every precondition in order and returns the pool to draw from.
    ///
    /// Length is checked before the pool is built.
    pub fn validate(&self, request: &GenerationRequest) -> Result<CharacterPool, PasswordError> {
        length_section(request)?;
        variety_section(request, self.min_classes)?;
        let pool = CharacterPool::build(&request.classes, &request.excluded)?;
        pool_section(request, &pool)?;
        Ok(pool)
    }

    /// Generates a password using the operating system's CSPRNG.
    pub fn generate(&self, request: &GenerationRequest) -> Result<SecretString, PasswordError> {
        self.generate_with_rng(request, &mut OsRng)
    }

    /// Generates a password from a caller-supplied cryptographic RNG.
    ///
    /// One character is drawn from each enabled class's own alphabet, the
    /// rest uniformly from the whole pool, then the sequence is shuffled.
    pub fn generate_with_rng<R>(
        &self,
        request: &GenerationRequest,
        rng: &mut R,
    ) -> Result<SecretString, PasswordError>
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        let pool = self.validate(request)?;

        let mut chars = Vec::with_capacity(request.length);
        for class in pool.classes() {
            let c = pool
                .class_chars(class)
                .choose(rng)
                .ok_or(PasswordError::ClassExhausted(class))?;
            chars.push(*c);
        }

        let filler = request.length.saturating_sub(chars.len());
        for _ in 0..filler {
            let c = pool
                .chars()
                .choose(rng)
                .ok_or(PasswordError::InsufficientPool)?;
            chars.push(*c);
        }

        chars.shuffle(rng);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            "Generated password: length {}, {} classes, pool of {}",
            chars.len(),
            request.classes.len(),
            pool.len()
        );

        let password: String = chars.into_iter().collect();
        Ok(SecretString::new(password.into()))
    }
}

impl Default for PasswordGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Generates a password with the default class minimum.
pub fn generate_password(request: &GenerationRequest) -> Result<SecretString, PasswordError> {
    PasswordGenerator::new().generate(request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;
    use secrecy::ExposeSecret;
    use std::collections::HashSet;

    fn has_class(password: &str, class: CharacterClass) -> bool {
        password.chars().any(|c| CharacterClass::of(c) == Some(class))
    }

    #[test]
    fn test_generate_default_request() {
        let pwd = generate_password(&GenerationRequest::default()).unwrap();
        let pwd = pwd.expose_secret();

        assert_eq!(pwd.chars().count(), 16);
        for class in CharacterClass::ALL {
            assert!(has_class(pwd, class), "Missing {} in {:?}", class, pwd);
        }
    }

    #[test]
    fn test_generate_respects_exclusions() {
        let request = GenerationRequest::new(32).excluding("0O1lI|`'\"");
        for _ in 0..50 {
            let pwd = generate_password(&request).unwrap();
            assert!(
                pwd.expose_secret().chars().all(|c| !request.excluded.contains(&c)),
                "Excluded character in {:?}",
                pwd.expose_secret()
            );
        }
    }

    #[test]
    fn test_generate_only_enabled_classes() {
        let request = GenerationRequest::new(20).with_classes([
            CharacterClass::Lowercase,
            CharacterClass::Digits,
            CharacterClass::Symbols,
        ]);
        let pwd = generate_password(&request).unwrap();
        let pwd = pwd.expose_secret();

        assert!(!has_class(pwd, CharacterClass::Uppercase));
        assert!(has_class(pwd, CharacterClass::Lowercase));
        assert!(has_class(pwd, CharacterClass::Digits));
        assert!(has_class(pwd, CharacterClass::Symbols));
    }

    #[test]
    fn test_generate_length_too_short_before_pool() {
        // No classes at all would fail later checks; length fails first.
        let request = GenerationRequest::new(5).with_classes(std::iter::empty());
        let result = generate_password(&request);
        assert!(matches!(
            result,
            Err(PasswordError::LengthTooShort { length: 5, min: 8 })
        ));
    }

    #[test]
    fn test_generate_single_class_default_minimum() {
        let request = GenerationRequest::new(8).with_classes([CharacterClass::Lowercase]);
        assert!(matches!(
            generate_password(&request),
            Err(PasswordError::InsufficientVariety { required: 3, .. })
        ));
    }

    #[test]
    fn test_generate_single_class_lowered_minimum() {
        let request = GenerationRequest::new(8).with_classes([CharacterClass::Lowercase]);
        let pwd = PasswordGenerator::with_min_classes(1)
            .generate(&request)
            .unwrap();
        assert_eq!(pwd.expose_secret().len(), 8);
        assert!(pwd.expose_secret().chars().all(|c| c.is_ascii_lowercase()));
    }

    #[test]
    fn test_generate_empty_pool() {
        let request = GenerationRequest::new(8)
            .with_classes([CharacterClass::Digits])
            .excluding("0123456789");
        let result = PasswordGenerator::with_min_classes(1).generate(&request);
        assert!(matches!(result, Err(PasswordError::InsufficientPool)));
    }

    #[test]
    fn test_generate_pool_too_small() {
        let request = GenerationRequest::new(12)
            .with_classes([CharacterClass::Digits])
            .excluding("9");
        let result = PasswordGenerator::with_min_classes(1).generate(&request);
        assert!(matches!(
            result,
            Err(PasswordError::PoolTooSmall {
                needed: 12,
                available: 9
            })
        ));
    }

    #[test]
    fn test_generate_class_exhausted() {
        let request = GenerationRequest::new(16).excluding("0123456789");
        let result = generate_password(&request);
        assert!(matches!(
            result,
            Err(PasswordError::ClassExhausted(CharacterClass::Digits))
        ));
    }

    #[test]
    fn test_generate_uses_whole_pool_when_length_matches() {
        let request = GenerationRequest::new(10).with_classes([CharacterClass::Digits]);
        let pwd = PasswordGenerator::with_min_classes(1)
            .generate(&request)
            .unwrap();
        assert_eq!(pwd.expose_secret().len(), 10);
        assert!(pwd.expose_secret().chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_generate_passwords_are_distinct() {
        let request = GenerationRequest::new(16);
        let passwords: HashSet<String> = (0..1000)
            .map(|_| generate_password(&request).unwrap().expose_secret().to_string())
            .collect();
        assert_eq!(passwords.len(), 1000);
    }

    #[test]
    fn test_generate_with_seeded_rng_is_reproducible() {
        let request = GenerationRequest::new(24);
        let generator = PasswordGenerator::new();

        let first = generator
            .generate_with_rng(&request, &mut ChaCha20Rng::seed_from_u64(7))
            .unwrap();
        let second = generator
            .generate_with_rng(&request, &mut ChaCha20Rng::seed_from_u64(7))
            .unwrap();

        assert_eq!(first.expose_secret(), second.expose_secret());
    }

    #[test]
    fn test_guaranteed_characters_are_shuffled() {
        // With 4 guaranteed draws placed first, position 0 would always be
        // uppercase; across many seeds it must not be.
        let request = GenerationRequest::new(8);
        let generator = PasswordGenerator::new();
        let first_classes: HashSet<Option<CharacterClass>> = (0..64)
            .map(|seed| {
                let pwd = generator
                    .generate_with_rng(&request, &mut ChaCha20Rng::seed_from_u64(seed))
                    .unwrap();
                pwd.expose_secret().chars().next().and_then(CharacterClass::of)
            })
            .collect();
        assert!(first_classes.len() > 1);
    }
}
