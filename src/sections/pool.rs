//! Pool section - checks the built pool can satisfy the request.

use super::SectionResult;
use crate::charset::CharacterPool;
use crate::error::PasswordError;
use crate::generator::GenerationRequest;

/// Checks pool size against the requested length, then that every enabled
/// class kept at least one character after exclusions.
pub fn pool_section(request: &GenerationRequest, pool: &CharacterPool) -> SectionResult {
    if pool.len() < request.length {
        return Err(PasswordError::PoolTooSmall {
            needed: request.length,
            available: pool.len(),
        });
    }
    if let Some(class) = pool.exhausted_class() {
        return Err(PasswordError::ClassExhausted(class));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charset::CharacterClass;

    fn pool_for(request: &GenerationRequest) -> CharacterPool {
        CharacterPool::build(&request.classes, &request.excluded).unwrap()
    }

    #[test]
    fn test_pool_section_too_small() {
        let request = GenerationRequest::new(40)
            .with_classes([CharacterClass::Uppercase, CharacterClass::Digits]);
        let result = pool_section(&request, &pool_for(&request));
        assert_eq!(
            result,
            Err(PasswordError::PoolTooSmall {
                needed: 40,
                available: 36,
            })
        );
    }

    #[test]
    fn test_pool_section_exactly_enough() {
        let request = GenerationRequest::new(36)
            .with_classes([CharacterClass::Uppercase, CharacterClass::Digits]);
        assert_eq!(pool_section(&request, &pool_for(&request)), Ok(()));
    }

    #[test]
    fn test_pool_section_exhausted_class() {
        let request = GenerationRequest::new(12)
            .with_classes([CharacterClass::Lowercase, CharacterClass::Digits])
            .excluding("0123456789");
        assert_eq!(
            pool_section(&request, &pool_for(&request)),
            Err(PasswordError::ClassExhausted(CharacterClass::Digits))
        );
    }
}
