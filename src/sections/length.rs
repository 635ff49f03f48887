//! Length section - checks requested password length.

use super::SectionResult;
use crate::error::PasswordError;
use crate::generator::GenerationRequest;

pub const MIN_LENGTH: usize = 8;

/// Checks if the request meets the minimum length.
///
/// Runs before the pool is built.
pub fn length_section(request: &GenerationRequest) -> SectionResult {
    if request.length < MIN_LENGTH {
        return Err(PasswordError::LengthTooShort {
            length: request.length,
            min: MIN_LENGTH,
        });
    }
    Ok(())
}
