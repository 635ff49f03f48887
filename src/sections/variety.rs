//! Character variety section - checks how many classes are enabled.

use super::SectionResult;
use crate::error::PasswordError;
use crate::generator::GenerationRequest;

/// Checks that at least `min_classes` character classes are enabled.
///
/// The error names the enabled classes so the caller can tell which are
/// missing.
pub fn variety_section(request: &GenerationRequest, min_classes: usize) -> SectionResult {
    if request.classes.len() < min_classes {
        let enabled: Vec<_> = request.classes.iter().map(|c| c.name()).collect();
        return Err(PasswordError::InsufficientVariety {
            required: min_classes,
            enabled: if enabled.is_empty() {
                "none".to_string()
            } else {
                enabled.join(", ")
            },
        });
    }
    Ok(())
}
