//! Generation request validation sections
//!
//! Each section checks one precondition of a generation request. The
//! generator runs them in a fixed order so the first failing precondition
//! decides the error.

mod length;
mod pool;
mod variety;

pub use length::{MIN_LENGTH, length_section};
pub use pool::pool_section;
pub use variety::variety_section;

use crate::error::PasswordError;

/// Result type for section validation functions.
/// - `Ok(())` - Section passed
/// - `Err(error)` - Request rejected
pub type SectionResult = Result<(), PasswordError>;
