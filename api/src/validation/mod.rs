//! Input Validation Module
//!
//! Validation and sanitization for everything the API accepts from clients.
//!
//! # Overview
//!
//! 1. **Extractors** - `ValidatedJson<T>`, the `Validatable` trait, and the
//!    aggregated `ValidationError` response
//! 2. **Validators** - rule functions for the property record and page ids
//! 3. **Sanitizers** - recursive HTML stripping over JSON values
//! 4. **Property** - the validate-then-sanitize write pipeline
//! 5. **Upload** - image payload decoding and safe file-name derivation
//!
//! The property write path validates the raw record first (aggregating every
//! violated rule into one 400 response) and only then sanitizes, so a
//! rejected write never produces partially sanitized output.

pub mod extractors;
pub mod property;
pub mod requests;
pub mod sanitizers;
pub mod upload;
pub mod validators;

// Re-export commonly used items
pub use extractors::{FieldError, Validatable, ValidatedJson, ValidationBuilder, ValidationError};
pub use property::validate_property;
pub use sanitizers::{sanitize, sanitize_value, strip_html};
pub use upload::{validate_upload, DecodedImage};
pub use validators::{validate_page_id, validate_price, validate_title};
