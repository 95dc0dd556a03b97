//! Write validation for the property record.
//!
//! Both rules run against the raw record so every violation is reported in
//! one pass; sanitization happens only after validation succeeds, and the
//! whole record is sanitized deeply before it is persisted.

use serde_json::Value;

use super::extractors::{ValidationBuilder, ValidationError};
use super::{sanitizers, validators};

pub fn validate_property(record: Value) -> Result<Value, ValidationError> {
    let mut builder = ValidationBuilder::new();
    builder.check("title", || validators::validate_title(&record));
    builder.check("price", || validators::validate_price(&record));
    builder.build().map_err(ValidationError::new)?;

    Ok(sanitizers::sanitize(record))
}
