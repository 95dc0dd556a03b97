//! Field validators for inbound writes
//!
//! Rule functions return `Result<(), String>` so they compose with
//! `ValidationBuilder::check`; messages are the exact strings the API
//! contract promises to clients.

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;

lazy_static! {
    /// Page slug for the view counters: lowercase, digits, `-`/`_`
    static ref PAGE_ID_REGEX: Regex = Regex::new(r"^[a-z0-9][a-z0-9_-]{0,63}$").unwrap();
}

/// `title` must be a string with content left after trimming.
pub fn validate_title(record: &Value) -> Result<(), String> {
    match record.get("title").and_then(Value::as_str) {
        Some(title) if !title.trim().is_empty() => Ok(()),
        _ => Err("Title is required".to_string()),
    }
}

/// `price` must be a JSON number ≥ 0. Zero is valid — free listings exist.
pub fn validate_price(record: &Value) -> Result<(), String> {
    match record.get("price").and_then(Value::as_f64) {
        Some(price) if price >= 0.0 => Ok(()),
        _ => Err("Valid price is required".to_string()),
    }
}

/// View-counter page ids become store keys, so only slug characters pass.
pub fn validate_page_id(page: &str) -> Result<(), String> {
    if PAGE_ID_REGEX.is_match(page) {
        return Ok(());
    }
    Err("must be a short lowercase identifier (a-z, 0-9, '-', '_')".to_string())
}
