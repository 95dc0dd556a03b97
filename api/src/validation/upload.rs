//! Image upload payload validation.
//!
//! Checks the base64 data URI and the requested display name, decodes the
//! payload, and derives a flat, safe file name. Does not perform the upload
//! itself; the blob-store collaborator receives the decoded bytes.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use lazy_static::lazy_static;
use regex::Regex;

use super::extractors::ValidationError;

pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;
pub const MIN_IMAGE_BYTES: usize = 100;
pub const MAX_IMAGE_NAME_LENGTH: usize = 100;
const MAX_BASE_NAME_LENGTH: usize = 50;

lazy_static! {
    /// Accepted upload payloads: base64 data URIs for raster image types
    static ref DATA_URL_REGEX: Regex =
        Regex::new(r"^data:(image/(jpeg|jpg|png|gif|webp));base64,(.+)$").unwrap();

    /// Characters replaced by `_` in the derived file name
    static ref UNSAFE_NAME_CHAR: Regex = Regex::new(r"[^a-zA-Z0-9.-]").unwrap();

    /// Trailing extension of the requested name (re-added from the MIME type)
    static ref NAME_EXTENSION: Regex = Regex::new(r"\.[^.]*$").unwrap();
}

/// A decoded, validated upload ready for the blob store.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub bytes: Vec<u8>,
    pub content_type: String,
    pub file_name: String,
}

/// Validate an upload payload and derive its storage file name.
///
/// `timestamp_ms` becomes the file-name prefix; callers pass the current
/// wall clock, tests pass a fixed value.
pub fn validate_upload(
    image_data: &str,
    image_name: &str,
    timestamp_ms: i64,
) -> Result<DecodedImage, ValidationError> {
    if image_name.chars().count() > MAX_IMAGE_NAME_LENGTH {
        return Err(ValidationError::single(
            "imageName",
            "Image name too long (max 100 characters)",
        ));
    }

    let captures = DATA_URL_REGEX.captures(image_data).ok_or_else(|| {
        ValidationError::single(
            "imageData",
            "Invalid image format. Only JPEG, PNG, GIF, WebP allowed",
        )
    })?;
    let content_type = captures[1].to_string();
    let payload = &captures[3];

    let bytes = BASE64.decode(payload).map_err(|_| {
        ValidationError::single(
            "imageData",
            "Invalid image format. Only JPEG, PNG, GIF, WebP allowed",
        )
    })?;

    if bytes.is_empty() {
        return Err(ValidationError::single("imageData", "Empty image data"));
    }
    if bytes.len() > MAX_IMAGE_BYTES {
        return Err(ValidationError::single(
            "imageData",
            "Image too large (max 5MB)",
        ));
    }
    if bytes.len() < MIN_IMAGE_BYTES {
        return Err(ValidationError::single("imageData", "Image file too small"));
    }

    let file_name = derive_file_name(image_name, &content_type, timestamp_ms);

    Ok(DecodedImage {
        bytes,
        content_type,
        file_name,
    })
}

/// Derive `{timestamp}-{safe}.{ext}` from the requested name and MIME type.
///
/// Every character outside `[A-Za-z0-9.-]` becomes `_`, the original
/// extension is stripped, and the base is truncated to 50 characters, so
/// path-traversal names flatten into a single safe segment.
pub fn derive_file_name(image_name: &str, content_type: &str, timestamp_ms: i64) -> String {
    let extension = content_type.rsplit('/').next().unwrap_or("bin");
    let safe = UNSAFE_NAME_CHAR.replace_all(image_name, "_");
    let safe = NAME_EXTENSION.replace(&safe, "");
    let safe: String = safe.chars().take(MAX_BASE_NAME_LENGTH).collect();
    format!("{timestamp_ms}-{safe}.{extension}")
}
