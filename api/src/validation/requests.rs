//! Validation implementations for API request types

use shared::models::{AuthRequest, UploadImageRequest};

use super::extractors::{FieldError, Validatable, ValidationBuilder};
use super::upload::MAX_IMAGE_NAME_LENGTH;

impl Validatable for UploadImageRequest {
    fn sanitize(&mut self) {
        // The payload is binary and the display name is neutralized during
        // file-name derivation; nothing to rewrite here.
    }

    fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut builder = ValidationBuilder::new();

        let data_missing = self.image_data.as_deref().map_or(true, str::is_empty);
        let name_missing = self.image_name.as_deref().map_or(true, str::is_empty);
        if data_missing || name_missing {
            builder.add_error("body", "Missing imageData or imageName");
            return builder.build();
        }

        if let Some(name) = self.image_name.as_deref() {
            builder.check("imageName", || {
                if name.chars().count() > MAX_IMAGE_NAME_LENGTH {
                    return Err("Image name too long (max 100 characters)".to_string());
                }
                Ok(())
            });
        }

        builder.build()
    }
}

impl Validatable for AuthRequest {
    fn sanitize(&mut self) {
        // Passwords are compared verbatim; trimming or stripping would
        // silently change the credential.
    }

    fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut builder = ValidationBuilder::new();
        if self.password.as_deref().map_or(true, str::is_empty) {
            builder.add_error("password", "Invalid password format");
        }
        builder.build()
    }
}
