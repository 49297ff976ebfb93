/**
 * Post Input Validation
 *
 * Field-level shape checks for post mutations. Validation runs before any
 * persistence or image storage; a failure reports every offending field at
 * once and leaves no side effects.
 */

use crate::error::FieldError;
use crate::images::{self, ImageUpload};

/// Check title and content. Returns one `FieldError` per offending field.
pub fn validate_post_fields(title: &str, content: &str) -> Vec<FieldError> {
    let mut errors = Vec::new();
    if title.trim().is_empty() {
        errors.push(FieldError::new("title", "Title must not be empty"));
    }
    if content.trim().is_empty() {
        errors.push(FieldError::new("content", "Content must not be empty"));
    }
    errors
}

/// Check the image of a create request: an upload must be present and of a
/// supported type.
pub fn validate_create_image(image: Option<&ImageUpload>, errors: &mut Vec<FieldError>) {
    match image {
        None => errors.push(FieldError::new("image", "No image provided")),
        Some(upload) if !images::is_supported_type(&upload.content_type) => {
            errors.push(FieldError::new("image", "Unsupported image type"))
        }
        Some(_) => {}
    }
}

/// Check the image of an update request: either a supported upload or a
/// non-empty existing reference must remain.
pub fn validate_update_image(
    image: Option<&ImageUpload>,
    existing: Option<&str>,
    errors: &mut Vec<FieldError>,
) {
    match image {
        Some(upload) if !images::is_supported_type(&upload.content_type) => {
            errors.push(FieldError::new("image", "Unsupported image type"))
        }
        Some(_) => {}
        None => {
            let kept = existing.map(str::trim).is_some_and(|s| !s.is_empty());
            if !kept {
                errors.push(FieldError::new("image", "No image file picked!"));
            }
        }
    }
}
