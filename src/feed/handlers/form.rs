/**
 * Multipart Form Parsing
 *
 * Post mutations arrive as multipart form data with `title` and `content`
 * text fields and an `image` part that is either an uploaded file or, on
 * update, a text field carrying the existing reference to keep.
 *
 * Parsing only collects fields; all semantic validation happens in the
 * pipeline afterwards. A malformed multipart body is a field-level
 * validation failure, not a server fault.
 */

use axum::extract::Multipart;

use crate::error::ApiError;
use crate::images::ImageUpload;

/// Raw fields collected from a post mutation request.
#[derive(Debug, Default)]
pub struct PostForm {
    pub title: String,
    pub content: String,
    /// Uploaded replacement/initial image, if a file part was sent
    pub image: Option<ImageUpload>,
    /// Existing reference passed through as text, if no file was sent
    pub existing_image: Option<String>,
}

fn malformed(e: impl std::fmt::Display) -> ApiError {
    tracing::warn!("Malformed multipart body: {e}");
    ApiError::invalid_field("body", "Malformed multipart body")
}

/// Collect the post form out of a multipart request.
pub async fn read_post_form(mut multipart: Multipart) -> Result<PostForm, ApiError> {
    let mut form = PostForm::default();

    while let Some(field) = multipart.next_field().await.map_err(malformed)? {
        match field.name() {
            Some("title") => form.title = field.text().await.map_err(malformed)?,
            Some("content") => form.content = field.text().await.map_err(malformed)?,
            Some("image") => {
                // A file part carries a filename/content type; a plain text
                // part is the reference to an already-stored image.
                if field.file_name().is_some() || field.content_type().is_some() {
                    let content_type = field
                        .content_type()
                        .unwrap_or("application/octet-stream")
                        .to_string();
                    let bytes = field.bytes().await.map_err(malformed)?;
                    form.image = Some(ImageUpload {
                        bytes,
                        content_type,
                    });
                } else {
                    form.existing_image = Some(field.text().await.map_err(malformed)?);
                }
            }
            // Unknown fields are ignored
            _ => {}
        }
    }

    Ok(form)
}
