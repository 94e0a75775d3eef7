//! Buffers a multipart form into text fields and file parts.

use std::collections::HashMap;

use axum::extract::Multipart;

use vidhub_core::error::AppError;
use vidhub_core::traits::media::MediaUpload;

use crate::error::ApiError;

/// A fully buffered multipart form.
#[derive(Debug, Default)]
pub struct MultipartForm {
    fields: HashMap<String, String>,
    files: HashMap<String, MediaUpload>,
}

impl MultipartForm {
    /// Reads every part. Parts with a file name become files, the rest text.
    ///
    /// A file part with neither a name nor content is what browsers send for
    /// an untouched file input, and is skipped.
    pub async fn read(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };
            let file_name = field.file_name().map(str::to_string);
            let content_type = field.content_type().map(str::to_string);
            let data = field.bytes().await?;

            match file_name {
                Some(file_name) if file_name.is_empty() && data.is_empty() => continue,
                Some(file_name) => {
                    form.files
                        .insert(name, MediaUpload::new(file_name, content_type, data));
                }
                None => {
                    let text = String::from_utf8(data.to_vec()).map_err(|_| {
                        AppError::validation(format!("Field '{name}' is not valid UTF-8"))
                    })?;
                    form.fields.insert(name, text);
                }
            }
        }

        tracing::debug!(
            fields = form.fields.len(),
            files = form.files.len(),
            "Multipart form read"
        );
        Ok(form)
    }

    /// Text field value, empty when absent.
    pub fn text(&self, name: &str) -> String {
        self.fields.get(name).cloned().unwrap_or_default()
    }

    /// Removes and returns a file part.
    pub fn take_file(&mut self, name: &str) -> Option<MediaUpload> {
        self.files.remove(name)
    }
}
