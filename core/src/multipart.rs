//! File parts for `multipart/form-data` uploads.
//!
//! A `FilePart` only names the part and the file behind it, so a request
//! carrying one stays plain data. The wire encoding (boundary, part headers,
//! content type inferred from the file name) is done by `reqwest::multipart`
//! when `Transport` sends the request.

use std::path::{Path, PathBuf};

use reqwest::multipart::{Form, Part};

use crate::error::ApiError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    pub name: String,
    pub path: PathBuf,
}

impl FilePart {
    pub fn new(name: impl Into<String>, path: impl AsRef<Path>) -> Self {
        Self {
            name: name.into(),
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Open the file as a streamed part. File name and content type come
    /// from the path.
    pub async fn to_part(&self) -> Result<Part, ApiError> {
        Part::file(&self.path).await.map_err(|source| ApiError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

/// Assemble a form holding every part, in order.
pub async fn to_form(parts: &[FilePart]) -> Result<Form, ApiError> {
    let mut form = Form::new();
    for part in parts {
        form = form.part(part.name.clone(), part.to_part().await?);
    }
    Ok(form)
}
