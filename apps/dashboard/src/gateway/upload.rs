//! Uploaded files and the extension rules checked before any request.

use bytes::Bytes;
use serde::Serialize;
use thiserror::Error;

/// A file received from the browser, held in memory for one render pass.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

impl UploadedFile {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: None,
            bytes: bytes.into(),
        }
    }

    /// Lowercased extension without the dot, if the name has one.
    pub fn extension(&self) -> Option<String> {
        let (stem, ext) = self.file_name.rsplit_once('.')?;
        if stem.is_empty() && ext.is_empty() {
            return None;
        }
        Some(ext.to_ascii_lowercase())
    }

    /// The browser-declared type, or one derived from the extension.
    pub fn mime_type(&self) -> &str {
        if let Some(declared) = self.content_type.as_deref().filter(|ct| !ct.is_empty()) {
            return declared;
        }
        match self.extension().as_deref() {
            Some("pdf") => "application/pdf",
            Some("docx") => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            Some("doc") => "application/msword",
            Some("txt") => "text/plain",
            _ => "application/octet-stream",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadKind {
    Resume,
    JobDocument,
}

impl UploadKind {
    pub fn allowed_extensions(&self) -> &'static [&'static str] {
        match self {
            UploadKind::Resume => &["txt", "pdf", "docx"],
            UploadKind::JobDocument => &["pdf", "docx", "doc"],
        }
    }

    /// Multipart field name the backend expects.
    pub fn form_field(&self) -> &'static str {
        match self {
            UploadKind::Resume => "resume_file",
            UploadKind::JobDocument => "job_doc",
        }
    }

    pub fn validate(&self, file: &UploadedFile) -> Result<(), UploadError> {
        if file.file_name.trim().is_empty() {
            return Err(UploadError::MissingFile);
        }
        let allowed = self.allowed_extensions();
        match file.extension() {
            Some(ext) if allowed.contains(&ext.as_str()) => Ok(()),
            _ => Err(UploadError::UnsupportedType {
                file_name: file.file_name.clone(),
                allowed: allowed.iter().map(|e| e.to_uppercase()).collect::<Vec<_>>().join(", "),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    #[error("Please upload a file first")]
    MissingFile,

    #[error("Unsupported file type: {file_name}. Please upload {allowed} files only.")]
    UnsupportedType { file_name: String, allowed: String },
}
