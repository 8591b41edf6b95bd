//! Email attachments.

use crate::{MailError, Result};
use serde::{Deserialize, Serialize};
use std::io;
use std::path::Path;

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// File attached to an envelope.
///
/// Holds the bytes read at send time; the originating path is not kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    /// File name shown to the recipient.
    pub filename: String,
    /// MIME type.
    pub content_type: String,
    /// File content.
    pub data: Vec<u8>,
}

impl Attachment {
    /// Create a new attachment from bytes.
    pub fn new(
        filename: impl Into<String>,
        content_type: impl Into<String>,
        data: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            filename: filename.into(),
            content_type: content_type.into(),
            data: data.into(),
        }
    }

    /// Read an attachment from disk, named after the path's last component.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let attachment_error = |source| MailError::Attachment {
            path: path.to_path_buf(),
            source,
        };

        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                attachment_error(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    "path has no usable file name",
                ))
            })?
            .to_string();

        let data = std::fs::read(path).map_err(attachment_error)?;

        Ok(Self::from_bytes(filename, data))
    }

    /// Create an attachment from bytes with automatic MIME type detection.
    pub fn from_bytes(filename: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        let filename = filename.into();
        let content_type = mime_guess::from_path(&filename)
            .first()
            .map(|m| m.to_string())
            .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string());

        Self::new(filename, content_type, data)
    }

    /// Get the size in bytes.
    pub fn size(&self) -> usize {
        self.data.len()
    }
}
