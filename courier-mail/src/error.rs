//! Mail error types.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for mail operations.
pub type Result<T> = std::result::Result<T, MailError>;

/// Mail errors.
#[derive(Debug, Error)]
pub enum MailError {
    /// A template could not be read or parsed.
    #[error("Failed to load template {name}: {reason}")]
    TemplateLoad { name: String, reason: String },

    /// A template parsed but could not be rendered against the context.
    #[error("Failed to render template: {0}")]
    TemplateExecution(String),

    /// An attachment could not be read.
    #[error("Failed to attach file {}: {source}", .path.display())]
    Attachment {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The transport rejected the message or the connection failed.
    #[error("Failed to send email: {0}")]
    Delivery(String),

    /// Invalid email address.
    #[error("Invalid email address: {0}")]
    InvalidAddress(String),

    /// Missing required field.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
}

impl MailError {
    /// Build a template load error for the given template name or path.
    pub(crate) fn template_load(name: impl Into<String>, reason: impl ToString) -> Self {
        Self::TemplateLoad {
            name: name.into(),
            reason: reason.to_string(),
        }
    }
}

impl From<lettre::transport::smtp::Error> for MailError {
    fn from(err: lettre::transport::smtp::Error) -> Self {
        Self::Delivery(err.to_string())
    }
}

impl From<lettre::address::AddressError> for MailError {
    fn from(err: lettre::address::AddressError) -> Self {
        Self::InvalidAddress(err.to_string())
    }
}

impl From<lettre::error::Error> for MailError {
    fn from(err: lettre::error::Error) -> Self {
        Self::Delivery(err.to_string())
    }
}

impl From<serde_json::Error> for MailError {
    fn from(err: serde_json::Error) -> Self {
        Self::TemplateExecution(format!("context is not serializable: {}", err))
    }
}

impl From<handlebars::RenderError> for MailError {
    fn from(err: handlebars::RenderError) -> Self {
        Self::TemplateExecution(err.to_string())
    }
}
