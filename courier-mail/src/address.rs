//! Email address types.

use crate::{MailError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Email address with optional display name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Address {
    /// The email address.
    pub email: String,
    /// Optional display name.
    pub name: Option<String>,
}

impl Address {
    /// Create a new address with just an email.
    pub fn new(email: impl Into<String>) -> Result<Self> {
        let email = email.into().trim().to_string();
        validate_email(&email)?;
        Ok(Self { email, name: None })
    }

    /// Create a new address with a display name.
    pub fn with_name(email: impl Into<String>, name: impl Into<String>) -> Result<Self> {
        let mut address = Self::new(email)?;
        let name = name.into();
        address.name = Some(name.trim().to_string()).filter(|n| !n.is_empty());
        Ok(address)
    }

    /// Parse an address from a string like "Name <email@example.com>" or "email@example.com".
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();

        if let Some(start) = s.rfind('<') {
            let end = s[start..]
                .find('>')
                .map(|offset| start + offset)
                .ok_or_else(|| MailError::InvalidAddress(s.to_string()))?;
            if !s[end + 1..].trim().is_empty() {
                return Err(MailError::InvalidAddress(s.to_string()));
            }
            let name = s[..start].trim().trim_matches('"');
            return Self::with_name(&s[start + 1..end], name);
        }

        Self::new(s)
    }

    /// Get the email address.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Get the display name.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Convert to a lettre mailbox.
    pub(crate) fn to_mailbox(&self) -> Result<lettre::message::Mailbox> {
        let address = lettre::Address::from_str(&self.email)?;
        Ok(lettre::message::Mailbox::new(self.name.clone(), address))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{} <{}>", name, self.email),
            None => write!(f, "{}", self.email),
        }
    }
}

impl FromStr for Address {
    type Err = MailError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for Address {
    type Error = MailError;

    fn try_from(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

// lettre rejects what the SMTP envelope would reject, so use its parser.
fn validate_email(email: &str) -> Result<()> {
    if email.is_empty() {
        return Err(MailError::InvalidAddress(
            "Email cannot be empty".to_string(),
        ));
    }

    lettre::Address::from_str(email)
        .map(|_| ())
        .map_err(|e| MailError::InvalidAddress(format!("{}: {}", email, e)))
}
