// Mail account settings

use crate::{ConfigError, EnvLoader, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Account address, also used as the SMTP username.
pub const KEY_ACCOUNT: &str = "EMAIL_HOST_USER";
/// Account password.
pub const KEY_PASSWORD: &str = "EMAIL_HOST_PASSWORD";
/// SMTP relay host.
pub const KEY_HOST: &str = "EMAIL_HOST";
/// SMTP relay port.
pub const KEY_PORT: &str = "EMAIL_PORT";
/// Display name put in front of the account address in `From`.
pub const KEY_DISPLAY_NAME: &str = "EMAIL_DISPLAY_NAME";

/// Submission port with STARTTLS.
pub const DEFAULT_PORT: u16 = 587;
pub const DEFAULT_DISPLAY_NAME: &str = "FundusAI Inc";

/// Everything needed to authenticate against the relay and sign outgoing mail.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MailSettings {
    pub account: String,
    pub password: String,
    pub host: String,
    pub port: u16,
    pub display_name: String,
}

impl MailSettings {
    /// Build settings from an explicit key/value map.
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self> {
        let required = |key: &str| -> Result<String> {
            vars.get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(str::to_string)
                .ok_or_else(|| ConfigError::Missing(key.to_string()))
        };

        let port = match vars.get(KEY_PORT).map(|v| v.trim()) {
            None | Some("") => DEFAULT_PORT,
            Some(raw) => raw.parse::<u16>().map_err(|e| ConfigError::Invalid {
                key: KEY_PORT.to_string(),
                reason: format!("{raw:?}: {e}"),
            })?,
        };

        let display_name = vars
            .get(KEY_DISPLAY_NAME)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .unwrap_or(DEFAULT_DISPLAY_NAME)
            .to_string();

        Ok(Self {
            account: required(KEY_ACCOUNT)?,
            password: required(KEY_PASSWORD)?,
            host: required(KEY_HOST)?,
            port,
            display_name,
        })
    }

    /// Build settings from the process environment.
    pub fn from_env(loader: &EnvLoader) -> Result<Self> {
        Self::from_vars(&loader.load())
    }

    /// The `From` header value, e.g. `FundusAI Inc <noreply@example.com>`.
    pub fn sender(&self) -> String {
        format!("{} <{}>", self.display_name, self.account)
    }
}

impl fmt::Debug for MailSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MailSettings")
            .field("account", &self.account)
            .field("password", &"***")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("display_name", &self.display_name)
            .finish()
    }
}
