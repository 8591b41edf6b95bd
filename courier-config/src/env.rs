// Environment variable loading

use crate::{ConfigError, Result};
use std::collections::HashMap;
use std::env;

/// Environment variable loader
pub struct EnvLoader {
    prefix: Option<String>,
}

impl EnvLoader {
    /// Create a new environment loader
    pub fn new(prefix: Option<String>) -> Self {
        Self { prefix }
    }

    /// Load every variable, keyed without the prefix.
    ///
    /// With a prefix set, only matching variables are returned and
    /// `MYAPP_EMAIL_HOST` becomes `EMAIL_HOST`.
    pub fn load(&self) -> HashMap<String, String> {
        env::vars()
            .filter_map(|(key, value)| self.unprefixed_key(&key).map(|key| (key, value)))
            .collect()
    }

    fn unprefixed_key(&self, key: &str) -> Option<String> {
        match self.prefix {
            Some(ref prefix) => key
                .strip_prefix(prefix.as_str())
                .and_then(|rest| rest.strip_prefix('_'))
                .map(str::to_string),
            None => Some(key.to_string()),
        }
    }

    fn full_key(&self, key: &str) -> String {
        match self.prefix {
            Some(ref prefix) => format!("{}_{}", prefix, key.to_uppercase()),
            None => key.to_uppercase(),
        }
    }

    /// Load a specific environment variable
    pub fn load_var(&self, key: &str) -> Result<String> {
        let full_key = self.full_key(key);
        env::var(&full_key).map_err(|_| ConfigError::Missing(full_key))
    }

    /// Load with default value
    pub fn load_var_or(&self, key: &str, default: &str) -> String {
        self.load_var(key).unwrap_or_else(|_| default.to_string())
    }
}

impl Default for EnvLoader {
    fn default() -> Self {
        Self::new(None)
    }
}
