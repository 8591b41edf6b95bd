//! Mail account settings for Courier.
//!
//! Settings come from a `.env` file (optional) layered under the process
//! environment, and are parsed once at start-up into [`MailSettings`].
//!
//! ```rust,no_run
//! let settings = courier_config::load(None)?;
//! println!("sending as {}", settings.sender());
//! # Ok::<(), courier_config::ConfigError>(())
//! ```

pub mod env;
pub mod error;
pub mod settings;

pub use env::EnvLoader;
pub use error::{ConfigError, Result};
pub use settings::{DEFAULT_DISPLAY_NAME, DEFAULT_PORT, MailSettings};

use std::path::Path;
use tracing::debug;

/// Load a `.env` file into the process environment.
///
/// An explicit path must exist; without one, a missing `.env` in the
/// working directory (or its parents) is ignored. A `.env` that exists but
/// cannot be read or parsed is always an error.
pub fn load_dotenv(path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => {
            dotenvy::from_path(path)?;
            debug!(path = %path.display(), "Loaded .env file");
        }
        None => match dotenvy::dotenv() {
            Ok(found) => debug!(path = %found.display(), "Loaded .env file"),
            Err(e) if e.not_found() => debug!("No .env file found"),
            Err(e) => return Err(e.into()),
        },
    }
    Ok(())
}

/// Load the `.env` file, then read [`MailSettings`] from the environment.
pub fn load(dotenv_path: Option<&Path>) -> Result<MailSettings> {
    load_dotenv(dotenv_path)?;
    MailSettings::from_env(&EnvLoader::default())
}
