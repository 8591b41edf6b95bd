//! # Courier Mail
//!
//! Templated transactional email over SMTP.
//!
//! ## Features
//!
//! - **Layout/content templates**: Handlebars layout with a `{{> content}}` slot
//! - **Plain-text fallback**: derived from the rendered HTML by stripping tags
//! - **Attachments**: files read at send time, content type guessed from the name
//! - **SMTP Transport**: STARTTLS or implicit TLS with credentials via lettre
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use courier_mail::{Address, Composer, OutgoingMail, SmtpConfig, SmtpTransport, TemplatePair};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Welcome<'a> {
//!     #[serde(rename = "Name")]
//!     name: &'a str,
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let transport = SmtpTransport::new(
//!         SmtpConfig::new("smtp.example.com").credentials("noreply@example.com", "password"),
//!     )?;
//!     let sender = Address::with_name("noreply@example.com", "Example Inc")?;
//!     let composer = Composer::new(sender, transport);
//!
//!     let mail = OutgoingMail::new("Welcome", TemplatePair::with_default_layout("templates/welcome.hbs"))
//!         .to("jane@example.com")
//!         .attach("terms.pdf");
//!
//!     composer.send(&mail, &Welcome { name: "Jane" }).await?;
//!     Ok(())
//! }
//! ```

mod error;
mod address;
mod attachment;
mod envelope;
mod markup;
mod template;
mod transport;
mod composer;

pub use error::{MailError, Result};
pub use address::Address;
pub use attachment::Attachment;
pub use envelope::Envelope;
pub use markup::strip_markup;
pub use template::{
    CONTENT_PARTIAL, DEFAULT_LAYOUT, HandlebarsEngine, TemplateEngine, TemplatePair,
};
pub use transport::{SmtpConfig, SmtpSecurity, SmtpTransport, Transport};
pub use composer::{Composer, OutgoingMail};

/// Prelude for common imports.
///
/// ```
/// use courier_mail::prelude::*;
/// ```
pub mod prelude {
    pub use crate::address::Address;
    pub use crate::composer::{Composer, OutgoingMail};
    pub use crate::envelope::Envelope;
    pub use crate::error::{MailError, Result};
    pub use crate::template::{HandlebarsEngine, TemplateEngine, TemplatePair};
    pub use crate::transport::{SmtpConfig, SmtpSecurity, SmtpTransport, Transport};
}
