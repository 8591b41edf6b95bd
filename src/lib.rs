// Courier - templated transactional email over SMTP
//
// Re-exports the member crates so applications depend on a single package,
// and wires loaded settings into the mail types.

pub use courier_config::{self as config, ConfigError, MailSettings};
pub use courier_mail::*;

/// SMTP connection settings for the configured relay.
///
/// Port 465 means implicit TLS; every other port upgrades with STARTTLS.
pub fn smtp_config(settings: &MailSettings) -> SmtpConfig {
    let config = SmtpConfig::new(settings.host.as_str());
    let config = if settings.port == 465 { config.tls() } else { config };

    config
        .port(settings.port)
        .credentials(settings.account.as_str(), settings.password.as_str())
}

/// The `From` address: configured display name plus account address.
pub fn sender(settings: &MailSettings) -> Result<Address> {
    Address::with_name(settings.account.as_str(), settings.display_name.as_str())
}

/// A [`Composer`] that sends through the configured relay.
pub fn smtp_composer(settings: &MailSettings) -> Result<Composer> {
    let transport = SmtpTransport::new(smtp_config(settings))?;
    Ok(Composer::new(sender(settings)?, transport))
}
