//! Email transport implementations.

use async_trait::async_trait;
use lettre::{
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Tokio1Executor,
};
use std::time::Duration;
use tracing::{debug, info};

use crate::{Envelope, Result};

/// Email transport trait.
///
/// A transport delivers one envelope per call and reports the outcome; it
/// does not retry.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send an envelope.
    async fn send(&self, envelope: &Envelope) -> Result<()>;
}

/// SMTP security mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SmtpSecurity {
    /// No encryption (port 25, not recommended).
    None,
    /// STARTTLS upgrade (port 587).
    #[default]
    StartTls,
    /// Implicit TLS (port 465).
    Tls,
}

/// SMTP configuration.
#[derive(Clone)]
pub struct SmtpConfig {
    /// SMTP server host.
    pub host: String,
    /// SMTP server port.
    pub port: u16,
    /// Security mode.
    pub security: SmtpSecurity,
    /// Username for authentication.
    pub username: Option<String>,
    /// Password for authentication.
    pub password: Option<String>,
    /// Connection timeout.
    pub timeout: Duration,
}

impl SmtpConfig {
    /// Create a new SMTP configuration.
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: 587,
            security: SmtpSecurity::StartTls,
            username: None,
            password: None,
            timeout: Duration::from_secs(30),
        }
    }

    /// Set credentials.
    pub fn credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Set the port.
    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Use STARTTLS security (port 587).
    pub fn starttls(mut self) -> Self {
        self.security = SmtpSecurity::StartTls;
        self.port = 587;
        self
    }

    /// Use implicit TLS security (port 465).
    pub fn tls(mut self) -> Self {
        self.security = SmtpSecurity::Tls;
        self.port = 465;
        self
    }

    /// Use no encryption (not recommended).
    pub fn insecure(mut self) -> Self {
        self.security = SmtpSecurity::None;
        self.port = 25;
        self
    }

    /// Set the connection timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl std::fmt::Debug for SmtpConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("security", &self.security)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// SMTP transport.
pub struct SmtpTransport {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    config: SmtpConfig,
}

impl SmtpTransport {
    /// Create a new SMTP transport.
    ///
    /// No connection is opened until the first send.
    pub fn new(config: SmtpConfig) -> Result<Self> {
        let mut builder = match config.security {
            SmtpSecurity::None => {
                AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host)
            }
            SmtpSecurity::StartTls => {
                AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)?
            }
            SmtpSecurity::Tls => {
                AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)?
            }
        };

        builder = builder
            .port(config.port)
            .timeout(Some(config.timeout));

        if let (Some(username), Some(password)) = (&config.username, &config.password) {
            builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
        }

        let transport = builder.build();

        info!(
            host = %config.host,
            port = config.port,
            security = ?config.security,
            "SMTP transport initialized"
        );

        Ok(Self { transport, config })
    }

    /// Get the configuration.
    pub fn config(&self) -> &SmtpConfig {
        &self.config
    }
}

#[async_trait]
impl Transport for SmtpTransport {
    async fn send(&self, envelope: &Envelope) -> Result<()> {
        let message = envelope.to_lettre()?;

        debug!(
            host = %self.config.host,
            recipients = envelope.recipients().count(),
            subject = %envelope.subject,
            "Sending email via SMTP"
        );

        let response = self.transport.send(message).await?;

        debug!(code = %response.code(), "SMTP relay accepted message");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smtp_config_builder() {
        let config = SmtpConfig::new("smtp.example.com")
            .starttls()
            .credentials("user", "pass");

        assert_eq!(config.host, "smtp.example.com");
        assert_eq!(config.port, 587);
        assert_eq!(config.security, SmtpSecurity::StartTls);
        assert_eq!(config.username.as_deref(), Some("user"));
    }

    #[test]
    fn test_security_sets_port() {
        assert_eq!(SmtpConfig::new("h").tls().port, 465);
        assert_eq!(SmtpConfig::new("h").insecure().port, 25);
        assert_eq!(SmtpConfig::new("h").tls().port(2465).port, 2465);
    }

    #[test]
    fn test_debug_masks_password() {
        let config = SmtpConfig::new("smtp.example.com").credentials("user", "hunter2");
        let printed = format!("{:?}", config);

        assert!(!printed.contains("hunter2"));
        assert!(printed.contains("***"));
    }

    #[tokio::test]
    async fn test_transport_builds_without_connecting() {
        let transport = SmtpTransport::new(
            SmtpConfig::new("smtp.example.com").credentials("user", "pass"),
        )
        .unwrap();

        assert_eq!(transport.config().port, 587);
    }

    #[test]
    fn test_default_security_is_starttls() {
        assert_eq!(SmtpSecurity::default(), SmtpSecurity::StartTls);
    }

    #[tokio::test]
    async fn test_refused_connection_is_delivery_error() {
        let transport = SmtpTransport::new(
            SmtpConfig::new("127.0.0.1")
                .insecure()
                .port(1)
                .timeout(Duration::from_secs(5)),
        )
        .unwrap();
        let envelope = Envelope::new(crate::Address::new("noreply@example.com").unwrap())
            .to(crate::Address::new("jane@example.com").unwrap())
            .subject("Welcome")
            .text("Hello")
            .html("<p>Hello</p>");

        let err = transport.send(&envelope).await.unwrap_err();
        assert!(matches!(err, crate::MailError::Delivery(_)));
    }

    #[tokio::test]
    async fn test_envelope_without_recipients_is_rejected_before_connecting() {
        let transport = SmtpTransport::new(SmtpConfig::new("127.0.0.1").insecure().port(1)).unwrap();
        let envelope = Envelope::new(crate::Address::new("noreply@example.com").unwrap());

        let err = transport.send(&envelope).await.unwrap_err();
        assert!(matches!(err, crate::MailError::MissingField("to/cc/bcc")));
    }
}
