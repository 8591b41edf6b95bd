//! Render, compose and dispatch a templated email.

use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::{
    strip_markup, Address, Attachment, Envelope, HandlebarsEngine, MailError, Result,
    TemplateEngine, TemplatePair, Transport,
};

/// A request to send one templated email.
#[derive(Debug, Clone)]
pub struct OutgoingMail {
    /// Subject line.
    pub subject: String,
    /// Layout and content templates.
    pub templates: TemplatePair,
    /// Primary recipients. Callers must supply at least one.
    pub to: Vec<String>,
    /// CC recipients.
    pub cc: Vec<String>,
    /// BCC recipients.
    pub bcc: Vec<String>,
    /// Files read and attached at send time, in order.
    pub attachments: Vec<PathBuf>,
}

impl OutgoingMail {
    /// Create a request with no recipients or attachments.
    pub fn new(subject: impl Into<String>, templates: TemplatePair) -> Self {
        Self {
            subject: subject.into(),
            templates,
            to: Vec::new(),
            cc: Vec::new(),
            bcc: Vec::new(),
            attachments: Vec::new(),
        }
    }

    /// Add a to recipient.
    pub fn to(mut self, to: impl Into<String>) -> Self {
        self.to.push(to.into());
        self
    }

    /// Add multiple to recipients.
    pub fn to_many<I, S>(mut self, recipients: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.to.extend(recipients.into_iter().map(Into::into));
        self
    }

    /// Add a CC recipient.
    pub fn cc(mut self, cc: impl Into<String>) -> Self {
        self.cc.push(cc.into());
        self
    }

    /// Add a BCC recipient.
    pub fn bcc(mut self, bcc: impl Into<String>) -> Self {
        self.bcc.push(bcc.into());
        self
    }

    /// Attach the file at `path`.
    pub fn attach(mut self, path: impl Into<PathBuf>) -> Self {
        self.attachments.push(path.into());
        self
    }
}

/// Turns [`OutgoingMail`] requests into envelopes and hands them to a
/// transport.
///
/// Each send runs render → strip → compose → attach → dispatch in order and
/// stops at the first failure. Nothing is retried.
pub struct Composer {
    sender: Address,
    transport: Arc<dyn Transport>,
    templates: Arc<dyn TemplateEngine>,
}

impl Composer {
    /// Create a composer sending as `sender` through `transport`, rendering
    /// with a default [`HandlebarsEngine`].
    pub fn new(sender: Address, transport: impl Transport + 'static) -> Self {
        Self::with_shared_transport(sender, Arc::new(transport))
    }

    /// Create a composer around a transport that is shared elsewhere.
    pub fn with_shared_transport(sender: Address, transport: Arc<dyn Transport>) -> Self {
        Self {
            sender,
            transport,
            templates: Arc::new(HandlebarsEngine::new()),
        }
    }

    /// Set a template engine.
    pub fn with_template_engine(mut self, engine: impl TemplateEngine + 'static) -> Self {
        self.templates = Arc::new(engine);
        self
    }

    /// The `From` address used for every envelope.
    pub fn sender(&self) -> &Address {
        &self.sender
    }

    /// Build the envelope for `mail` without sending it.
    pub fn compose<C>(&self, mail: &OutgoingMail, context: &C) -> Result<Envelope>
    where
        C: Serialize + ?Sized,
    {
        let context = serde_json::to_value(context)?;
        let html = self.templates.render(&mail.templates, &context)?;
        let text = strip_markup(&html);
        debug!(
            content = %mail.templates.content.display(),
            html_len = html.len(),
            text_len = text.len(),
            "Rendered email body"
        );

        let mut envelope = Envelope::new(self.sender.clone())
            .subject(mail.subject.as_str())
            .text(text)
            .html(html);
        envelope.to = parse_all(&mail.to)?;
        if !mail.cc.is_empty() {
            envelope.cc = parse_all(&mail.cc)?;
        }
        if !mail.bcc.is_empty() {
            envelope.bcc = parse_all(&mail.bcc)?;
        }

        if !envelope.has_primary_recipient() {
            warn!(subject = %mail.subject, "Composing email without a primary recipient");
        }

        for path in &mail.attachments {
            let attachment = Attachment::from_file(path)?;
            debug!(
                filename = %attachment.filename,
                size = attachment.size(),
                "Attached file"
            );
            envelope = envelope.attach(attachment);
        }

        Ok(envelope)
    }

    /// Render, compose and deliver `mail` once.
    pub async fn send<C>(&self, mail: &OutgoingMail, context: &C) -> Result<()>
    where
        C: Serialize + ?Sized,
    {
        let envelope = self.compose(mail, context)?;

        self.transport
            .send(&envelope)
            .await
            .map_err(|e| match e {
                MailError::Delivery(_) => e,
                other => MailError::Delivery(other.to_string()),
            })?;

        info!(to = ?mail.to, "Successfully sent email");
        Ok(())
    }
}

fn parse_all(addresses: &[String]) -> Result<Vec<Address>> {
    addresses.iter().map(|a| Address::parse(a)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingTransport {
        sent: Mutex<Vec<Envelope>>,
    }

    #[async_trait]
    impl Transport for RecordingTransport {
        async fn send(&self, envelope: &Envelope) -> Result<()> {
            self.sent.lock().unwrap().push(envelope.clone());
            Ok(())
        }
    }

    struct StaticEngine(&'static str);

    impl TemplateEngine for StaticEngine {
        fn render(&self, _: &TemplatePair, _: &serde_json::Value) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    fn composer(transport: Arc<RecordingTransport>) -> Composer {
        Composer::with_shared_transport(
            Address::with_name("noreply@example.com", "FundusAI Inc").unwrap(),
            transport,
        )
        .with_template_engine(StaticEngine("<p>Hello, Jane!</p>"))
    }

    fn welcome() -> OutgoingMail {
        OutgoingMail::new("Welcome", TemplatePair::with_default_layout("welcome.hbs"))
    }

    #[test]
    fn test_compose_strips_html_into_text() {
        let composer = composer(Arc::default());
        let envelope = composer
            .compose(&welcome().to("jane@example.com"), &json!({}))
            .unwrap();

        assert_eq!(envelope.html, "<p>Hello, Jane!</p>");
        assert_eq!(envelope.text, "Hello, Jane!");
        assert_eq!(envelope.from.to_string(), "FundusAI Inc <noreply@example.com>");
        assert!(envelope.cc.is_empty());
        assert!(envelope.bcc.is_empty());
    }

    #[test]
    fn test_cc_and_bcc_without_primary() {
        let composer = composer(Arc::default());
        let mail = welcome().cc("boss@example.com").bcc("audit@example.com");

        let envelope = composer.compose(&mail, &json!({})).unwrap();

        assert!(!envelope.has_primary_recipient());
        assert_eq!(envelope.cc[0].email, "boss@example.com");
        assert_eq!(envelope.bcc[0].email, "audit@example.com");
    }

    #[test]
    fn test_invalid_recipient() {
        let composer = composer(Arc::default());
        let err = composer
            .compose(&welcome().to("not-an-address"), &json!({}))
            .unwrap_err();

        assert!(matches!(err, MailError::InvalidAddress(_)));
    }

    #[tokio::test]
    async fn test_send_dispatches_once() {
        let transport = Arc::new(RecordingTransport::default());
        let composer = composer(transport.clone());

        composer
            .send(&welcome().to_many(["jane@example.com", "john@example.com"]), &json!({}))
            .await
            .unwrap();

        let sent = transport.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to.len(), 2);
        assert_eq!(sent[0].subject, "Welcome");
    }
}
