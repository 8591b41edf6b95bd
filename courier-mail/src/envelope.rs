//! The assembled message handed to a transport.

use serde::{Deserialize, Serialize};
use crate::{Address, Attachment, MailError, Result};

/// Email envelope: sender, recipients, bodies and attachments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    /// Sender address.
    pub from: Address,
    /// To recipients.
    pub to: Vec<Address>,
    /// CC recipients.
    pub cc: Vec<Address>,
    /// BCC recipients.
    pub bcc: Vec<Address>,
    /// Email subject.
    pub subject: String,
    /// Plain text body.
    pub text: String,
    /// HTML body.
    pub html: String,
    /// Attachments, in the order they were added.
    pub attachments: Vec<Attachment>,
}

impl Envelope {
    /// Create an envelope with no recipients or content.
    pub fn new(from: Address) -> Self {
        Self {
            from,
            to: Vec::new(),
            cc: Vec::new(),
            bcc: Vec::new(),
            subject: String::new(),
            text: String::new(),
            html: String::new(),
            attachments: Vec::new(),
        }
    }

    /// Add a to recipient.
    pub fn to(mut self, to: Address) -> Self {
        self.to.push(to);
        self
    }

    /// Add a CC recipient.
    pub fn cc(mut self, cc: Address) -> Self {
        self.cc.push(cc);
        self
    }

    /// Add a BCC recipient.
    pub fn bcc(mut self, bcc: Address) -> Self {
        self.bcc.push(bcc);
        self
    }

    /// Set the subject.
    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = subject.into();
        self
    }

    /// Set the plain text body.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Set the HTML body.
    pub fn html(mut self, html: impl Into<String>) -> Self {
        self.html = html.into();
        self
    }

    /// Add an attachment.
    pub fn attach(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }

    /// Whether at least one primary (`To`) recipient is set.
    ///
    /// Callers are expected to supply one; an envelope that only has CC or
    /// BCC recipients can still be delivered.
    pub fn has_primary_recipient(&self) -> bool {
        !self.to.is_empty()
    }

    /// Every recipient across To, CC and BCC.
    pub fn recipients(&self) -> impl Iterator<Item = &Address> {
        self.to.iter().chain(&self.cc).chain(&self.bcc)
    }

    /// Validate the envelope: at least one recipient is required.
    pub fn validate(&self) -> Result<()> {
        if self.recipients().next().is_none() {
            return Err(MailError::MissingField("to/cc/bcc"));
        }
        Ok(())
    }

    /// Build a lettre message.
    pub(crate) fn to_lettre(&self) -> Result<lettre::Message> {
        use lettre::message::{header::ContentType, MultiPart};

        self.validate()?;

        let mut builder = lettre::Message::builder()
            .from(self.from.to_mailbox()?)
            .subject(self.subject.as_str());

        for addr in &self.to {
            builder = builder.to(addr.to_mailbox()?);
        }
        for addr in &self.cc {
            builder = builder.cc(addr.to_mailbox()?);
        }
        for addr in &self.bcc {
            builder = builder.bcc(addr.to_mailbox()?);
        }

        let body = MultiPart::alternative_plain_html(self.text.clone(), self.html.clone());

        let body = if self.attachments.is_empty() {
            body
        } else {
            let mut mixed = MultiPart::mixed().multipart(body);
            for attachment in &self.attachments {
                let content_type = ContentType::parse(&attachment.content_type)
                    .map_err(|e| MailError::Delivery(format!(
                        "invalid content type for {}: {}",
                        attachment.filename, e
                    )))?;

                mixed = mixed.singlepart(
                    lettre::message::Attachment::new(attachment.filename.clone())
                        .body(attachment.data.clone(), content_type),
                );
            }
            mixed
        };

        Ok(builder.multipart(body)?)
    }
}
