//! SMTP delivery via lettre.

use async_trait::async_trait;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::debug;

use crate::error::NotificationError;
use crate::mailer::{MailMessage, Mailer};

/// SMTP relay configuration.
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    /// From address for all outbound mail.
    pub from: String,
}

/// Mailer backed by an SMTP relay.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    /// Builds the transport from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the relay host or from address is invalid.
    pub fn new(config: &SmtpConfig) -> Result<Self, NotificationError> {
        let from: Mailbox = config
            .from
            .parse()
            .map_err(|e| NotificationError::invalid_message(format!("from address: {e}")))?;

        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
            .map_err(|e| NotificationError::transport(e.to_string()))?
            .port(config.port);

        if let (Some(user), Some(pass)) = (&config.username, &config.password) {
            builder = builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        Ok(Self {
            transport: builder.build(),
            from,
        })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, message: MailMessage) -> Result<(), NotificationError> {
        let to: Mailbox = message
            .to
            .parse()
            .map_err(|e| NotificationError::invalid_message(format!("to address: {e}")))?;

        let email = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(message.subject.as_str())
            .body(message.body)
            .map_err(|e| NotificationError::invalid_message(e.to_string()))?;

        self.transport
            .send(email)
            .await
            .map_err(|e| NotificationError::transport(e.to_string()))?;

        debug!(to = %message.to, subject = %message.subject, "Mail delivered");
        Ok(())
    }
}
