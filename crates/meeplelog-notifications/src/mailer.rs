//! The mailer capability and its tracing-only adapter.

use async_trait::async_trait;
use tracing::info;

use crate::error::NotificationError;

/// A rendered email ready for delivery.
#[derive(Debug, Clone)]
pub struct MailMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Delivery capability for outbound mail.
///
/// Implementations must be safe to call concurrently; callers treat
/// delivery as fire-and-forget and only log failures.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Delivers a single message.
    ///
    /// # Errors
    ///
    /// Returns an error if the message cannot be handed to the transport.
    async fn send(&self, message: MailMessage) -> Result<(), NotificationError>;
}

/// Mailer that only logs, for development and tests.
///
/// The body is logged at info level so recovery links are usable from the
/// console when no SMTP relay is configured.
#[derive(Debug, Default)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, message: MailMessage) -> Result<(), NotificationError> {
        info!(
            to = %message.to,
            subject = %message.subject,
            body = %message.body,
            "Mail delivery skipped (log mailer)"
        );
        Ok(())
    }
}
