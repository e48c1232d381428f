//! Outbound notification capability for meeplelog.
//!
//! The auth layer hands recovery links to a [`Mailer`] fire-and-forget;
//! delivery failures are logged by the caller, never propagated to the
//! requesting user.

pub mod error;
pub mod mailer;
pub mod messages;
pub mod smtp;

pub use error::NotificationError;
pub use mailer::{LogMailer, MailMessage, Mailer};
pub use smtp::{SmtpConfig, SmtpMailer};
