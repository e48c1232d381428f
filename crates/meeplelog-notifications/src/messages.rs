//! Message builders for the account recovery mails.

use crate::mailer::MailMessage;

/// Builds the password-reset mail carrying the single-use confirm link.
pub fn password_reset(to: &str, user_name: &str, token: &str, base_url: &str) -> MailMessage {
    let link = format!(
        "{}/api/v1/users/reset-password/confirm?token={token}",
        base_url.trim_end_matches('/')
    );
    MailMessage {
        to: to.to_string(),
        subject: "meeplelog password reset".to_string(),
        body: format!(
            "Hello {user_name},\n\n\
             A password reset was requested for your account. Open the link\n\
             below within 30 minutes to choose a new password:\n\n\
             {link}\n\n\
             If you did not request this, you can ignore this mail."
        ),
    }
}

/// Builds the account-restore mail for a soft-deleted account.
pub fn account_restore(to: &str, user_name: &str, token: &str, base_url: &str) -> MailMessage {
    let link = format!(
        "{}/api/v1/users/restore/confirm?token={token}",
        base_url.trim_end_matches('/')
    );
    MailMessage {
        to: to.to_string(),
        subject: "meeplelog account restore".to_string(),
        body: format!(
            "Hello {user_name},\n\n\
             Your account is scheduled for deletion. Open the link below\n\
             within 30 minutes to restore it:\n\n\
             {link}"
        ),
    }
}
