//! Outbound email seam
//!
//! Delivery transports (SMTP, provider APIs) plug in behind [`Mailer`].
//! [`LogMailer`] only records the message with `tracing`, which is what
//! development and test environments run with.

use thiserror::Error;

/// 送信するメール
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html: String,
    pub text: String,
}

#[derive(Debug, Error)]
pub enum MailError {
    #[error("Email transport failed: {0}")]
    Transport(String),
}

#[trait_variant::make(Mailer: Send)]
pub trait LocalMailer {
    async fn send(&self, message: EmailMessage) -> Result<(), MailError>;
}

/// Mailer that logs instead of delivering
#[derive(Debug, Clone, Default)]
pub struct LogMailer;

impl Mailer for LogMailer {
    async fn send(&self, message: EmailMessage) -> Result<(), MailError> {
        tracing::info!(
            to = %message.to,
            subject = %message.subject,
            body = %message.text,
            "Email not delivered (log transport)"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{EmailMessage, LogMailer, Mailer};

    #[tokio::test]
    async fn test_log_mailer_accepts_messages() {
        let message = EmailMessage {
            from: "no-reply@localhost".into(),
            to: "seller@example.com".into(),
            subject: "Verifique seu email".into(),
            html: "<p>ok</p>".into(),
            text: "ok".into(),
        };
        assert!(LogMailer.send(message).await.is_ok());
    }
}
