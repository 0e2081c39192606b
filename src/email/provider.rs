//! Mailer trait and error types

use async_trait::async_trait;
use thiserror::Error;

/// Mail transport error types
#[derive(Error, Debug)]
pub enum MailerError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Send failed: {0}")]
    SendFailed(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Trait for outbound mail transports.
///
/// A send failure is a business outcome, not an application error:
/// callers record it in the email log and still answer successfully.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Send one message to the given recipients
    async fn send(
        &self,
        recipients: &[String],
        subject: &str,
        body: &str,
    ) -> Result<(), MailerError>;
}
