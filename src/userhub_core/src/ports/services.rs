use async_trait::async_trait;
use thiserror::Error;

use crate::domain::email::EmailAddress;

// Mailer port trait and errors
#[derive(Debug, Error)]
pub enum MailerError {
    #[error("something went wrong")]
    DeliveryFailed,
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

/// Outbound mail delivery. The only message this system sends is the
/// password-reset mail carrying the reset token inside a link.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send_password_reset(
        &self,
        recipient: &EmailAddress,
        token: &str,
    ) -> Result<(), MailerError>;
}

// EmailVerifier port trait and errors
#[derive(Debug, Error)]
pub enum EmailVerifierError {
    #[error("undeliverable email")]
    Undeliverable,
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

/// Third-party deliverability check, consulted during registration when
/// configured. An account is only persisted once its email passes.
#[async_trait]
pub trait EmailVerifier: Send + Sync {
    async fn check_deliverability(&self, email: &EmailAddress) -> Result<(), EmailVerifierError>;
}
