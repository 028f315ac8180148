use std::sync::{Arc, Mutex};

use userhub_core::{EmailAddress, Mailer, MailerError};

/// Records deliveries instead of sending anything. Tests use it to assert how
/// often the reset mail went out and which token it carried.
#[derive(Debug, Clone, Default)]
pub struct MockEmailClient {
    sent: Arc<Mutex<Vec<SentReset>>>,
}

#[derive(Debug, Clone)]
pub struct SentReset {
    pub recipient: EmailAddress,
    pub token: String,
}

impl MockEmailClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<SentReset> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl Mailer for MockEmailClient {
    async fn send_password_reset(
        &self,
        recipient: &EmailAddress,
        token: &str,
    ) -> Result<(), MailerError> {
        self.sent.lock().unwrap().push(SentReset {
            recipient: recipient.clone(),
            token: token.to_owned(),
        });
        Ok(())
    }
}
