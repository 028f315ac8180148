use userhub_core::{
    EmailAddress, Mailer, MailerError, TokenError, TokenIdentity, TokenKind, TokenService,
    UserStore, UserStoreError,
};

#[derive(Debug, thiserror::Error)]
pub enum ForgotPasswordError {
    #[error("user not found")]
    UserNotFound,
    #[error(transparent)]
    Store(#[from] UserStoreError),
    #[error(transparent)]
    Token(#[from] TokenError),
    #[error(transparent)]
    Mailer(#[from] MailerError),
}

/// Forgot-password use case - issues a short-lived reset token and mails it
///
/// The token carries the `reset` flag, so it only passes the reset gate and
/// never doubles as a session.
pub struct ForgotPasswordUseCase<'a, S, T, M>
where
    S: UserStore + ?Sized,
    T: TokenService + ?Sized,
    M: Mailer + ?Sized,
{
    store: &'a S,
    tokens: &'a T,
    mailer: &'a M,
}

impl<'a, S, T, M> ForgotPasswordUseCase<'a, S, T, M>
where
    S: UserStore + ?Sized,
    T: TokenService + ?Sized,
    M: Mailer + ?Sized,
{
    pub fn new(store: &'a S, tokens: &'a T, mailer: &'a M) -> Self {
        Self { store, tokens, mailer }
    }

    #[tracing::instrument(name = "ForgotPasswordUseCase::execute", skip_all)]
    pub async fn execute(&self, email: &EmailAddress) -> Result<(), ForgotPasswordError> {
        let user = self
            .store
            .find_by_email(email)
            .await?
            .ok_or(ForgotPasswordError::UserNotFound)?;

        let identity = TokenIdentity {
            username: user.username().clone(),
            status: user.status(),
        };
        let token = self.tokens.issue(&identity, TokenKind::PasswordReset)?;

        self.mailer.send_password_reset(email, &token).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use userhub_core::User;

    use super::*;
    use crate::use_cases::support::{
        MockHasher, MockUserStore, RecordingMailer, RecordingTokenService, email, username,
    };

    async fn store_with_account() -> MockUserStore {
        let store = MockUserStore::default();
        store
            .seed(User::new(
                username("alice"),
                Some(email("a@x.com")),
                MockHasher::stored_hash("secret1"),
            ))
            .await;
        store
    }

    #[tokio::test]
    async fn mails_exactly_one_reset_token_to_the_account_address() {
        let store = store_with_account().await;
        let tokens = RecordingTokenService::default();
        let mailer = RecordingMailer::default();
        let use_case = ForgotPasswordUseCase::new(&store, &tokens, &mailer);

        use_case.execute(&email("a@x.com")).await.unwrap();

        let issued = tokens.issued.lock().unwrap();
        assert_eq!(issued.len(), 1);
        assert_eq!(issued[0].1, TokenKind::PasswordReset);

        let sent = mailer.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, email("a@x.com"));
        assert_eq!(sent[0].1, "signed-token-for-alice");
    }

    #[tokio::test]
    async fn an_unknown_address_is_not_found_and_nothing_is_sent() {
        let store = MockUserStore::default();
        let tokens = RecordingTokenService::default();
        let mailer = RecordingMailer::default();
        let use_case = ForgotPasswordUseCase::new(&store, &tokens, &mailer);

        let result = use_case.execute(&email("ghost@x.com")).await;

        assert!(matches!(result, Err(ForgotPasswordError::UserNotFound)));
        assert!(mailer.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn a_delivery_failure_surfaces_as_a_mailer_error() {
        let store = store_with_account().await;
        let tokens = RecordingTokenService::default();
        let mailer = RecordingMailer { fail: true, ..Default::default() };
        let use_case = ForgotPasswordUseCase::new(&store, &tokens, &mailer);

        let result = use_case.execute(&email("a@x.com")).await;

        assert!(matches!(
            result,
            Err(ForgotPasswordError::Mailer(MailerError::DeliveryFailed))
        ));
    }
}
