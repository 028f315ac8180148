use userhub_core::{
    AccountStatus, CredentialHasher, EmailAddress, HasherError, Password, TokenError,
    TokenIdentity, TokenKind, TokenService, UserStore, UserStoreError, Username,
};

/// Request to turn a test account into a valid one by attaching an email.
#[derive(Debug)]
pub struct AccountPromotion {
    pub username: Username,
    pub password: Password,
    pub email: Option<EmailAddress>,
}

#[derive(Debug, thiserror::Error)]
pub enum PromoteAccountError {
    #[error("user not found")]
    UserNotFound,
    #[error("invalid email or invalid account type")]
    InvalidPromotion,
    #[error(transparent)]
    Store(#[from] UserStoreError),
    #[error(transparent)]
    Hasher(#[from] HasherError),
    #[error(transparent)]
    Token(#[from] TokenError),
}

/// Promotion use case - the only way a test account gains an email
///
/// Requires an email in the payload and a current status of test; valid
/// accounts change their email through the edit use case instead.
pub struct PromoteAccountUseCase<'a, S, H, T>
where
    S: UserStore + ?Sized,
    H: CredentialHasher + ?Sized,
    T: TokenService + ?Sized,
{
    store: &'a S,
    hasher: &'a H,
    tokens: &'a T,
}

impl<'a, S, H, T> PromoteAccountUseCase<'a, S, H, T>
where
    S: UserStore + ?Sized,
    H: CredentialHasher + ?Sized,
    T: TokenService + ?Sized,
{
    pub fn new(store: &'a S, hasher: &'a H, tokens: &'a T) -> Self {
        Self { store, hasher, tokens }
    }

    #[tracing::instrument(name = "PromoteAccountUseCase::execute", skip_all)]
    pub async fn execute(&self, promotion: AccountPromotion) -> Result<String, PromoteAccountError> {
        let user = self
            .store
            .find_by_username(&promotion.username)
            .await?
            .ok_or(PromoteAccountError::UserNotFound)?;

        self.hasher
            .verify(promotion.password, user.password_hash().clone())
            .await?;

        let Some(email) = promotion.email else {
            return Err(PromoteAccountError::InvalidPromotion);
        };
        if user.status() != AccountStatus::Test {
            return Err(PromoteAccountError::InvalidPromotion);
        }

        self.store
            .promote_test_account(&promotion.username, &email)
            .await?;

        let identity = TokenIdentity {
            username: promotion.username,
            status: AccountStatus::Valid,
        };
        Ok(self.tokens.issue(&identity, TokenKind::Session)?)
    }
}
