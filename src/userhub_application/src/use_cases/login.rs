use chrono::Utc;
use userhub_core::{
    CredentialHasher, EmailAddress, HasherError, Password, TokenError, TokenIdentity, TokenKind,
    TokenService, UserStore, UserStoreError, Username,
};

/// Credentials as submitted. Either identifier may be present; when both are,
/// the email lookup runs last and wins.
#[derive(Debug)]
pub struct LoginCredentials {
    pub username: Option<Username>,
    pub email: Option<EmailAddress>,
    pub password: Password,
}

#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    #[error("user not found")]
    UserNotFound,
    #[error("test account already deleted")]
    TestAccountExpired,
    #[error(transparent)]
    Store(#[from] UserStoreError),
    #[error(transparent)]
    Hasher(#[from] HasherError),
    #[error(transparent)]
    Token(#[from] TokenError),
}

/// Login use case - authenticates stored credentials and issues a session token
pub struct LoginUseCase<'a, S, H, T>
where
    S: UserStore + ?Sized,
    H: CredentialHasher + ?Sized,
    T: TokenService + ?Sized,
{
    store: &'a S,
    hasher: &'a H,
    tokens: &'a T,
}

impl<'a, S, H, T> LoginUseCase<'a, S, H, T>
where
    S: UserStore + ?Sized,
    H: CredentialHasher + ?Sized,
    T: TokenService + ?Sized,
{
    pub fn new(store: &'a S, hasher: &'a H, tokens: &'a T) -> Self {
        Self { store, hasher, tokens }
    }

    /// Execute the login use case
    ///
    /// Resolves the account, verifies the password, purges an expired test
    /// account before any token leaves the system, and otherwise issues a
    /// session token for `{username, status}`.
    #[tracing::instrument(name = "LoginUseCase::execute", skip_all)]
    pub async fn execute(&self, credentials: LoginCredentials) -> Result<String, LoginError> {
        let mut user = None;
        if let Some(username) = &credentials.username {
            user = self.store.find_by_username(username).await?;
        }
        if let Some(email) = &credentials.email {
            user = self.store.find_by_email(email).await?;
        }
        let user = user.ok_or(LoginError::UserNotFound)?;

        self.hasher
            .verify(credentials.password, user.password_hash().clone())
            .await?;

        if user.is_expired(Utc::now()) {
            self.store.delete_user(user.username()).await?;
            return Err(LoginError::TestAccountExpired);
        }

        let identity = TokenIdentity {
            username: user.username().clone(),
            status: user.status(),
        };
        Ok(self.tokens.issue(&identity, TokenKind::Session)?)
    }
}
