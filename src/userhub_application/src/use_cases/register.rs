use userhub_core::{
    CredentialHasher, EmailAddress, EmailVerifier, EmailVerifierError, HasherError, Password,
    TokenError, TokenIdentity, TokenKind, TokenService, User, UserStore, UserStoreError, Username,
};

/// Registration payload. An email makes the account a valid one; leaving it
/// out creates a 30-day test account.
#[derive(Debug)]
pub struct NewAccount {
    pub username: Username,
    pub email: Option<EmailAddress>,
    pub password: Password,
}

#[derive(Debug, thiserror::Error)]
pub enum RegisterError {
    #[error(transparent)]
    Store(#[from] UserStoreError),
    #[error(transparent)]
    Hasher(#[from] HasherError),
    #[error(transparent)]
    Token(#[from] TokenError),
    #[error(transparent)]
    Verifier(#[from] EmailVerifierError),
}

/// Registration use case - persists a new account and issues its first token
pub struct RegisterUseCase<'a, S, H, T, V>
where
    S: UserStore + ?Sized,
    H: CredentialHasher + ?Sized,
    T: TokenService + ?Sized,
    V: EmailVerifier + ?Sized,
{
    store: &'a S,
    hasher: &'a H,
    tokens: &'a T,
    email_verifier: Option<&'a V>,
}

impl<'a, S, H, T, V> RegisterUseCase<'a, S, H, T, V>
where
    S: UserStore + ?Sized,
    H: CredentialHasher + ?Sized,
    T: TokenService + ?Sized,
    V: EmailVerifier + ?Sized,
{
    pub fn new(
        store: &'a S,
        hasher: &'a H,
        tokens: &'a T,
        email_verifier: Option<&'a V>,
    ) -> Self {
        Self { store, hasher, tokens, email_verifier }
    }

    /// Execute the registration use case
    ///
    /// When a deliverability checker is configured, the email must pass it
    /// before anything is persisted.
    #[tracing::instrument(name = "RegisterUseCase::execute", skip_all)]
    pub async fn execute(&self, account: NewAccount) -> Result<String, RegisterError> {
        let password_hash = self.hasher.hash(account.password).await?;

        if let (Some(verifier), Some(email)) = (self.email_verifier, &account.email) {
            verifier.check_deliverability(email).await?;
        }

        let user = User::new(account.username, account.email, password_hash);
        let identity = TokenIdentity {
            username: user.username().clone(),
            status: user.status(),
        };

        self.store.create_user(user).await?;

        Ok(self.tokens.issue(&identity, TokenKind::Registration)?)
    }
}
