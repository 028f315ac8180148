use userhub_core::{
    CredentialHasher, HasherError, Password, UserStore, UserStoreError, Username,
};

/// New credential for an account that already proved ownership through the
/// reset-token gate. No current-password check by design.
#[derive(Debug)]
pub struct PasswordResetData {
    pub username: Username,
    pub password: Password,
}

#[derive(Debug, thiserror::Error)]
pub enum ResetPasswordError {
    #[error(transparent)]
    Store(#[from] UserStoreError),
    #[error(transparent)]
    Hasher(#[from] HasherError),
}

/// Reset use case - re-hashes and persists the replacement password
pub struct ResetPasswordUseCase<'a, S, H>
where
    S: UserStore + ?Sized,
    H: CredentialHasher + ?Sized,
{
    store: &'a S,
    hasher: &'a H,
}

impl<'a, S, H> ResetPasswordUseCase<'a, S, H>
where
    S: UserStore + ?Sized,
    H: CredentialHasher + ?Sized,
{
    pub fn new(store: &'a S, hasher: &'a H) -> Self {
        Self { store, hasher }
    }

    #[tracing::instrument(name = "ResetPasswordUseCase::execute", skip_all)]
    pub async fn execute(&self, reset: PasswordResetData) -> Result<(), ResetPasswordError> {
        let password_hash = self.hasher.hash(reset.password).await?;
        self.store
            .update_password(&reset.username, password_hash)
            .await?;
        Ok(())
    }
}
