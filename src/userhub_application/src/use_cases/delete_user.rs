use userhub_core::{
    CredentialHasher, HasherError, Password, UserStore, UserStoreError, Username,
};

#[derive(Debug)]
pub struct AccountDeletion {
    pub username: Username,
    pub password: Password,
}

#[derive(Debug, thiserror::Error)]
pub enum DeleteUserError {
    #[error("user not found")]
    UserNotFound,
    #[error(transparent)]
    Store(#[from] UserStoreError),
    #[error(transparent)]
    Hasher(#[from] HasherError),
}

/// Deletion use case - re-authenticates, then removes the account
pub struct DeleteUserUseCase<'a, S, H>
where
    S: UserStore + ?Sized,
    H: CredentialHasher + ?Sized,
{
    store: &'a S,
    hasher: &'a H,
}

impl<'a, S, H> DeleteUserUseCase<'a, S, H>
where
    S: UserStore + ?Sized,
    H: CredentialHasher + ?Sized,
{
    pub fn new(store: &'a S, hasher: &'a H) -> Self {
        Self { store, hasher }
    }

    #[tracing::instrument(name = "DeleteUserUseCase::execute", skip_all)]
    pub async fn execute(&self, deletion: AccountDeletion) -> Result<(), DeleteUserError> {
        let user = self
            .store
            .find_by_username(&deletion.username)
            .await?
            .ok_or(DeleteUserError::UserNotFound)?;

        self.hasher
            .verify(deletion.password, user.password_hash().clone())
            .await?;

        self.store.delete_user(&deletion.username).await?;
        Ok(())
    }
}
