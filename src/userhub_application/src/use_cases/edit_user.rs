use userhub_core::{
    AccountStatus, CredentialHasher, EmailAddress, HasherError, Password, UserStore,
    UserStoreError, Username,
};

/// Field updates for an existing account. The current password re-authenticates
/// the caller; either or both of the updates may be present.
#[derive(Debug)]
pub struct AccountEdit {
    pub username: Username,
    pub password: Password,
    pub email: Option<EmailAddress>,
    pub new_password: Option<Password>,
}

#[derive(Debug, thiserror::Error)]
pub enum EditUserError {
    #[error("user not found")]
    UserNotFound,
    #[error("invalid account type")]
    InvalidAccountType,
    #[error(transparent)]
    Store(#[from] UserStoreError),
    #[error(transparent)]
    Hasher(#[from] HasherError),
}

/// Edit use case - updates email and password on a valid account
///
/// Test accounts cannot be edited; they must be promoted first. Updates run
/// sequentially, email first, and the first failure aborts the remainder.
pub struct EditUserUseCase<'a, S, H>
where
    S: UserStore + ?Sized,
    H: CredentialHasher + ?Sized,
{
    store: &'a S,
    hasher: &'a H,
}

impl<'a, S, H> EditUserUseCase<'a, S, H>
where
    S: UserStore + ?Sized,
    H: CredentialHasher + ?Sized,
{
    pub fn new(store: &'a S, hasher: &'a H) -> Self {
        Self { store, hasher }
    }

    #[tracing::instrument(name = "EditUserUseCase::execute", skip_all)]
    pub async fn execute(&self, edit: AccountEdit) -> Result<(), EditUserError> {
        let user = self
            .store
            .find_by_username(&edit.username)
            .await?
            .ok_or(EditUserError::UserNotFound)?;

        self.hasher
            .verify(edit.password, user.password_hash().clone())
            .await?;

        if user.status() != AccountStatus::Valid {
            return Err(EditUserError::InvalidAccountType);
        }

        if let Some(email) = &edit.email {
            self.store.update_email(&edit.username, email).await?;
        }

        if let Some(new_password) = edit.new_password {
            let password_hash = self.hasher.hash(new_password).await?;
            self.store
                .update_password(&edit.username, password_hash)
                .await?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use secrecy::ExposeSecret;
    use userhub_core::User;

    use super::*;
    use crate::use_cases::support::{MockHasher, MockUserStore, email, password, username};

    async fn store_with_valid_account() -> MockUserStore {
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

    fn edit(
        email_update: Option<&str>,
        password_update: Option<&str>,
    ) -> AccountEdit {
        AccountEdit {
            username: username("alice"),
            password: password("secret1"),
            email: email_update.map(email),
            new_password: password_update.map(password),
        }
    }

    #[tokio::test]
    async fn updates_the_email_when_present() {
        let store = store_with_valid_account().await;
        let hasher = MockHasher::default();
        let use_case = EditUserUseCase::new(&store, &hasher);

        use_case.execute(edit(Some("new@x.com"), None)).await.unwrap();

        let stored = store.get("alice").await.unwrap();
        assert_eq!(stored.email().unwrap().as_str(), "new@x.com");
    }

    #[tokio::test]
    async fn rehashes_and_updates_the_password_when_present() {
        let store = store_with_valid_account().await;
        let hasher = MockHasher::default();
        let use_case = EditUserUseCase::new(&store, &hasher);

        use_case.execute(edit(None, Some("newpass1"))).await.unwrap();

        let stored = store.get("alice").await.unwrap();
        assert_eq!(
            *stored.password_hash().as_secret().expose_secret(),
            MockHasher::hash_for("newpass1")
        );
    }

    #[tokio::test]
    async fn updates_both_fields_in_one_call() {
        let store = store_with_valid_account().await;
        let hasher = MockHasher::default();
        let use_case = EditUserUseCase::new(&store, &hasher);

        use_case
            .execute(edit(Some("new@x.com"), Some("newpass1")))
            .await
            .unwrap();

        let stored = store.get("alice").await.unwrap();
        assert_eq!(stored.email().unwrap().as_str(), "new@x.com");
        assert_eq!(
            *stored.password_hash().as_secret().expose_secret(),
            MockHasher::hash_for("newpass1")
        );
    }

    #[tokio::test]
    async fn rejects_a_test_account_regardless_of_payload() {
        let store = MockUserStore::default();
        store
            .seed(User::new(
                username("alice"),
                None,
                MockHasher::stored_hash("secret1"),
            ))
            .await;
        let hasher = MockHasher::default();
        let use_case = EditUserUseCase::new(&store, &hasher);

        let result = use_case.execute(edit(Some("new@x.com"), Some("newpass1"))).await;

        assert!(matches!(result, Err(EditUserError::InvalidAccountType)));
        assert!(store.get("alice").await.unwrap().email().is_none());
    }

    #[tokio::test]
    async fn rejects_an_unknown_user() {
        let store = MockUserStore::default();
        let hasher = MockHasher::default();
        let use_case = EditUserUseCase::new(&store, &hasher);

        let result = use_case.execute(edit(Some("new@x.com"), None)).await;

        assert!(matches!(result, Err(EditUserError::UserNotFound)));
    }

    #[tokio::test]
    async fn rejects_a_wrong_current_password() {
        let store = store_with_valid_account().await;
        let hasher = MockHasher::default();
        let use_case = EditUserUseCase::new(&store, &hasher);

        let result = use_case
            .execute(AccountEdit {
                username: username("alice"),
                password: password("wrongpass"),
                email: Some(email("new@x.com")),
                new_password: None,
            })
            .await;

        assert!(matches!(
            result,
            Err(EditUserError::Hasher(HasherError::InvalidCredentials))
        ));
        let stored = store.get("alice").await.unwrap();
        assert_eq!(stored.email().unwrap().as_str(), "a@x.com");
    }
}
