use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use userhub_core::{
    AccountStatus, EmailAddress, PasswordHash, User, UserStore, UserStoreError, Username,
};

/// In-memory store for tests and local runs. Enforces the same uniqueness
/// rules as the Postgres store so conflict behavior matches.
#[derive(Clone, Default)]
pub struct InMemoryUserStore {
    users: Arc<RwLock<HashMap<Username, User>>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl UserStore for InMemoryUserStore {
    async fn create_user(&self, user: User) -> Result<(), UserStoreError> {
        let mut users = self.users.write().await;
        if users.contains_key(user.username()) {
            return Err(UserStoreError::DuplicateField("username"));
        }
        if let Some(new_email) = user.email() {
            if users.values().any(|u| u.email() == Some(new_email)) {
                return Err(UserStoreError::DuplicateField("email"));
            }
        }
        users.insert(user.username().clone(), user);
        Ok(())
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserStoreError> {
        Ok(self.users.read().await.get(username).cloned())
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserStoreError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.email() == Some(email))
            .cloned())
    }

    async fn update_email(
        &self,
        username: &Username,
        email: &EmailAddress,
    ) -> Result<(), UserStoreError> {
        let mut users = self.users.write().await;
        if users
            .iter()
            .any(|(name, u)| name != username && u.email() == Some(email))
        {
            return Err(UserStoreError::DuplicateField("email"));
        }
        let user = users.get(username).ok_or(UserStoreError::UserNotFound)?.clone();
        users.insert(
            username.clone(),
            User::from_parts(
                user.username().clone(),
                Some(email.clone()),
                user.password_hash().clone(),
                user.status(),
                user.created_at(),
            ),
        );
        Ok(())
    }

    async fn update_password(
        &self,
        username: &Username,
        password_hash: PasswordHash,
    ) -> Result<(), UserStoreError> {
        let mut users = self.users.write().await;
        let user = users.get(username).ok_or(UserStoreError::UserNotFound)?.clone();
        users.insert(
            username.clone(),
            User::from_parts(
                user.username().clone(),
                user.email().cloned(),
                password_hash,
                user.status(),
                user.created_at(),
            ),
        );
        Ok(())
    }

    async fn promote_test_account(
        &self,
        username: &Username,
        email: &EmailAddress,
    ) -> Result<(), UserStoreError> {
        let mut users = self.users.write().await;
        if users
            .iter()
            .any(|(name, u)| name != username && u.email() == Some(email))
        {
            return Err(UserStoreError::DuplicateField("email"));
        }
        let user = users.get(username).ok_or(UserStoreError::UserNotFound)?.clone();
        if user.status() != AccountStatus::Test {
            return Err(UserStoreError::UserNotFound);
        }
        users.insert(
            username.clone(),
            User::from_parts(
                user.username().clone(),
                Some(email.clone()),
                user.password_hash().clone(),
                AccountStatus::Valid,
                user.created_at(),
            ),
        );
        Ok(())
    }

    async fn delete_user(&self, username: &Username) -> Result<(), UserStoreError> {
        self.users
            .write()
            .await
            .remove(username)
            .ok_or(UserStoreError::UserNotFound)?;
        Ok(())
    }
}
