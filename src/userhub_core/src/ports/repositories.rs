use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{
    email::EmailAddress, password::PasswordHash, user::User, username::Username,
};

// UserStore port trait and errors
#[derive(Debug, Error)]
pub enum UserStoreError {
    #[error("{0} already in use")]
    DuplicateField(&'static str),
    #[error("user not found")]
    UserNotFound,
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl PartialEq for UserStoreError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::DuplicateField(a), Self::DuplicateField(b)) => a == b,
            (Self::UserNotFound, Self::UserNotFound) => true,
            (Self::Unexpected(_), Self::Unexpected(_)) => true,
            _ => false,
        }
    }
}

/// Persistence contract for account records.
///
/// Uniqueness of `username` and `email` is enforced by the backing store;
/// violations surface as [`UserStoreError::DuplicateField`]. Backend failures
/// that are not duplicate-key conditions come back as `Unexpected` and are
/// normalized to an internal error at the HTTP boundary.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn create_user(&self, user: User) -> Result<(), UserStoreError>;
    async fn find_by_username(&self, username: &Username)
    -> Result<Option<User>, UserStoreError>;
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserStoreError>;
    async fn update_email(
        &self,
        username: &Username,
        email: &EmailAddress,
    ) -> Result<(), UserStoreError>;
    async fn update_password(
        &self,
        username: &Username,
        password_hash: PasswordHash,
    ) -> Result<(), UserStoreError>;
    /// Atomically sets the email and flips a test account to a valid one.
    async fn promote_test_account(
        &self,
        username: &Username,
        email: &EmailAddress,
    ) -> Result<(), UserStoreError>;
    async fn delete_user(&self, username: &Username) -> Result<(), UserStoreError>;
}
