use chrono::{DateTime, Duration, Utc};
use thiserror::Error;

use crate::domain::{
    account_status::AccountStatus, email::EmailAddress, password::PasswordHash, username::Username,
};

/// Days a test account may live before login purges it.
pub const TEST_ACCOUNT_TTL_DAYS: i64 = 30;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UserError {
    #[error("username must be at least 3 alphanumeric characters")]
    InvalidUsername,
    #[error("invalid email address")]
    InvalidEmail,
    #[error("password must be at least 6 alphanumeric characters")]
    InvalidPassword,
}

/// A persisted account record.
///
/// Status is derived from the email at creation: an account registered with an
/// email is a valid account, one without is a test account. The store is the
/// only component allowed to flip the status afterwards (promotion).
#[derive(Debug, Clone)]
pub struct User {
    username: Username,
    email: Option<EmailAddress>,
    password_hash: PasswordHash,
    status: AccountStatus,
    created_at: DateTime<Utc>,
}

impl User {
    pub fn new(username: Username, email: Option<EmailAddress>, password_hash: PasswordHash) -> Self {
        let status = if email.is_some() {
            AccountStatus::Valid
        } else {
            AccountStatus::Test
        };

        Self {
            username,
            email,
            password_hash,
            status,
            created_at: Utc::now(),
        }
    }

    /// Rehydrate a record loaded from a store. Does not re-derive the status.
    pub fn from_parts(
        username: Username,
        email: Option<EmailAddress>,
        password_hash: PasswordHash,
        status: AccountStatus,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            username,
            email,
            password_hash,
            status,
            created_at,
        }
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn email(&self) -> Option<&EmailAddress> {
        self.email.as_ref()
    }

    pub fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }

    pub fn status(&self) -> AccountStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// A test account past its 30-day window is expired and must be purged
    /// before any token is issued for it. Valid accounts never expire.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.status == AccountStatus::Test
            && now - self.created_at >= Duration::days(TEST_ACCOUNT_TTL_DAYS)
    }
}
