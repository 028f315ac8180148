use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{
    account_status::AccountStatus,
    password::{Password, PasswordHash},
    username::Username,
};

// CredentialHasher port trait and errors
#[derive(Debug, Error)]
pub enum HasherError {
    #[error("invalid login credentials")]
    InvalidCredentials,
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl PartialEq for HasherError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::InvalidCredentials, Self::InvalidCredentials) => true,
            (Self::Unexpected(_), Self::Unexpected(_)) => true,
            _ => false,
        }
    }
}

/// One-way password hashing and verification.
///
/// `hash` salts freshly on every call, so two hashes of the same plaintext
/// differ. `verify` reports a mismatch as [`HasherError::InvalidCredentials`]
/// and never exposes the plaintext or the hash.
#[async_trait]
pub trait CredentialHasher: Send + Sync {
    async fn hash(&self, password: Password) -> Result<PasswordHash, HasherError>;
    async fn verify(
        &self,
        candidate: Password,
        password_hash: PasswordHash,
    ) -> Result<(), HasherError>;
}

// TokenService port trait and errors
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("invalid token")]
    InvalidToken,
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

/// Who a token speaks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenIdentity {
    pub username: Username,
    pub status: AccountStatus,
}

/// Selects the configured lifetime of an issued token. Password-reset tokens
/// additionally carry the `reset` claim flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Session,
    Registration,
    PasswordReset,
}

/// Decoded token payload. Self-verifying and stateless; there is no
/// revocation list, expiry is the only way a token dies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub status: AccountStatus,
    #[serde(default, skip_serializing_if = "is_false")]
    pub reset: bool,
    pub iat: usize,
    pub exp: usize,
}

fn is_false(value: &bool) -> bool {
    !value
}

pub trait TokenService: Send + Sync {
    fn issue(&self, identity: &TokenIdentity, kind: TokenKind) -> Result<String, TokenError>;
    /// Fails on a bad signature, malformed input, or an expired token. Never
    /// returns partial claims.
    fn verify(&self, token: &str) -> Result<Claims, TokenError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn claims_omit_the_reset_flag_unless_set() {
        let claims = Claims {
            sub: "alice".to_owned(),
            status: AccountStatus::Test,
            reset: false,
            iat: 0,
            exp: 10,
        };
        let rendered = serde_json::to_string(&claims).unwrap();
        assert!(!rendered.contains("reset"));

        let claims = Claims { reset: true, ..claims };
        let rendered = serde_json::to_string(&claims).unwrap();
        assert!(rendered.contains("\"reset\":true"));
    }

    #[test]
    fn claims_without_a_reset_field_decode_as_non_reset() {
        let claims: Claims =
            serde_json::from_str(r#"{"sub":"alice","status":"valid","iat":0,"exp":10}"#).unwrap();
        assert!(!claims.reset);
        assert_eq!(claims.status, AccountStatus::Valid);
    }
}
