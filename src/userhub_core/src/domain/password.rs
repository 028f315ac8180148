use secrecy::{ExposeSecret, Secret};

use crate::domain::user::UserError;

const MIN_PASSWORD_LENGTH: usize = 6;

/// Plaintext credential, validated at the boundary and wrapped so it never
/// shows up in logs or Debug output.
#[derive(Debug, Clone)]
pub struct Password(Secret<String>);

impl Password {
    /// Accepts at least six alphanumeric characters.
    pub fn parse(value: Secret<String>) -> Result<Self, UserError> {
        let plaintext = value.expose_secret();
        if plaintext.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(UserError::InvalidPassword);
        }
        if !plaintext.chars().all(char::is_alphanumeric) {
            return Err(UserError::InvalidPassword);
        }
        Ok(Self(value))
    }

    pub fn as_secret(&self) -> &Secret<String> {
        &self.0
    }
}

impl TryFrom<Secret<String>> for Password {
    type Error = UserError;

    fn try_from(value: Secret<String>) -> Result<Self, Self::Error> {
        Password::parse(value)
    }
}

/// Output of the credential hasher. The only password form a user record or
/// the store ever holds.
#[derive(Debug, Clone)]
pub struct PasswordHash(Secret<String>);

impl PasswordHash {
    pub fn new(value: Secret<String>) -> Self {
        Self(value)
    }

    pub fn as_secret(&self) -> &Secret<String> {
        &self.0
    }
}

impl From<String> for PasswordHash {
    fn from(value: String) -> Self {
        Self(Secret::from(value))
    }
}
