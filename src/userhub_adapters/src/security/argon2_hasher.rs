use argon2::{
    Algorithm, Argon2, Params, PasswordHash as ParsedHash, PasswordVerifier, Version,
    password_hash::{PasswordHasher as _, SaltString, rand_core},
};
use async_trait::async_trait;
use secrecy::{ExposeSecret, Secret};
use userhub_core::{CredentialHasher, HasherError, Password, PasswordHash};

/// Argon2id hasher. Hashing and verification run on the blocking pool so the
/// request executor is never stalled by key derivation.
#[derive(Debug, Clone, Default)]
pub struct Argon2CredentialHasher;

impl Argon2CredentialHasher {
    pub fn new() -> Self {
        Self
    }
}

fn hasher() -> Result<Argon2<'static>, String> {
    Ok(Argon2::new(
        Algorithm::Argon2id,
        Version::V0x13,
        Params::new(15000, 2, 1, None).map_err(|e| e.to_string())?,
    ))
}

#[async_trait]
impl CredentialHasher for Argon2CredentialHasher {
    #[tracing::instrument(name = "Computing password hash", skip_all)]
    async fn hash(&self, password: Password) -> Result<PasswordHash, HasherError> {
        let current_span: tracing::Span = tracing::Span::current();

        let result = tokio::task::spawn_blocking(move || {
            current_span.in_scope(move || {
                let salt: SaltString = SaltString::generate(rand_core::OsRng);
                hasher()
                    .map_err(HasherError::Unexpected)?
                    .hash_password(password.as_secret().expose_secret().as_bytes(), &salt)
                    .map(|h| PasswordHash::new(Secret::from(h.to_string())))
                    .map_err(|e| HasherError::Unexpected(e.to_string()))
            })
        })
        .await
        .map_err(|e| HasherError::Unexpected(e.to_string()))?;

        result
    }

    #[tracing::instrument(name = "Verify password hash", skip_all)]
    async fn verify(
        &self,
        candidate: Password,
        password_hash: PasswordHash,
    ) -> Result<(), HasherError> {
        let current_span: tracing::Span = tracing::Span::current();

        let result = tokio::task::spawn_blocking(move || {
            current_span.in_scope(|| {
                let expected: ParsedHash<'_> =
                    ParsedHash::new(password_hash.as_secret().expose_secret())
                        .map_err(|e| HasherError::Unexpected(e.to_string()))?;

                hasher()
                    .map_err(HasherError::Unexpected)?
                    .verify_password(
                        candidate.as_secret().expose_secret().as_bytes(),
                        &expected,
                    )
                    .map_err(|e| match e {
                        argon2::password_hash::Error::Password => HasherError::InvalidCredentials,
                        other => HasherError::Unexpected(other.to_string()),
                    })
            })
        })
        .await
        .map_err(|e| HasherError::Unexpected(e.to_string()))?;

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn password(value: &str) -> Password {
        Password::parse(Secret::from(value.to_owned())).unwrap()
    }

    #[tokio::test]
    async fn a_hash_verifies_against_its_own_plaintext() {
        let hasher = Argon2CredentialHasher::new();
        let hash = hasher.hash(password("secret1")).await.unwrap();
        hasher.verify(password("secret1"), hash).await.unwrap();
    }

    #[tokio::test]
    async fn a_hash_rejects_any_other_plaintext() {
        let hasher = Argon2CredentialHasher::new();
        let hash = hasher.hash(password("secret1")).await.unwrap();
        let result = hasher.verify(password("secret2"), hash).await;
        assert_eq!(result.unwrap_err(), HasherError::InvalidCredentials);
    }

    #[tokio::test]
    async fn hashing_salts_freshly_on_every_call() {
        let hasher = Argon2CredentialHasher::new();
        let first = hasher.hash(password("secret1")).await.unwrap();
        let second = hasher.hash(password("secret1")).await.unwrap();
        assert_ne!(
            first.as_secret().expose_secret(),
            second.as_secret().expose_secret()
        );
    }

    #[tokio::test]
    async fn the_hash_never_contains_the_plaintext() {
        let hasher = Argon2CredentialHasher::new();
        let hash = hasher.hash(password("secret1")).await.unwrap();
        assert!(!hash.as_secret().expose_secret().contains("secret1"));
    }

    #[tokio::test]
    async fn garbage_in_the_stored_hash_is_not_a_credential_mismatch() {
        let hasher = Argon2CredentialHasher::new();
        let result = hasher
            .verify(password("secret1"), PasswordHash::from("not-a-hash".to_owned()))
            .await;
        assert!(matches!(result, Err(HasherError::Unexpected(_))));
    }
}
