//! Shared mock ports for use-case unit tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use secrecy::{ExposeSecret, Secret};
use tokio::sync::RwLock;
use userhub_core::{
    AccountStatus, Claims, CredentialHasher, EmailAddress, EmailVerifier, EmailVerifierError,
    HasherError, Mailer, MailerError, Password, PasswordHash, TokenError, TokenIdentity,
    TokenKind, TokenService, User, UserStore, UserStoreError, Username,
};

pub fn username(value: &str) -> Username {
    Username::parse(value).unwrap()
}

pub fn email(value: &str) -> EmailAddress {
    EmailAddress::parse(value).unwrap()
}

pub fn password(value: &str) -> Password {
    Password::parse(Secret::from(value.to_owned())).unwrap()
}

/// In-memory store mirroring the production uniqueness rules.
#[derive(Default)]
pub struct MockUserStore {
    users: RwLock<HashMap<Username, User>>,
    pub deletes: AtomicUsize,
}

impl MockUserStore {
    pub async fn seed(&self, user: User) {
        self.users.write().await.insert(user.username().clone(), user);
    }

    pub async fn get(&self, name: &str) -> Option<User> {
        self.users.read().await.get(&username(name)).cloned()
    }
}

#[async_trait]
impl UserStore for MockUserStore {
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
        self.deletes.fetch_add(1, Ordering::SeqCst);
        self.users
            .write()
            .await
            .remove(username)
            .ok_or(UserStoreError::UserNotFound)?;
        Ok(())
    }
}

/// Deterministic stand-in for the Argon2 hasher, with a call counter so tests
/// can assert the hasher was never reached.
#[derive(Default)]
pub struct MockHasher {
    pub verify_calls: AtomicUsize,
}

impl MockHasher {
    pub fn hash_for(plaintext: &str) -> String {
        format!("hashed::{plaintext}")
    }

    pub fn stored_hash(plaintext: &str) -> PasswordHash {
        PasswordHash::from(Self::hash_for(plaintext))
    }
}

#[async_trait]
impl CredentialHasher for MockHasher {
    async fn hash(&self, password: Password) -> Result<PasswordHash, HasherError> {
        Ok(Self::stored_hash(password.as_secret().expose_secret()))
    }

    async fn verify(
        &self,
        candidate: Password,
        password_hash: PasswordHash,
    ) -> Result<(), HasherError> {
        self.verify_calls.fetch_add(1, Ordering::SeqCst);
        if Self::hash_for(candidate.as_secret().expose_secret())
            == *password_hash.as_secret().expose_secret()
        {
            Ok(())
        } else {
            Err(HasherError::InvalidCredentials)
        }
    }
}

/// Records every issued token instead of signing anything.
#[derive(Default)]
pub struct RecordingTokenService {
    pub issued: Mutex<Vec<(TokenIdentity, TokenKind)>>,
}

impl TokenService for RecordingTokenService {
    fn issue(&self, identity: &TokenIdentity, kind: TokenKind) -> Result<String, TokenError> {
        self.issued.lock().unwrap().push((identity.clone(), kind));
        Ok(format!("signed-token-for-{}", identity.username))
    }

    fn verify(&self, _token: &str) -> Result<Claims, TokenError> {
        Err(TokenError::InvalidToken)
    }
}

#[derive(Default)]
pub struct RecordingMailer {
    pub sent: Mutex<Vec<(EmailAddress, String)>>,
    pub fail: bool,
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send_password_reset(
        &self,
        recipient: &EmailAddress,
        token: &str,
    ) -> Result<(), MailerError> {
        if self.fail {
            return Err(MailerError::DeliveryFailed);
        }
        self.sent
            .lock()
            .unwrap()
            .push((recipient.clone(), token.to_owned()));
        Ok(())
    }
}

pub struct StubVerifier {
    pub deliverable: bool,
    pub calls: AtomicUsize,
}

impl StubVerifier {
    pub fn accepting() -> Self {
        Self { deliverable: true, calls: AtomicUsize::new(0) }
    }

    pub fn rejecting() -> Self {
        Self { deliverable: false, calls: AtomicUsize::new(0) }
    }
}

#[async_trait]
impl EmailVerifier for StubVerifier {
    async fn check_deliverability(
        &self,
        _email: &EmailAddress,
    ) -> Result<(), EmailVerifierError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.deliverable {
            Ok(())
        } else {
            Err(EmailVerifierError::Undeliverable)
        }
    }
}
