pub mod domain;
pub mod ports;

// Re-export commonly used types for convenience
pub use domain::{
    account_status::AccountStatus,
    email::EmailAddress,
    password::{Password, PasswordHash},
    user::{User, UserError},
    username::Username,
};

pub use ports::{
    repositories::{UserStore, UserStoreError},
    security::{
        Claims, CredentialHasher, HasherError, TokenError, TokenIdentity, TokenKind, TokenService,
    },
    services::{EmailVerifier, EmailVerifierError, Mailer, MailerError},
};
