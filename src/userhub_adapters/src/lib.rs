pub mod config;
pub mod email;
pub mod persistence;
pub mod security;

// Re-export commonly used adapters for convenience
pub use config::settings::{Settings, TokenTransport};
pub use email::{
    abstract_email_verifier::AbstractEmailVerifier, mock_email_client::MockEmailClient,
    postmark_email_client::PostmarkEmailClient,
};
pub use persistence::{
    in_memory_user_store::InMemoryUserStore, postgres_user_store::PostgresUserStore,
};
pub use security::{
    argon2_hasher::Argon2CredentialHasher,
    jwt_token_service::{JwtConfig, JwtTokenService},
};
