use std::sync::Arc;

use userhub_adapters::TokenTransport;
use userhub_core::{CredentialHasher, EmailVerifier, Mailer, TokenService, UserStore};

/// Everything the handlers need, wired once in the composition root and
/// shared across requests. Collaborators are capability traits so tests can
/// swap in the in-memory store and the recording mailer.
#[derive(Clone)]
pub struct AppState {
    pub user_store: Arc<dyn UserStore>,
    pub hasher: Arc<dyn CredentialHasher>,
    pub tokens: Arc<dyn TokenService>,
    pub mailer: Arc<dyn Mailer>,
    pub email_verifier: Option<Arc<dyn EmailVerifier>>,
    pub auth: AuthConfig,
}

#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub cookie_name: String,
    pub transport: TokenTransport,
}
