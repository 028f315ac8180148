use axum::{extract::FromRequestParts, http::request::Parts};
use userhub_core::Username;

use crate::error::ApiError;

/// Identity resolved by the request gate and injected into the request
/// extensions. Handlers behind the gate extract it instead of trusting any
/// username in the payload.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub Username);

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or(ApiError::InvalidToken)
    }
}
