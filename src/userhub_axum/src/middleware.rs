use axum::{
    extract::{Request, State},
    http::{HeaderMap, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::CookieJar;
use userhub_adapters::TokenTransport;
use userhub_core::{Claims, Username};

use crate::{error::ApiError, extract::AuthenticatedUser, state::AppState};

/// Session gate for the protected routes.
///
/// The inner resolution computes precise failures (including a Bad Request
/// for a claim that fails username validation), and the boundary then
/// collapses every one of them to 401 "invalid token" so a caller cannot
/// tell a bad token shape from a bad signature.
#[tracing::instrument(name = "Session gate", skip_all)]
pub async fn require_session(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let username =
        resolve_session(&state, request.headers()).map_err(|_| ApiError::InvalidToken)?;

    request.extensions_mut().insert(AuthenticatedUser(username));
    Ok(next.run(request).await)
}

/// Gate for the reset-password route. Bearer-only, and the decoded claims
/// must carry the reset flag; a plain session token is rejected.
#[tracing::instrument(name = "Reset gate", skip_all)]
pub async fn require_reset_session(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let username =
        resolve_reset(&state, request.headers()).map_err(|_| ApiError::InvalidToken)?;

    request.extensions_mut().insert(AuthenticatedUser(username));
    Ok(next.run(request).await)
}

fn resolve_session(state: &AppState, headers: &HeaderMap) -> Result<Username, ApiError> {
    let token = extract_session_token(state, headers)?;
    let claims = state.tokens.verify(&token)?;
    claimed_username(&claims)
}

fn resolve_reset(state: &AppState, headers: &HeaderMap) -> Result<Username, ApiError> {
    let token = bearer_token(headers)?;
    let claims = state.tokens.verify(&token)?;
    if !claims.reset {
        return Err(ApiError::InvalidToken);
    }
    claimed_username(&claims)
}

fn extract_session_token(state: &AppState, headers: &HeaderMap) -> Result<String, ApiError> {
    match state.auth.transport {
        TokenTransport::Cookie => CookieJar::from_headers(headers)
            .get(&state.auth.cookie_name)
            .map(|cookie| cookie.value().to_owned())
            .ok_or(ApiError::InvalidToken),
        TokenTransport::Bearer => bearer_token(headers),
    }
}

fn bearer_token(headers: &HeaderMap) -> Result<String, ApiError> {
    let value = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or(ApiError::InvalidToken)?;

    Ok(value.strip_prefix("Bearer ").unwrap_or(value).to_owned())
}

/// Tokens are forged-input territory: the claimed username goes back through
/// the same validation as any payload before it is trusted downstream.
fn claimed_username(claims: &Claims) -> Result<Username, ApiError> {
    Username::parse(&claims.sub).map_err(|e| ApiError::InvalidInput(e.to_string()))
}
