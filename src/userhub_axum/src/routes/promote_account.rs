use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use axum_extra::extract::CookieJar;
use secrecy::Secret;
use serde::Deserialize;
use userhub_application::{AccountPromotion, PromoteAccountUseCase};
use userhub_core::{EmailAddress, Password};

use crate::{
    cookies::attach_session_token,
    error::ApiError,
    extract::AuthenticatedUser,
    routes::TokenResponse,
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct PromoteAccountRequest {
    pub password: Secret<String>,
    pub email: Option<String>,
}

/// PUT /user/test-email - session gate
///
/// Attaches an email to a test account and returns a fresh token that
/// reflects the promoted status.
#[tracing::instrument(name = "Promote test account", skip_all)]
pub async fn promote_account(
    State(state): State<AppState>,
    jar: CookieJar,
    AuthenticatedUser(username): AuthenticatedUser,
    Json(request): Json<PromoteAccountRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let password = Password::parse(request.password)?;
    let email = request
        .email
        .as_deref()
        .map(EmailAddress::parse)
        .transpose()?;

    let use_case = PromoteAccountUseCase::new(
        state.user_store.as_ref(),
        state.hasher.as_ref(),
        state.tokens.as_ref(),
    );
    let token = use_case
        .execute(AccountPromotion { username, password, email })
        .await?;

    let jar = attach_session_token(&state.auth, jar, &token);
    Ok((StatusCode::OK, jar, Json(TokenResponse { token })))
}
