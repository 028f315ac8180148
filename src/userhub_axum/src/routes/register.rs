use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use axum_extra::extract::CookieJar;
use secrecy::Secret;
use serde::Deserialize;
use userhub_application::{NewAccount, RegisterUseCase};
use userhub_core::{EmailAddress, Password, Username};

use crate::{
    cookies::attach_session_token,
    error::ApiError,
    routes::TokenResponse,
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: Option<String>,
    pub password: Secret<String>,
}

/// POST /user/register - open route
///
/// With an email the account is a valid one; without, a 30-day test account.
#[tracing::instrument(name = "Register", skip_all)]
pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(request): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let username = Username::parse(&request.username)?;
    let email = request
        .email
        .as_deref()
        .map(EmailAddress::parse)
        .transpose()?;
    let password = Password::parse(request.password)?;

    let use_case = RegisterUseCase::new(
        state.user_store.as_ref(),
        state.hasher.as_ref(),
        state.tokens.as_ref(),
        state.email_verifier.as_deref(),
    );
    let token = use_case
        .execute(NewAccount { username, email, password })
        .await?;

    let jar = attach_session_token(&state.auth, jar, &token);
    Ok((StatusCode::CREATED, jar, Json(TokenResponse { token })))
}
