use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use axum_extra::extract::CookieJar;
use secrecy::Secret;
use serde::Deserialize;
use userhub_application::{LoginCredentials, LoginUseCase};
use userhub_core::{EmailAddress, Password, Username};

use crate::{
    cookies::attach_session_token,
    error::ApiError,
    routes::TokenResponse,
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Secret<String>,
}

/// POST /user/login - open route
#[tracing::instrument(name = "Login", skip_all)]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if request.username.is_none() && request.email.is_none() {
        return Err(ApiError::InvalidInput(
            "username or email is required".to_string(),
        ));
    }

    let username = request
        .username
        .as_deref()
        .map(Username::parse)
        .transpose()?;
    let email = request
        .email
        .as_deref()
        .map(EmailAddress::parse)
        .transpose()?;
    let password = Password::parse(request.password)?;

    let use_case = LoginUseCase::new(
        state.user_store.as_ref(),
        state.hasher.as_ref(),
        state.tokens.as_ref(),
    );
    let token = use_case
        .execute(LoginCredentials { username, email, password })
        .await?;

    let jar = attach_session_token(&state.auth, jar, &token);
    Ok((StatusCode::OK, jar, Json(TokenResponse { token })))
}
