use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use secrecy::Secret;
use serde::Deserialize;
use userhub_application::{PasswordResetData, ResetPasswordUseCase};
use userhub_core::Password;

use crate::{
    error::ApiError,
    extract::AuthenticatedUser,
    routes::MessageResponse,
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub password: Secret<String>,
}

/// PUT /user/reset - reset gate
///
/// Reachable only with a reset-flagged token, so the old password is not
/// checked again here.
#[tracing::instrument(name = "Reset password", skip_all)]
pub async fn reset_password(
    State(state): State<AppState>,
    AuthenticatedUser(username): AuthenticatedUser,
    Json(request): Json<ResetPasswordRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let password = Password::parse(request.password)?;

    let use_case =
        ResetPasswordUseCase::new(state.user_store.as_ref(), state.hasher.as_ref());
    use_case
        .execute(PasswordResetData { username, password })
        .await?;

    Ok((
        StatusCode::OK,
        Json(MessageResponse::new("password updated")),
    ))
}
