use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use secrecy::Secret;
use serde::Deserialize;
use userhub_application::{AccountDeletion, DeleteUserUseCase};
use userhub_core::Password;

use crate::{
    error::ApiError,
    extract::AuthenticatedUser,
    routes::MessageResponse,
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct DeleteUserRequest {
    pub password: Secret<String>,
}

/// DELETE /user/ - session gate
#[tracing::instrument(name = "Delete user", skip_all)]
pub async fn delete_user(
    State(state): State<AppState>,
    AuthenticatedUser(username): AuthenticatedUser,
    Json(request): Json<DeleteUserRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let password = Password::parse(request.password)?;

    let use_case = DeleteUserUseCase::new(state.user_store.as_ref(), state.hasher.as_ref());
    use_case
        .execute(AccountDeletion { username, password })
        .await?;

    Ok((StatusCode::OK, Json(MessageResponse::new("user deleted"))))
}
