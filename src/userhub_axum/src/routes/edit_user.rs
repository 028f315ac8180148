use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use secrecy::Secret;
use serde::Deserialize;
use userhub_application::{AccountEdit, EditUserUseCase};
use userhub_core::{EmailAddress, Password};

use crate::{
    error::ApiError,
    extract::AuthenticatedUser,
    routes::MessageResponse,
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct EditUserRequest {
    pub password: Secret<String>,
    pub email: Option<String>,
    #[serde(rename = "newPassword")]
    pub new_password: Option<Secret<String>>,
}

/// PUT /user/ - session gate
#[tracing::instrument(name = "Edit user", skip_all)]
pub async fn edit_user(
    State(state): State<AppState>,
    AuthenticatedUser(username): AuthenticatedUser,
    Json(request): Json<EditUserRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let password = Password::parse(request.password)?;
    let email = request
        .email
        .as_deref()
        .map(EmailAddress::parse)
        .transpose()?;
    let new_password = request.new_password.map(Password::parse).transpose()?;

    let use_case = EditUserUseCase::new(state.user_store.as_ref(), state.hasher.as_ref());
    use_case
        .execute(AccountEdit { username, password, email, new_password })
        .await?;

    Ok((StatusCode::OK, Json(MessageResponse::new("user updated"))))
}
