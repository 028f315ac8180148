use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use userhub_application::GetUserUseCase;
use userhub_core::AccountStatus;

use crate::{error::ApiError, extract::AuthenticatedUser, state::AppState};

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub username: String,
    pub email: Option<String>,
    pub status: AccountStatus,
}

/// GET /user/ - session gate
///
/// Returns the caller's own profile. The password hash never leaves the
/// store contract, so there is nothing to filter out here.
#[tracing::instrument(name = "Get user", skip_all)]
pub async fn get_user(
    State(state): State<AppState>,
    AuthenticatedUser(username): AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    let use_case = GetUserUseCase::new(state.user_store.as_ref());
    let profile = use_case.execute(&username).await?;

    Ok((
        StatusCode::OK,
        Json(ProfileResponse {
            username: profile.username.as_str().to_owned(),
            email: profile.email.map(|email| email.as_str().to_owned()),
            status: profile.status,
        }),
    ))
}
