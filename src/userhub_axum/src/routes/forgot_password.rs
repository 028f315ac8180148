use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Deserialize;
use userhub_application::ForgotPasswordUseCase;
use userhub_core::EmailAddress;

use crate::{error::ApiError, routes::MessageResponse, state::AppState};

#[derive(Debug, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

/// POST /user/forgot-password - open route
///
/// No password is involved; the address alone selects the account and the
/// proof of ownership is reading the mail.
#[tracing::instrument(name = "Forgot password", skip_all)]
pub async fn forgot_password(
    State(state): State<AppState>,
    Json(request): Json<ForgotPasswordRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let email = EmailAddress::parse(&request.email)?;

    let use_case = ForgotPasswordUseCase::new(
        state.user_store.as_ref(),
        state.tokens.as_ref(),
        state.mailer.as_ref(),
    );
    use_case.execute(&email).await?;

    Ok((
        StatusCode::OK,
        Json(MessageResponse::new("password reset email sent")),
    ))
}
