use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use axum_extra::extract::CookieJar;

use crate::{
    cookies::create_removal_cookie,
    error::ApiError,
    extract::AuthenticatedUser,
    routes::MessageResponse,
    state::AppState,
};

/// POST /user/logout - session gate
///
/// Tokens are stateless, so there is nothing to revoke server-side; logout
/// only removes the session cookie.
#[tracing::instrument(name = "Logout", skip_all)]
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    let jar = jar.add(create_removal_cookie(&state.auth.cookie_name));
    Ok((
        StatusCode::OK,
        jar,
        Json(MessageResponse::new("user logged out")),
    ))
}
