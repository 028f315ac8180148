use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use userhub_application::{
    DeleteUserError, EditUserError, ForgotPasswordError, GetUserError, LoginError,
    PromoteAccountError, RegisterError, ResetPasswordError,
};
use userhub_core::{
    EmailVerifierError, HasherError, MailerError, TokenError, UserError, UserStoreError,
};

#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
}

/// Single HTTP failure boundary. Every layer's error converges here and leaves
/// the service as `{status, message}`; unrecognized failures are normalized to
/// a generic internal error so nothing internal leaks.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("user not found")]
    UserNotFound,

    #[error("{0} already in use")]
    DuplicateField(&'static str),

    #[error("{0}")]
    InvalidInput(String),

    #[error("invalid token")]
    InvalidToken,

    #[error("invalid login credentials")]
    InvalidCredentials,

    #[error("test account already deleted")]
    TestAccountExpired,

    #[error("invalid account type")]
    InvalidAccountType,

    #[error("invalid email or invalid account type")]
    InvalidPromotion,

    #[error("undeliverable email")]
    UndeliverableEmail,

    #[error("something went wrong")]
    MailDelivery,

    #[error("internal server error")]
    Unexpected(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Unexpected(cause) = &self {
            tracing::error!(%cause, "request failed with an internal error");
        }

        let status_code = match self {
            ApiError::InvalidInput(_)
            | ApiError::InvalidAccountType
            | ApiError::InvalidPromotion
            | ApiError::UndeliverableEmail
            | ApiError::MailDelivery => StatusCode::BAD_REQUEST,

            ApiError::InvalidToken | ApiError::InvalidCredentials | ApiError::TestAccountExpired => {
                StatusCode::UNAUTHORIZED
            }

            ApiError::UserNotFound => StatusCode::NOT_FOUND,

            ApiError::DuplicateField(_) => StatusCode::CONFLICT,

            ApiError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(ErrorResponse {
            message: self.to_string(),
        });

        (status_code, body).into_response()
    }
}

impl From<UserError> for ApiError {
    fn from(error: UserError) -> Self {
        ApiError::InvalidInput(error.to_string())
    }
}

impl From<UserStoreError> for ApiError {
    fn from(error: UserStoreError) -> Self {
        match error {
            UserStoreError::DuplicateField(field) => ApiError::DuplicateField(field),
            UserStoreError::UserNotFound => ApiError::UserNotFound,
            UserStoreError::Unexpected(e) => ApiError::Unexpected(e),
        }
    }
}

impl From<HasherError> for ApiError {
    fn from(error: HasherError) -> Self {
        match error {
            HasherError::InvalidCredentials => ApiError::InvalidCredentials,
            HasherError::Unexpected(e) => ApiError::Unexpected(e),
        }
    }
}

impl From<TokenError> for ApiError {
    fn from(error: TokenError) -> Self {
        match error {
            TokenError::InvalidToken => ApiError::InvalidToken,
            TokenError::Unexpected(e) => ApiError::Unexpected(e),
        }
    }
}

impl From<MailerError> for ApiError {
    fn from(error: MailerError) -> Self {
        match error {
            MailerError::DeliveryFailed => ApiError::MailDelivery,
            MailerError::Unexpected(e) => ApiError::Unexpected(e),
        }
    }
}

impl From<EmailVerifierError> for ApiError {
    fn from(error: EmailVerifierError) -> Self {
        match error {
            EmailVerifierError::Undeliverable => ApiError::UndeliverableEmail,
            EmailVerifierError::Unexpected(e) => ApiError::Unexpected(e),
        }
    }
}

impl From<LoginError> for ApiError {
    fn from(error: LoginError) -> Self {
        match error {
            LoginError::UserNotFound => ApiError::UserNotFound,
            LoginError::TestAccountExpired => ApiError::TestAccountExpired,
            LoginError::Store(e) => e.into(),
            LoginError::Hasher(e) => e.into(),
            LoginError::Token(e) => e.into(),
        }
    }
}

impl From<RegisterError> for ApiError {
    fn from(error: RegisterError) -> Self {
        match error {
            RegisterError::Store(e) => e.into(),
            RegisterError::Hasher(e) => e.into(),
            RegisterError::Token(e) => e.into(),
            RegisterError::Verifier(e) => e.into(),
        }
    }
}

impl From<EditUserError> for ApiError {
    fn from(error: EditUserError) -> Self {
        match error {
            EditUserError::UserNotFound => ApiError::UserNotFound,
            EditUserError::InvalidAccountType => ApiError::InvalidAccountType,
            EditUserError::Store(e) => e.into(),
            EditUserError::Hasher(e) => e.into(),
        }
    }
}

impl From<PromoteAccountError> for ApiError {
    fn from(error: PromoteAccountError) -> Self {
        match error {
            PromoteAccountError::UserNotFound => ApiError::UserNotFound,
            PromoteAccountError::InvalidPromotion => ApiError::InvalidPromotion,
            PromoteAccountError::Store(e) => e.into(),
            PromoteAccountError::Hasher(e) => e.into(),
            PromoteAccountError::Token(e) => e.into(),
        }
    }
}

impl From<GetUserError> for ApiError {
    fn from(error: GetUserError) -> Self {
        match error {
            GetUserError::UserNotFound => ApiError::UserNotFound,
            GetUserError::Store(e) => e.into(),
        }
    }
}

impl From<DeleteUserError> for ApiError {
    fn from(error: DeleteUserError) -> Self {
        match error {
            DeleteUserError::UserNotFound => ApiError::UserNotFound,
            DeleteUserError::Store(e) => e.into(),
            DeleteUserError::Hasher(e) => e.into(),
        }
    }
}

impl From<ForgotPasswordError> for ApiError {
    fn from(error: ForgotPasswordError) -> Self {
        match error {
            ForgotPasswordError::UserNotFound => ApiError::UserNotFound,
            ForgotPasswordError::Store(e) => e.into(),
            ForgotPasswordError::Token(e) => e.into(),
            ForgotPasswordError::Mailer(e) => e.into(),
        }
    }
}

impl From<ResetPasswordError> for ApiError {
    fn from(error: ResetPasswordError) -> Self {
        match error {
            ResetPasswordError::Store(e) => e.into(),
            ResetPasswordError::Hasher(e) => e.into(),
        }
    }
}
