pub mod delete_user;
pub mod edit_user;
pub mod forgot_password;
pub mod get_user;
pub mod health;
pub mod login;
pub mod logout;
pub mod promote_account;
pub mod register;
pub mod reset_password;

pub use delete_user::delete_user;
pub use edit_user::edit_user;
pub use forgot_password::forgot_password;
pub use get_user::get_user;
pub use health::start;
pub use login::login;
pub use logout::logout;
pub use promote_account::promote_account;
pub use register::register;
pub use reset_password::reset_password;

use serde::{Deserialize, Serialize};

/// Body returned by every token-issuing endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: &str) -> Self {
        Self { message: message.to_owned() }
    }
}
