pub mod delete_user;
pub mod edit_user;
pub mod forgot_password;
pub mod get_user;
pub mod login;
pub mod promote_account;
pub mod register;
pub mod reset_password;

#[cfg(test)]
pub(crate) mod support;
