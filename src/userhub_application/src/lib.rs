pub mod use_cases;

pub use use_cases::{
    delete_user::{AccountDeletion, DeleteUserError, DeleteUserUseCase},
    edit_user::{AccountEdit, EditUserError, EditUserUseCase},
    forgot_password::{ForgotPasswordError, ForgotPasswordUseCase},
    get_user::{GetUserError, GetUserUseCase, UserProfile},
    login::{LoginCredentials, LoginError, LoginUseCase},
    promote_account::{AccountPromotion, PromoteAccountError, PromoteAccountUseCase},
    register::{NewAccount, RegisterError, RegisterUseCase},
    reset_password::{PasswordResetData, ResetPasswordError, ResetPasswordUseCase},
};
