use userhub_core::{AccountStatus, EmailAddress, UserStore, UserStoreError, Username};

/// What the profile endpoint exposes. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub username: Username,
    pub email: Option<EmailAddress>,
    pub status: AccountStatus,
}

#[derive(Debug, thiserror::Error)]
pub enum GetUserError {
    #[error("user not found")]
    UserNotFound,
    #[error(transparent)]
    Store(#[from] UserStoreError),
}

/// Profile lookup use case
pub struct GetUserUseCase<'a, S>
where
    S: UserStore + ?Sized,
{
    store: &'a S,
}

impl<'a, S> GetUserUseCase<'a, S>
where
    S: UserStore + ?Sized,
{
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    #[tracing::instrument(name = "GetUserUseCase::execute", skip_all)]
    pub async fn execute(&self, username: &Username) -> Result<UserProfile, GetUserError> {
        let user = self
            .store
            .find_by_username(username)
            .await?
            .ok_or(GetUserError::UserNotFound)?;

        Ok(UserProfile {
            username: user.username().clone(),
            email: user.email().cloned(),
            status: user.status(),
        })
    }
}

#[cfg(test)]
mod tests {
    use userhub_core::User;

    use super::*;
    use crate::use_cases::support::{MockHasher, MockUserStore, email, username};

    #[tokio::test]
    async fn returns_the_profile_without_the_password_hash() {
        let store = MockUserStore::default();
        store
            .seed(User::new(
                username("alice"),
                Some(email("a@x.com")),
                MockHasher::stored_hash("secret1"),
            ))
            .await;
        let use_case = GetUserUseCase::new(&store);

        let profile = use_case.execute(&username("alice")).await.unwrap();

        assert_eq!(
            profile,
            UserProfile {
                username: username("alice"),
                email: Some(email("a@x.com")),
                status: AccountStatus::Valid,
            }
        );
    }

    #[tokio::test]
    async fn an_unknown_user_is_not_found() {
        let store = MockUserStore::default();
        let use_case = GetUserUseCase::new(&store);

        let result = use_case.execute(&username("ghost")).await;

        assert!(matches!(result, Err(GetUserError::UserNotFound)));
    }
}
