use chrono::{DateTime, Utc};
use secrecy::ExposeSecret;
use sqlx::{PgPool, Pool, Postgres, Row, postgres::PgRow};
use userhub_core::{
    AccountStatus, EmailAddress, PasswordHash, User, UserStore, UserStoreError, Username,
};

pub struct PostgresUserStore {
    pool: PgPool,
}

impl PostgresUserStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        PostgresUserStore { pool }
    }
}

#[async_trait::async_trait]
impl UserStore for PostgresUserStore {
    #[tracing::instrument(name = "Adding user to PostgreSQL", skip_all)]
    async fn create_user(&self, user: User) -> Result<(), UserStoreError> {
        sqlx::query(
            r#"
                INSERT INTO users (username, email, password_hash, status, created_at)
                VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(user.username().as_str())
        .bind(user.email().map(EmailAddress::as_str))
        .bind(user.password_hash().as_secret().expose_secret())
        .bind(user.status().as_str())
        .bind(user.created_at())
        .execute(&self.pool)
        .await
        .map_err(into_store_error)?;

        Ok(())
    }

    #[tracing::instrument(name = "Finding user by username in PostgreSQL", skip_all)]
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserStoreError> {
        let row = sqlx::query(
            r#"
                SELECT username, email, password_hash, status, created_at
                FROM users
                WHERE username = $1
            "#,
        )
        .bind(username.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(into_store_error)?;

        row.map(parse_user_row).transpose()
    }

    #[tracing::instrument(name = "Finding user by email in PostgreSQL", skip_all)]
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserStoreError> {
        let row = sqlx::query(
            r#"
                SELECT username, email, password_hash, status, created_at
                FROM users
                WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(into_store_error)?;

        row.map(parse_user_row).transpose()
    }

    #[tracing::instrument(name = "Updating email in PostgreSQL", skip_all)]
    async fn update_email(
        &self,
        username: &Username,
        email: &EmailAddress,
    ) -> Result<(), UserStoreError> {
        let result = sqlx::query(
            r#"
                UPDATE users
                SET email = $2
                WHERE username = $1
            "#,
        )
        .bind(username.as_str())
        .bind(email.as_str())
        .execute(&self.pool)
        .await
        .map_err(into_store_error)?;

        if result.rows_affected() == 0 {
            return Err(UserStoreError::UserNotFound);
        }
        Ok(())
    }

    #[tracing::instrument(name = "Updating password in PostgreSQL", skip_all)]
    async fn update_password(
        &self,
        username: &Username,
        password_hash: PasswordHash,
    ) -> Result<(), UserStoreError> {
        let result = sqlx::query(
            r#"
                UPDATE users
                SET password_hash = $2
                WHERE username = $1
            "#,
        )
        .bind(username.as_str())
        .bind(password_hash.as_secret().expose_secret())
        .execute(&self.pool)
        .await
        .map_err(into_store_error)?;

        if result.rows_affected() == 0 {
            return Err(UserStoreError::UserNotFound);
        }
        Ok(())
    }

    #[tracing::instrument(name = "Promoting test account in PostgreSQL", skip_all)]
    async fn promote_test_account(
        &self,
        username: &Username,
        email: &EmailAddress,
    ) -> Result<(), UserStoreError> {
        let result = sqlx::query(
            r#"
                UPDATE users
                SET email = $2, status = 'valid'
                WHERE username = $1 AND status = 'test'
            "#,
        )
        .bind(username.as_str())
        .bind(email.as_str())
        .execute(&self.pool)
        .await
        .map_err(into_store_error)?;

        if result.rows_affected() == 0 {
            return Err(UserStoreError::UserNotFound);
        }
        Ok(())
    }

    #[tracing::instrument(name = "Deleting user from PostgreSQL", skip_all)]
    async fn delete_user(&self, username: &Username) -> Result<(), UserStoreError> {
        let result = sqlx::query(
            r#"
                DELETE FROM users
                WHERE username = $1
            "#,
        )
        .bind(username.as_str())
        .execute(&self.pool)
        .await
        .map_err(into_store_error)?;

        if result.rows_affected() == 0 {
            return Err(UserStoreError::UserNotFound);
        }
        Ok(())
    }
}

/// Duplicate-key conditions become conflicts naming the offending field; any
/// other database failure is normalized to an unexpected store error.
fn into_store_error(error: sqlx::Error) -> UserStoreError {
    if let sqlx::Error::Database(db_err) = &error {
        if db_err.is_unique_violation() {
            let field = if db_err.constraint().is_some_and(|c| c.contains("email")) {
                "email"
            } else {
                "username"
            };
            return UserStoreError::DuplicateField(field);
        }
    }
    UserStoreError::Unexpected(error.to_string())
}

fn parse_user_row(row: PgRow) -> Result<User, UserStoreError> {
    let username: String = row
        .try_get("username")
        .map_err(|e| UserStoreError::Unexpected(e.to_string()))?;
    let email: Option<String> = row
        .try_get("email")
        .map_err(|e| UserStoreError::Unexpected(e.to_string()))?;
    let password_hash: String = row
        .try_get("password_hash")
        .map_err(|e| UserStoreError::Unexpected(e.to_string()))?;
    let status: String = row
        .try_get("status")
        .map_err(|e| UserStoreError::Unexpected(e.to_string()))?;
    let created_at: DateTime<Utc> = row
        .try_get("created_at")
        .map_err(|e| UserStoreError::Unexpected(e.to_string()))?;

    let username = Username::parse(&username)
        .map_err(|e| UserStoreError::Unexpected(e.to_string()))?;
    let email = email
        .as_deref()
        .map(EmailAddress::parse)
        .transpose()
        .map_err(|e| UserStoreError::Unexpected(e.to_string()))?;
    let status: AccountStatus = status.parse().map_err(UserStoreError::Unexpected)?;

    Ok(User::from_parts(
        username,
        email,
        PasswordHash::from(password_hash),
        status,
        created_at,
    ))
}
