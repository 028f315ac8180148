use secrecy::ExposeSecret;
use sqlx::{PgPool, postgres::PgPoolOptions};
use userhub_adapters::Settings;

/// Configure and return a PostgreSQL connection pool
///
/// Creates the pool from the configured database URL and runs all pending
/// migrations.
///
/// # Panics
/// Panics if unable to create the pool or run migrations; the process cannot
/// serve requests without its store.
pub async fn configure_postgresql(settings: &Settings) -> PgPool {
    let pg_pool = get_postgres_pool(settings.postgres.url.expose_secret())
        .await
        .expect("Failed to create Postgres connection pool");

    sqlx::migrate!()
        .run(&pg_pool)
        .await
        .expect("Failed to run migrations");

    pg_pool
}

/// Create a PostgreSQL connection pool
pub async fn get_postgres_pool(url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new().max_connections(5).connect(url).await
}
