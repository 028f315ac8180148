//! Axum HTTP surface for the userhub account backend.
//!
//! Handlers stay thin: they parse the raw payload into domain types, run the
//! matching use case from `userhub_application`, and translate the outcome
//! through [`error::ApiError`]. The request gate lives in [`middleware`] and
//! injects the authenticated identity for the protected routes.

pub mod cookies;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod routes;
pub mod state;

// Re-export for convenience
pub use error::ApiError;
pub use extract::AuthenticatedUser;
pub use state::{AppState, AuthConfig};
