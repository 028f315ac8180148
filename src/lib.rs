//! # Userhub - User Account Service Library
//!
//! This is a facade crate that re-exports all public APIs from the userhub
//! service components. Use this crate to get access to the whole account
//! backend in one place.
//!
//! ## Structure
//!
//! - **Core domain types**: `Username`, `EmailAddress`, `Password`, `User`, etc.
//! - **Ports**: `UserStore`, `CredentialHasher`, `TokenService`, `Mailer`, `EmailVerifier`
//! - **Use cases**: `LoginUseCase`, `RegisterUseCase`, etc.
//! - **Adapters**: `PostgresUserStore`, `JwtTokenService`, `PostmarkEmailClient`, etc.
//! - **Service**: `UserHubService` - The main entry point for the account service

// ============================================================================
// Core Domain Types
// ============================================================================

/// Core domain types and value objects
pub mod core {
    pub use userhub_core::*;
}

// Re-export most commonly used core types at the root level
pub use userhub_core::{
    AccountStatus, Claims, EmailAddress, Password, PasswordHash, TokenIdentity, TokenKind, User,
    UserError, Username,
};

// ============================================================================
// Ports (Capability Traits)
// ============================================================================

/// Port trait definitions
pub mod ports {
    pub use userhub_core::{
        CredentialHasher, EmailVerifier, EmailVerifierError, HasherError, Mailer, MailerError,
        TokenError, TokenService, UserStore, UserStoreError,
    };
}

// Re-export port traits at root level
pub use userhub_core::{
    CredentialHasher, EmailVerifier, EmailVerifierError, HasherError, Mailer, MailerError,
    TokenError, TokenService, UserStore, UserStoreError,
};

// ============================================================================
// Use Cases (Application Layer)
// ============================================================================

/// Application use cases
pub mod use_cases {
    pub use userhub_application::*;
}

// Re-export use cases at root level
pub use userhub_application::{
    DeleteUserUseCase, EditUserUseCase, ForgotPasswordUseCase, GetUserUseCase, LoginUseCase,
    PromoteAccountUseCase, RegisterUseCase, ResetPasswordUseCase,
};

// ============================================================================
// Adapters (Infrastructure)
// ============================================================================

/// Infrastructure adapters
pub mod adapters {
    /// Persistence implementations
    pub mod persistence {
        pub use userhub_adapters::persistence::*;
    }

    /// Email client implementations
    pub mod email {
        pub use userhub_adapters::email::*;
    }

    /// Password hashing and token services
    pub mod security {
        pub use userhub_adapters::security::*;
    }

    /// Configuration
    pub mod config {
        pub use userhub_adapters::config::*;
    }
}

// Re-export commonly used adapters at root level
pub use userhub_adapters::{
    AbstractEmailVerifier, Argon2CredentialHasher, InMemoryUserStore, JwtConfig, JwtTokenService,
    MockEmailClient, PostgresUserStore, PostmarkEmailClient, Settings, TokenTransport,
};

// ============================================================================
// HTTP Surface
// ============================================================================

/// Axum routes, request gate, and the HTTP error boundary
pub mod http_surface {
    pub use userhub_axum::*;
}

pub use userhub_axum::{ApiError, AppState, AuthConfig, AuthenticatedUser};

// ============================================================================
// Service (Main Entry Point)
// ============================================================================

/// Main account service
pub use userhub_service::{UserHubService, configure_postgresql, get_postgres_pool};

// ============================================================================
// Re-export common external dependencies
// ============================================================================

/// Re-export async-trait for implementing port traits
pub use async_trait::async_trait;

/// Re-export secrecy for working with secrets
pub use secrecy::{ExposeSecret, Secret};

pub use http;
