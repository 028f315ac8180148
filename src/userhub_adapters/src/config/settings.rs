use config::{Config, ConfigError};
use secrecy::Secret;
use serde::Deserialize;

use crate::config::constants::{defaults, env};

/// Process configuration, loaded once at startup. Every field has a
/// development default and can be overridden through `USERHUB__`-prefixed
/// environment variables (double underscore as the section separator).
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub postgres: PostgresSettings,
    pub auth: AuthSettings,
    pub email_client: EmailClientSettings,
    pub email_verifier: EmailVerifierSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationSettings {
    pub address: String,
    #[serde(default)]
    pub allowed_origins: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PostgresSettings {
    pub url: Secret<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthSettings {
    pub jwt_secret: Secret<String>,
    pub cookie_name: String,
    pub session_ttl_seconds: i64,
    pub registration_ttl_seconds: i64,
    pub reset_ttl_seconds: i64,
    pub token_transport: TokenTransport,
}

/// Which single channel carries the session credential. Reset tokens always
/// travel as a bearer header regardless of this setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenTransport {
    Cookie,
    Bearer,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmailClientSettings {
    pub base_url: String,
    pub sender: String,
    pub auth_token: Secret<String>,
    pub timeout_millis: u64,
    pub front_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmailVerifierSettings {
    pub enabled: bool,
    pub base_url: String,
    pub api_key: Secret<String>,
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Config::builder()
            .set_default("application.address", defaults::APP_ADDRESS)?
            .set_default("postgres.url", defaults::POSTGRES_URL)?
            .set_default("auth.jwt_secret", defaults::JWT_SECRET)?
            .set_default("auth.cookie_name", defaults::COOKIE_NAME)?
            .set_default("auth.session_ttl_seconds", defaults::SESSION_TTL_SECONDS)?
            .set_default(
                "auth.registration_ttl_seconds",
                defaults::REGISTRATION_TTL_SECONDS,
            )?
            .set_default("auth.reset_ttl_seconds", defaults::RESET_TTL_SECONDS)?
            .set_default("auth.token_transport", "cookie")?
            .set_default("email_client.base_url", defaults::email_client::BASE_URL)?
            .set_default("email_client.sender", defaults::email_client::SENDER)?
            .set_default("email_client.auth_token", "")?
            .set_default(
                "email_client.timeout_millis",
                defaults::email_client::TIMEOUT_MILLIS,
            )?
            .set_default("email_client.front_url", defaults::email_client::FRONT_URL)?
            .set_default("email_verifier.enabled", false)?
            .set_default(
                "email_verifier.base_url",
                defaults::email_verifier::BASE_URL,
            )?
            .set_default("email_verifier.api_key", "")?
            .add_source(
                config::Environment::with_prefix(env::PREFIX)
                    .prefix_separator(env::SEPARATOR)
                    .separator(env::SEPARATOR)
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

#[derive(Debug, Clone, Default)]
pub struct AllowedOrigins(Vec<String>);

impl AllowedOrigins {
    /// Parses the comma-separated origin list from the settings.
    pub fn parse(value: &str) -> Self {
        Self(
            value
                .split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(str::to_owned)
                .collect(),
        )
    }

    pub fn contains(&self, origin: &http::HeaderValue) -> bool {
        origin
            .to_str()
            .map(|value| self.0.iter().any(|allowed| allowed == value))
            .unwrap_or(false)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_produce_a_usable_configuration() {
        let settings = Settings::load().unwrap();
        assert_eq!(settings.auth.cookie_name, "userToken");
        assert_eq!(settings.auth.session_ttl_seconds, 86_400);
        assert_eq!(settings.auth.registration_ttl_seconds, 604_800);
        assert_eq!(settings.auth.reset_ttl_seconds, 3_600);
        assert_eq!(settings.auth.token_transport, TokenTransport::Cookie);
        assert!(!settings.email_verifier.enabled);
    }

    #[test]
    fn allowed_origins_parse_and_match() {
        let origins = AllowedOrigins::parse("https://a.example, https://b.example");
        assert!(origins.contains(&http::HeaderValue::from_static("https://a.example")));
        assert!(!origins.contains(&http::HeaderValue::from_static("https://c.example")));
        assert!(AllowedOrigins::parse("").is_empty());
    }
}
