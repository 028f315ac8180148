use reqwest::{Client, Url};
use secrecy::{ExposeSecret, Secret};
use userhub_core::{EmailAddress, EmailVerifier, EmailVerifierError};

/// Deliverability check against an Abstract-style validation API. Consulted
/// during registration only, and only when enabled in the settings.
pub struct AbstractEmailVerifier {
    http_client: Client,
    base_url: String,
    api_key: Secret<String>,
}

impl AbstractEmailVerifier {
    pub fn new(base_url: String, api_key: Secret<String>, http_client: Client) -> Self {
        Self {
            http_client,
            base_url,
            api_key,
        }
    }
}

#[async_trait::async_trait]
impl EmailVerifier for AbstractEmailVerifier {
    #[tracing::instrument(name = "Checking email deliverability", skip_all)]
    async fn check_deliverability(&self, email: &EmailAddress) -> Result<(), EmailVerifierError> {
        let url = Url::parse(&self.base_url)
            .map_err(|e| EmailVerifierError::Unexpected(e.to_string()))?;

        let response = self
            .http_client
            .get(url)
            .query(&[
                ("api_key", self.api_key.expose_secret().as_str()),
                ("email", email.as_str()),
            ])
            .send()
            .await
            .map_err(|e| EmailVerifierError::Unexpected(e.to_string()))?
            .error_for_status()
            .map_err(|e| EmailVerifierError::Unexpected(e.to_string()))?;

        let result: DeliverabilityResponse = response
            .json()
            .await
            .map_err(|e| EmailVerifierError::Unexpected(e.to_string()))?;

        if result.error.is_some() {
            return Err(EmailVerifierError::Unexpected(
                "deliverability check failed".to_string(),
            ));
        }
        if result.deliverability == UNDELIVERABLE {
            return Err(EmailVerifierError::Undeliverable);
        }

        Ok(())
    }
}

const UNDELIVERABLE: &str = "UNDELIVERABLE";

#[derive(serde::Deserialize, Debug)]
struct DeliverabilityResponse {
    #[serde(default)]
    deliverability: String,
    #[serde(default)]
    error: Option<serde_json::Value>,
}
