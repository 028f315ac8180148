use reqwest::{Client, Url};
use secrecy::{ExposeSecret, Secret};
use userhub_core::{EmailAddress, Mailer, MailerError};

/// Sends the password-reset mail through Postmark. The reset token is only
/// ever embedded in the link; it is not logged and not persisted.
pub struct PostmarkEmailClient {
    http_client: Client,
    base_url: String,
    sender: EmailAddress,
    authorization_token: Secret<String>,
    front_url: String,
}

impl PostmarkEmailClient {
    pub fn new(
        base_url: String,
        sender: EmailAddress,
        authorization_token: Secret<String>,
        front_url: String,
        http_client: Client,
    ) -> Self {
        Self {
            http_client,
            base_url,
            sender,
            authorization_token,
            front_url,
        }
    }

    fn reset_body(&self, recipient: &EmailAddress, token: &str) -> String {
        format!(
            r#"Hello {recipient},
<br />
<br />

A request has been received to change the password for your account.
<br />
If you did not initiate this request, ignore this email.
<br />
<br />
<br />

<a href="{front_url}/reset/{token}"><strong>RESET PASSWORD</strong></a>!
<br />
<br />
<br />

<strong>Do not reply to this email!</strong>
"#,
            recipient = recipient.as_str(),
            front_url = self.front_url,
        )
    }
}

#[async_trait::async_trait]
impl Mailer for PostmarkEmailClient {
    #[tracing::instrument(name = "Sending password reset email", skip_all)]
    async fn send_password_reset(
        &self,
        recipient: &EmailAddress,
        token: &str,
    ) -> Result<(), MailerError> {
        let base = Url::parse(&self.base_url).map_err(|e| MailerError::Unexpected(e.to_string()))?;
        let url = base
            .join("/email")
            .map_err(|e| MailerError::Unexpected(e.to_string()))?;

        let html_body = self.reset_body(recipient, token);
        let request_body = SendEmailRequest {
            from: self.sender.as_str(),
            to: recipient.as_str(),
            subject: "Forgot Password",
            html_body: &html_body,
            text_body: "Reset your password",
            message_stream: MESSAGE_STREAM,
        };

        let request = self
            .http_client
            .post(url)
            .header(
                POSTMARK_AUTH_HEADER,
                self.authorization_token.expose_secret(),
            )
            .json(&request_body);

        request
            .send()
            .await
            .map_err(|_| MailerError::DeliveryFailed)?
            .error_for_status()
            .map_err(|_| MailerError::DeliveryFailed)?;

        Ok(())
    }
}

const MESSAGE_STREAM: &str = "outbound";
const POSTMARK_AUTH_HEADER: &str = "X-Postmark-Server-Token";

#[derive(serde::Serialize, Debug)]
#[serde(rename_all = "PascalCase")]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    html_body: &'a str,
    text_body: &'a str,
    message_stream: &'a str,
}

#[cfg(test)]
mod tests {
    use fake::Fake;
    use fake::faker::internet::en::SafeEmail;
    use wiremock::matchers::{header_exists, method, path};
    use wiremock::{Mock, MockServer, Request, ResponseTemplate};

    use super::*;

    fn client(base_url: String) -> PostmarkEmailClient {
        PostmarkEmailClient::new(
            base_url,
            EmailAddress::parse("noreply@userhub.test").unwrap(),
            Secret::from("postmark-token".to_owned()),
            "https://app.userhub.test".to_owned(),
            Client::new(),
        )
    }

    fn random_recipient() -> EmailAddress {
        let address: String = SafeEmail().fake();
        EmailAddress::parse(&address).unwrap()
    }

    fn body_field(request: &Request, field: &str) -> String {
        let body: serde_json::Value = serde_json::from_slice(&request.body).unwrap();
        body[field].as_str().unwrap_or_default().to_owned()
    }

    #[tokio::test]
    async fn delivers_the_token_inside_the_reset_link() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/email"))
            .and(header_exists(POSTMARK_AUTH_HEADER))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&mock_server)
            .await;

        let recipient = random_recipient();
        client(mock_server.uri())
            .send_password_reset(&recipient, "reset-token-123")
            .await
            .unwrap();

        let requests = mock_server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(body_field(&requests[0], "To"), recipient.as_str());
        assert!(body_field(&requests[0], "HtmlBody")
            .contains("https://app.userhub.test/reset/reset-token-123"));
    }

    #[tokio::test]
    async fn a_provider_failure_is_a_delivery_error() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/email"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let result = client(mock_server.uri())
            .send_password_reset(&random_recipient(), "reset-token-123")
            .await;

        assert!(matches!(result, Err(MailerError::DeliveryFailed)));
    }
}
