use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use secrecy::{ExposeSecret, Secret};
use userhub_core::{Claims, TokenError, TokenIdentity, TokenKind, TokenService};

#[derive(Clone)]
pub struct JwtConfig {
    pub secret: Secret<String>,
    pub session_ttl_seconds: i64,
    pub registration_ttl_seconds: i64,
    pub reset_ttl_seconds: i64,
}

impl JwtConfig {
    fn ttl_for(&self, kind: TokenKind) -> i64 {
        match kind {
            TokenKind::Session => self.session_ttl_seconds,
            TokenKind::Registration => self.registration_ttl_seconds,
            TokenKind::PasswordReset => self.reset_ttl_seconds,
        }
    }
}

/// Stateless HS256 token service. Verification is pure signature + expiry
/// checking; there is no revocation path, which is the accepted trade-off for
/// the short configured lifetimes.
#[derive(Clone)]
pub struct JwtTokenService {
    config: JwtConfig,
}

impl JwtTokenService {
    pub fn new(config: JwtConfig) -> Self {
        Self { config }
    }
}

impl TokenService for JwtTokenService {
    fn issue(&self, identity: &TokenIdentity, kind: TokenKind) -> Result<String, TokenError> {
        let delta = chrono::Duration::try_seconds(self.config.ttl_for(kind)).ok_or(
            TokenError::Unexpected("failed to create token duration".to_string()),
        )?;

        let now = Utc::now();
        let exp = now
            .checked_add_signed(delta)
            .ok_or(TokenError::Unexpected("duration out of range".to_string()))?
            .timestamp();

        let exp: usize = exp
            .try_into()
            .map_err(|_| TokenError::Unexpected("failed to cast i64 to usize".to_string()))?;
        let iat: usize = now
            .timestamp()
            .try_into()
            .map_err(|_| TokenError::Unexpected("failed to cast i64 to usize".to_string()))?;

        let claims = Claims {
            sub: identity.username.as_str().to_owned(),
            status: identity.status,
            reset: kind == TokenKind::PasswordReset,
            iat,
            exp,
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.config.secret.expose_secret().as_bytes()),
        )
        .map_err(|e| TokenError::Unexpected(e.to_string()))
    }

    fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.secret.expose_secret().as_bytes()),
            &Validation::new(Algorithm::HS256),
        )
        .map(|data| data.claims)
        .map_err(|_| TokenError::InvalidToken)
    }
}

#[cfg(test)]
mod tests {
    use userhub_core::{AccountStatus, Username};

    use super::*;

    fn service() -> JwtTokenService {
        JwtTokenService::new(JwtConfig {
            secret: Secret::from("secret".to_owned()),
            session_ttl_seconds: 600,
            registration_ttl_seconds: 1200,
            reset_ttl_seconds: 300,
        })
    }

    fn identity(name: &str, status: AccountStatus) -> TokenIdentity {
        TokenIdentity {
            username: Username::parse(name).unwrap(),
            status,
        }
    }

    #[test]
    fn an_issued_token_is_a_three_part_jwt() {
        let token = service()
            .issue(&identity("alice", AccountStatus::Valid), TokenKind::Session)
            .unwrap();
        assert_eq!(token.split('.').count(), 3);
    }

    #[test]
    fn a_session_token_round_trips_its_claims() {
        let service = service();
        let token = service
            .issue(&identity("alice", AccountStatus::Valid), TokenKind::Session)
            .unwrap();

        let claims = service.verify(&token).unwrap();
        assert_eq!(claims.sub, "alice");
        assert_eq!(claims.status, AccountStatus::Valid);
        assert!(!claims.reset);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn only_reset_tokens_carry_the_reset_flag() {
        let service = service();
        for (kind, expected) in [
            (TokenKind::Session, false),
            (TokenKind::Registration, false),
            (TokenKind::PasswordReset, true),
        ] {
            let token = service.issue(&identity("alice", AccountStatus::Test), kind).unwrap();
            assert_eq!(service.verify(&token).unwrap().reset, expected);
        }
    }

    #[test]
    fn a_malformed_token_is_rejected() {
        let result = service().verify("not_a_token");
        assert!(matches!(result, Err(TokenError::InvalidToken)));
    }

    #[test]
    fn a_token_signed_with_another_secret_is_rejected() {
        let other = JwtTokenService::new(JwtConfig {
            secret: Secret::from("other-secret".to_owned()),
            session_ttl_seconds: 600,
            registration_ttl_seconds: 1200,
            reset_ttl_seconds: 300,
        });
        let token = other
            .issue(&identity("alice", AccountStatus::Valid), TokenKind::Session)
            .unwrap();

        let result = service().verify(&token);
        assert!(matches!(result, Err(TokenError::InvalidToken)));
    }

    #[test]
    fn an_expired_token_is_rejected() {
        // Past the decoder's default 60s leeway.
        let expired = JwtTokenService::new(JwtConfig {
            secret: Secret::from("secret".to_owned()),
            session_ttl_seconds: -3600,
            registration_ttl_seconds: 1200,
            reset_ttl_seconds: 300,
        });
        let token = expired
            .issue(&identity("alice", AccountStatus::Valid), TokenKind::Session)
            .unwrap();

        let result = service().verify(&token);
        assert!(matches!(result, Err(TokenError::InvalidToken)));
    }

    #[test]
    fn a_tampered_payload_is_rejected() {
        let service = service();
        let token = service
            .issue(&identity("alice", AccountStatus::Test), TokenKind::Session)
            .unwrap();

        let mut parts: Vec<String> = token.split('.').map(str::to_owned).collect();
        parts[1] = parts[1].replace('a', "b");
        let tampered = parts.join(".");

        assert!(matches!(service.verify(&tampered), Err(TokenError::InvalidToken)));
    }
}
