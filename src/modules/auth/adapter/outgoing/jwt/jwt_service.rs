use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use std::fmt;

use super::jwt_config::JwtConfig;
use crate::modules::auth::application::domain::entities::UserId;
use crate::modules::auth::application::ports::outgoing::token_provider::ACCESS_TOKEN_TYPE;
use crate::modules::auth::application::ports::outgoing::{TokenClaims, TokenError, TokenProvider};

#[derive(Clone)]
pub struct JwtTokenService {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

#[cfg(not(tarpaulin_include))]
impl fmt::Debug for JwtTokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtTokenService")
            .field("issuer", &self.config.issuer)
            .finish_non_exhaustive()
    }
}

impl JwtTokenService {
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret_key.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret_key.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    pub fn access_token_expiry(&self) -> i64 {
        self.config.access_token_expiry
    }

    fn sign(&self, claims: &TokenClaims) -> Result<String, TokenError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| TokenError::Encoding(e.to_string()))
    }
}

impl TokenProvider for JwtTokenService {
    fn issue_access_token(&self, user_id: UserId) -> Result<String, TokenError> {
        let now = Utc::now();
        let claims = TokenClaims {
            sub: user_id.value(),
            exp: (now + Duration::seconds(self.config.access_token_expiry)).timestamp(),
            iat: now.timestamp(),
            nbf: now.timestamp(),
            iss: self.config.issuer.clone(),
            token_type: ACCESS_TOKEN_TYPE.to_string(),
        };
        self.sign(&claims)
    }

    fn verify_token(&self, token: &str) -> Result<TokenClaims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 30;
        validation.validate_nbf = true;
        validation.set_issuer(&[self.config.issuer.as_str()]);

        decode::<TokenClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| {
                use jsonwebtoken::errors::ErrorKind;

                match e.kind() {
                    ErrorKind::ExpiredSignature => TokenError::Expired,
                    ErrorKind::ImmatureSignature => TokenError::NotYetValid,
                    ErrorKind::InvalidSignature => {
                        tracing::warn!("Token with invalid signature presented");
                        TokenError::InvalidSignature
                    }
                    _ => TokenError::Malformed,
                }
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn config(expiry: i64) -> JwtConfig {
        JwtConfig {
            secret_key: "test-secret-key-that-is-long-enough-for-hs256".to_string(),
            issuer: "bizdir-test".to_string(),
            access_token_expiry: expiry,
        }
    }

    #[test]
    fn issued_token_verifies_with_subject_and_type() {
        let service = JwtTokenService::new(config(3600));
        let user_id = UserId::from(Uuid::new_v4());

        let token = service.issue_access_token(user_id).unwrap();
        let claims = service.verify_token(&token).unwrap();

        assert_eq!(claims.user_id(), user_id);
        assert!(claims.is_access());
        assert_eq!(claims.iss, "bizdir-test");
    }

    #[test]
    fn expired_token_is_rejected() {
        let service = JwtTokenService::new(config(-120));
        let token = service
            .issue_access_token(UserId::from(Uuid::new_v4()))
            .unwrap();

        assert_eq!(service.verify_token(&token), Err(TokenError::Expired));
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let service = JwtTokenService::new(config(3600));
        let mut other_config = config(3600);
        other_config.secret_key = "another-secret-key-that-is-long-enough-too".to_string();
        let other = JwtTokenService::new(other_config);

        let token = other
            .issue_access_token(UserId::from(Uuid::new_v4()))
            .unwrap();

        assert_eq!(
            service.verify_token(&token),
            Err(TokenError::InvalidSignature)
        );
    }

    #[test]
    fn swapped_payload_fails_signature_check() {
        use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};

        let service = JwtTokenService::new(config(3600));
        let token = service
            .issue_access_token(UserId::from(Uuid::new_v4()))
            .unwrap();
        let parts: Vec<&str> = token.split('.').collect();

        let now = Utc::now().timestamp();
        let forged = URL_SAFE_NO_PAD.encode(
            serde_json::json!({
                "sub": Uuid::new_v4(),
                "exp": now + 3600,
                "iat": now,
                "nbf": now,
                "iss": "bizdir-test",
                "token_type": "access",
            })
            .to_string(),
        );
        let tampered = format!("{}.{}.{}", parts[0], forged, parts[2]);

        assert_eq!(
            service.verify_token(&tampered),
            Err(TokenError::InvalidSignature)
        );
    }

    #[test]
    fn garbage_is_malformed() {
        let service = JwtTokenService::new(config(3600));
        assert_eq!(service.verify_token("abc.def"), Err(TokenError::Malformed));
    }
}
