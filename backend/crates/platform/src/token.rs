//! Bearer Token Service
//!
//! Stateless, signed, time-limited access tokens (JWT, HMAC family).
//! Payload is exactly `{ sub, exp }`; validity is decided by signature and
//! expiry alone. There is no revocation: a token stays valid until `exp`.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Token service errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// Malformed, tampered, expired, or subject-less token.
    /// Deliberately carries no detail.
    #[error("Invalid token")]
    Invalid,

    #[error("Signing key must not be empty")]
    EmptySecret,

    #[error("Unsupported signing algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("Token signing failed: {0}")]
    Signing(String),
}

/// Registered claims carried by an access token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user id)
    pub sub: String,
    /// Expiry, unix seconds
    pub exp: i64,
}

/// Issues and verifies access tokens with one process-wide key
#[derive(Clone)]
pub struct TokenService {
    algorithm: Algorithm,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl TokenService {
    /// Build from a raw secret and an HMAC algorithm
    pub fn new(secret: &[u8], algorithm: Algorithm) -> Result<Self, TokenError> {
        if secret.is_empty() {
            return Err(TokenError::EmptySecret);
        }
        if !matches!(
            algorithm,
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512
        ) {
            return Err(TokenError::UnsupportedAlgorithm(format!("{algorithm:?}")));
        }

        Ok(Self {
            algorithm,
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
        })
    }

    /// Build from configuration strings, e.g. `("s3cr3t", "HS256")`
    pub fn from_config(secret: &str, algorithm: &str) -> Result<Self, TokenError> {
        let algorithm = Algorithm::from_str(algorithm.trim())
            .map_err(|_| TokenError::UnsupportedAlgorithm(algorithm.to_string()))?;
        Self::new(secret.as_bytes(), algorithm)
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Sign a token for `subject`, valid for `ttl` from now
    pub fn issue(&self, subject: &str, ttl: Duration) -> Result<String, TokenError> {
        let ttl_secs = i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX);
        let claims = Claims {
            sub: subject.to_string(),
            exp: Utc::now().timestamp().saturating_add(ttl_secs),
        };

        encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Verify signature and expiry, returning the subject
    ///
    /// Expiry is strict: the token is valid only while `now < exp`.
    pub fn verify(&self, token: &str) -> Result<String, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        let claims = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|_| TokenError::Invalid)?
            .claims;

        if claims.exp <= Utc::now().timestamp() || claims.sub.is_empty() {
            return Err(TokenError::Invalid);
        }

        Ok(claims.sub)
    }
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService")
            .field("algorithm", &self.algorithm)
            .field("key", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test-secret-key-that-is-at-least-32-chars";

    fn service() -> TokenService {
        TokenService::new(SECRET, Algorithm::HS256).unwrap()
    }

    #[test]
    fn test_issue_then_verify_returns_subject() {
        let tokens = service();
        let token = tokens.issue("user-123", Duration::from_secs(60)).unwrap();
        assert_eq!(tokens.verify(&token).unwrap(), "user-123");
    }

    #[test]
    fn test_zero_ttl_is_immediately_invalid() {
        let tokens = service();
        let token = tokens.issue("user-123", Duration::ZERO).unwrap();
        assert_eq!(tokens.verify(&token), Err(TokenError::Invalid));
    }

    #[test]
    fn test_expired_token_is_invalid() {
        let tokens = service();
        let claims = Claims {
            sub: "user-123".to_string(),
            exp: Utc::now().timestamp() - 30,
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &tokens.encoding_key).unwrap();
        assert_eq!(tokens.verify(&token), Err(TokenError::Invalid));
    }

    #[test]
    fn test_wrong_secret_is_invalid() {
        let issuer = TokenService::new(b"secret-one-that-is-32-chars-long", Algorithm::HS256).unwrap();
        let verifier =
            TokenService::new(b"secret-two-that-is-32-chars-long", Algorithm::HS256).unwrap();
        let token = issuer.issue("user-123", Duration::from_secs(60)).unwrap();
        assert_eq!(verifier.verify(&token), Err(TokenError::Invalid));
    }

    #[test]
    fn test_malformed_and_tampered_tokens_are_invalid() {
        let tokens = service();
        assert_eq!(tokens.verify(""), Err(TokenError::Invalid));
        assert_eq!(tokens.verify("invalid.token.here"), Err(TokenError::Invalid));

        let token = tokens.issue("user-123", Duration::from_secs(60)).unwrap();
        let mut tampered = token.clone();
        tampered.push('x');
        assert_eq!(tokens.verify(&tampered), Err(TokenError::Invalid));
    }

    #[test]
    fn test_algorithm_mismatch_is_invalid() {
        let hs384 = TokenService::new(SECRET, Algorithm::HS384).unwrap();
        let token = hs384.issue("user-123", Duration::from_secs(60)).unwrap();
        assert_eq!(service().verify(&token), Err(TokenError::Invalid));
    }

    #[test]
    fn test_missing_subject_is_invalid() {
        #[derive(Serialize)]
        struct NoSubject {
            exp: i64,
        }

        let tokens = service();
        let claims = NoSubject {
            exp: Utc::now().timestamp() + 60,
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &tokens.encoding_key).unwrap();
        assert_eq!(tokens.verify(&token), Err(TokenError::Invalid));

        let empty = tokens.issue("", Duration::from_secs(60)).unwrap();
        assert_eq!(tokens.verify(&empty), Err(TokenError::Invalid));
    }

    #[test]
    fn test_payload_shape() {
        use base64::Engine;
        use base64::engine::general_purpose::URL_SAFE_NO_PAD;

        let token = service().issue("abc", Duration::from_secs(60)).unwrap();
        let segment = token.split('.').nth(1).unwrap();
        let bytes = URL_SAFE_NO_PAD.decode(segment).unwrap();
        let payload: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(payload["sub"], "abc");
        assert!(payload["exp"].is_i64());
        assert_eq!(payload.as_object().unwrap().len(), 2);
    }

    #[test]
    fn test_from_config() {
        assert!(TokenService::from_config("secret", "HS256").is_ok());
        assert!(TokenService::from_config("secret", "HS512").is_ok());
        assert_eq!(
            TokenService::from_config("", "HS256").unwrap_err(),
            TokenError::EmptySecret
        );
        assert!(matches!(
            TokenService::from_config("secret", "RS256"),
            Err(TokenError::UnsupportedAlgorithm(_))
        ));
        assert!(matches!(
            TokenService::from_config("secret", "nope"),
            Err(TokenError::UnsupportedAlgorithm(_))
        ));
    }
}
