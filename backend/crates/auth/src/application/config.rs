//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::time::Duration;

use platform::cookie::CookieConfig;
use platform::token::{TokenError, TokenService};

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

/// Auth application configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// Token signing secret (process-wide)
    pub token_secret: Vec<u8>,
    /// HMAC algorithm name: HS256, HS384 or HS512
    pub token_algorithm: String,
    /// Access token lifetime
    pub access_token_ttl: Duration,
    /// Cookie carrying the access token
    pub cookie_name: String,
    /// Whether to require Secure cookie
    pub cookie_secure: bool,
    /// SameSite policy
    pub cookie_same_site: SameSite,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_secret: Vec::new(),
            token_algorithm: "HS256".to_string(),
            access_token_ttl: Duration::from_secs(30 * 60), // 30 minutes
            cookie_name: "access_token".to_string(),
            cookie_secure: true,
            cookie_same_site: SameSite::Lax,
            password_pepper: None,
        }
    }
}

impl AuthConfig {
    /// Create config with a random token secret (for development)
    pub fn with_random_secret() -> Self {
        use rand::RngCore;
        let mut secret = [0u8; 32];
        rand::rng().fill_bytes(&mut secret);
        Self {
            token_secret: secret.to_vec(),
            ..Default::default()
        }
    }

    /// Create config for development (insecure cookie)
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Self::with_random_secret()
        }
    }

    /// Build the token service from the configured secret and algorithm
    pub fn token_service(&self) -> Result<TokenService, TokenError> {
        let algorithm = self
            .token_algorithm
            .parse()
            .map_err(|_| TokenError::UnsupportedAlgorithm(self.token_algorithm.clone()))?;
        TokenService::new(&self.token_secret, algorithm)
    }

    /// Cookie settings for the access token, expiring with the token
    pub fn access_cookie(&self) -> CookieConfig {
        CookieConfig {
            name: self.cookie_name.clone(),
            secure: self.cookie_secure,
            http_only: true,
            same_site: self.cookie_same_site,
            path: "/".to_string(),
            max_age_secs: Some(
                i64::try_from(self.access_token_ttl.as_secs()).unwrap_or(i64::MAX),
            ),
        }
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("token_secret", &"[REDACTED]")
            .field("token_algorithm", &self.token_algorithm)
            .field("access_token_ttl", &self.access_token_ttl)
            .field("cookie_name", &self.cookie_name)
            .field("cookie_secure", &self.cookie_secure)
            .field("cookie_same_site", &self.cookie_same_site)
            .field("password_pepper", &self.password_pepper.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}
