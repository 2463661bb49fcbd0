//! Server configuration from the environment
//!
//! `.env` is loaded by `main` before `ApiConfig::from_env` runs.

use std::env;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, bail};
use auth::AuthConfig;
use platform::cache::{CacheConfig, DEFAULT_MAX_ENTRIES, DEFAULT_TTL};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
const DEFAULT_CORS_ORIGINS: &str = "http://localhost:3000,http://127.0.0.1:3000";

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub database_url: String,
    pub database_max_connections: u32,
    pub bind_addr: SocketAddr,
    pub cors_origins: Vec<String>,
    pub cache: CacheConfig,
    pub auth: AuthConfig,
}

impl ApiConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

        let cors_origins = env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| DEFAULT_CORS_ORIGINS.to_string())
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect();

        let cache = CacheConfig {
            ttl: parse_or("CACHE_TTL_SECS", DEFAULT_TTL.as_secs()).map(Duration::from_secs)?,
            max_entries: parse_or("CACHE_MAX_ENTRIES", DEFAULT_MAX_ENTRIES)?,
        };

        Ok(Self {
            database_url,
            database_max_connections: parse_or("DATABASE_MAX_CONNECTIONS", 5)?,
            bind_addr: parse_or("BIND_ADDR", DEFAULT_BIND_ADDR.parse()?)?,
            cors_origins,
            cache,
            auth: auth_from_env()?,
        })
    }
}

fn auth_from_env() -> anyhow::Result<AuthConfig> {
    // Debug builds fall back to a per-process secret and plain-HTTP cookies
    let base = if cfg!(debug_assertions) {
        AuthConfig::development()
    } else {
        AuthConfig::default()
    };

    let token_secret = match env::var("SECRET_KEY") {
        Ok(secret) if !secret.is_empty() => secret.into_bytes(),
        _ if cfg!(debug_assertions) => {
            tracing::warn!("SECRET_KEY not set, using a random secret; tokens die with the process");
            base.token_secret.clone()
        }
        _ => bail!("SECRET_KEY must be set in release builds"),
    };

    let minutes: u64 = parse_or(
        "ACCESS_TOKEN_EXPIRE_MINUTES",
        base.access_token_ttl.as_secs() / 60,
    )?;

    let access_token_ttl = token_ttl(minutes)?;

    let config = AuthConfig {
        token_secret,
        token_algorithm: env::var("ALGORITHM").unwrap_or(base.token_algorithm.clone()),
        access_token_ttl,
        cookie_name: env::var("ACCESS_TOKEN_COOKIE").unwrap_or(base.cookie_name.clone()),
        cookie_secure: parse_or("COOKIE_SECURE", base.cookie_secure)?,
        password_pepper: env::var("PASSWORD_PEPPER")
            .ok()
            .filter(|pepper| !pepper.is_empty())
            .map(String::into_bytes),
        ..base
    };

    // Surface a bad ALGORITHM at startup rather than on first login
    config
        .token_service()
        .context("invalid token configuration")?;

    Ok(config)
}

fn token_ttl(minutes: u64) -> anyhow::Result<Duration> {
    minutes
        .checked_mul(60)
        .map(Duration::from_secs)
        .with_context(|| format!("ACCESS_TOKEN_EXPIRE_MINUTES is too large: {minutes}"))
}

fn parse_or<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} has an invalid value: {raw:?}")),
        Err(_) => Ok(default),
    }
}
