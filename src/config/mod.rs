//! Configuration module for the EPIC gateway.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use crate::errors::AppError;
use crate::imaging::{Quality, ResizePolicy};

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the content backend
    pub backend_url: String,
    /// Timeout applied to every backend request
    pub backend_timeout: Duration,
    /// Secret used to sign admin session tokens (random per process when unset)
    pub session_secret: Option<String>,
    /// Lifetime of an admin session
    pub session_ttl: Duration,
    /// Mark the session cookie `Secure`
    pub secure_cookies: bool,
    /// Quality used when a form does not say otherwise
    pub default_image_quality: Quality,
    /// Optional cap on the longest edge of compressed images
    pub resize_policy: ResizePolicy,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let backend_url = env::var("EPIC_BACKEND_URL")
            .unwrap_or_else(|_| "http://127.0.0.1:5000".to_string())
            .trim_end_matches('/')
            .to_string();

        let backend_timeout = Duration::from_secs(parse_var("EPIC_BACKEND_TIMEOUT_SECS", 30)?);

        let session_secret = env::var("EPIC_SESSION_SECRET")
            .ok()
            .filter(|s| !s.is_empty());

        let session_ttl = Duration::from_secs(parse_var("EPIC_SESSION_TTL_SECS", 8 * 60 * 60)?);

        let secure_cookies = parse_var("EPIC_SECURE_COOKIES", false)?;

        let default_image_quality = Quality::clamped(parse_var("EPIC_IMAGE_QUALITY", 80i64)?);

        let max_dimension = match env::var("EPIC_IMAGE_MAX_DIMENSION") {
            Ok(raw) if !raw.is_empty() => Some(raw.parse::<u32>().map_err(|_| {
                AppError::Config(format!("Invalid EPIC_IMAGE_MAX_DIMENSION: {}", raw))
            })?),
            _ => None,
        };

        let bind_addr = env::var("EPIC_BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8080".to_string());
        let bind_addr = bind_addr
            .parse()
            .map_err(|_| AppError::Config(format!("Invalid EPIC_BIND_ADDR: {}", bind_addr)))?;

        let log_level = env::var("EPIC_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            backend_url,
            backend_timeout,
            session_secret,
            session_ttl,
            secure_cookies,
            default_image_quality,
            resize_policy: ResizePolicy { max_dimension },
            bind_addr,
            log_level,
        })
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> Result<T, AppError> {
    match env::var(name) {
        Ok(raw) if !raw.is_empty() => raw
            .parse()
            .map_err(|_| AppError::Config(format!("Invalid {}: {}", name, raw))),
        _ => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VARS: &[&str] = &[
        "EPIC_BACKEND_URL",
        "EPIC_BACKEND_TIMEOUT_SECS",
        "EPIC_SESSION_SECRET",
        "EPIC_SESSION_TTL_SECS",
        "EPIC_SECURE_COOKIES",
        "EPIC_IMAGE_QUALITY",
        "EPIC_IMAGE_MAX_DIMENSION",
        "EPIC_BIND_ADDR",
        "EPIC_LOG_LEVEL",
    ];

    // Both cases live in one test so they never race on the process environment.
    #[test]
    fn test_config_from_env() {
        for var in VARS {
            env::remove_var(var);
        }

        let config = Config::from_env().unwrap();

        assert_eq!(config.backend_url, "http://127.0.0.1:5000");
        assert_eq!(config.backend_timeout, Duration::from_secs(30));
        assert!(config.session_secret.is_none());
        assert_eq!(config.session_ttl, Duration::from_secs(28800));
        assert!(!config.secure_cookies);
        assert_eq!(config.default_image_quality.get(), 80);
        assert_eq!(config.resize_policy.max_dimension, None);
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:8080");
        assert_eq!(config.log_level, "info");

        env::set_var("EPIC_BACKEND_URL", "http://backend.local:5000/");
        env::set_var("EPIC_IMAGE_QUALITY", "250");
        env::set_var("EPIC_IMAGE_MAX_DIMENSION", "1920");
        let config = Config::from_env().unwrap();
        assert_eq!(config.backend_url, "http://backend.local:5000");
        assert_eq!(config.default_image_quality.get(), 100);
        assert_eq!(config.resize_policy.max_dimension, Some(1920));

        env::set_var("EPIC_BIND_ADDR", "not-an-address");
        let err = Config::from_env().unwrap_err();
        assert_eq!(err.error_code(), "CONFIG_ERROR");

        for var in VARS {
            env::remove_var(var);
        }
    }
}
