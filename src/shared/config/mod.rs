//! Application configuration module
//!
//! `AppConfig` collects every tunable of the server: listen port, database
//! URL, token secrets and lifetimes, cookie and upload settings, and the
//! optional Cloudinary credentials. It is loaded from the environment by the
//! binary (after `dotenv`) and assembled with `AppConfig::builder()` in tests.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_ACCESS_TTL: Duration = Duration::from_secs(24 * 60 * 60);
const DEFAULT_REFRESH_TTL: Duration = Duration::from_secs(10 * 24 * 60 * 60);
const DEFAULT_BCRYPT_COST: u32 = 10;
const DEFAULT_UPLOAD_LIMIT: usize = 10 * 1024 * 1024;
const DEFAULT_CLOUDINARY_BASE: &str = "https://api.cloudinary.com";

/// Cloudinary credentials
#[derive(Clone)]
pub struct CloudinaryConfig {
    /// Cloud name, part of the API path
    pub cloud_name: String,
    /// Public API key
    pub api_key: String,
    /// API secret used to sign requests
    pub api_secret: String,
    /// API base URL (overridden in tests)
    pub base_url: String,
}

impl std::fmt::Debug for CloudinaryConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudinaryConfig")
            .field("cloud_name", &self.cloud_name)
            .field("api_key", &self.api_key)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

/// Application configuration
#[derive(Clone)]
pub struct AppConfig {
    /// Listen port
    pub port: u16,
    /// PostgreSQL URL; `None` selects the in-memory user store
    pub database_url: Option<String>,
    /// Allowed CORS origin; `None` mirrors the request origin
    pub cors_origin: Option<String>,
    /// Secret for access tokens
    pub access_token_secret: String,
    /// Lifetime of access tokens
    pub access_token_ttl: Duration,
    /// Secret for refresh tokens
    pub refresh_token_secret: String,
    /// Lifetime of refresh tokens
    pub refresh_token_ttl: Duration,
    /// bcrypt cost factor
    pub bcrypt_cost: u32,
    /// `Secure` flag on session cookies
    pub cookie_secure: bool,
    /// Where multipart uploads are staged before hand-off
    pub upload_temp_dir: PathBuf,
    /// Root of the static file tree served under `/static`
    pub public_dir: PathBuf,
    /// Base URL used to build links to locally stored media
    pub public_base_url: String,
    /// Body limit for multipart routes
    pub upload_limit_bytes: usize,
    /// Cloudinary credentials; `None` stores media locally
    pub cloudinary: Option<CloudinaryConfig>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // secrets and the database URL (may embed a password) are left out
        f.debug_struct("AppConfig")
            .field("port", &self.port)
            .field("database", &self.database_url.is_some())
            .field("cors_origin", &self.cors_origin)
            .field("access_token_ttl", &self.access_token_ttl)
            .field("refresh_token_ttl", &self.refresh_token_ttl)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .field("cookie_secure", &self.cookie_secure)
            .field("upload_temp_dir", &self.upload_temp_dir)
            .field("public_dir", &self.public_dir)
            .field("public_base_url", &self.public_base_url)
            .field("upload_limit_bytes", &self.upload_limit_bytes)
            .field("cloudinary", &self.cloudinary)
            .finish()
    }
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Load configuration from process environment variables
    ///
    /// `ACCESS_TOKEN_SECRET` and `REFRESH_TOKEN_SECRET` are required; every
    /// other variable has a default. Empty variables count as unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut builder = AppConfig::builder();

        if let Some(port) = env_var("PORT") {
            builder = builder.port(parse_number("PORT", &port)?);
        }
        if let Some(url) = env_var("DATABASE_URL") {
            builder = builder.database_url(url);
        }
        if let Some(origin) = env_var("CORS_ORIGIN") {
            builder = builder.cors_origin(origin);
        }
        if let Some(secret) = env_var("ACCESS_TOKEN_SECRET") {
            builder = builder.access_token_secret(secret);
        }
        if let Some(ttl) = env_var("ACCESS_TOKEN_EXPIRY") {
            builder = builder.access_token_ttl(parse_duration("ACCESS_TOKEN_EXPIRY", &ttl)?);
        }
        if let Some(secret) = env_var("REFRESH_TOKEN_SECRET") {
            builder = builder.refresh_token_secret(secret);
        }
        if let Some(ttl) = env_var("REFRESH_TOKEN_EXPIRY") {
            builder = builder.refresh_token_ttl(parse_duration("REFRESH_TOKEN_EXPIRY", &ttl)?);
        }
        if let Some(cost) = env_var("BCRYPT_COST") {
            builder = builder.bcrypt_cost(parse_number("BCRYPT_COST", &cost)?);
        }
        if let Some(secure) = env_var("COOKIE_SECURE") {
            builder = builder.cookie_secure(parse_bool("COOKIE_SECURE", &secure)?);
        }
        if let Some(dir) = env_var("UPLOAD_TEMP_DIR") {
            builder = builder.upload_temp_dir(dir);
        }
        if let Some(dir) = env_var("PUBLIC_DIR") {
            builder = builder.public_dir(dir);
        }
        if let Some(url) = env_var("PUBLIC_BASE_URL") {
            builder = builder.public_base_url(url);
        }
        if let Some(limit) = env_var("UPLOAD_LIMIT_BYTES") {
            builder = builder.upload_limit_bytes(parse_number("UPLOAD_LIMIT_BYTES", &limit)?);
        }

        let cloud_name = env_var("CLOUDINARY_CLOUD_NAME");
        let api_key = env_var("CLOUDINARY_API_KEY");
        let api_secret = env_var("CLOUDINARY_API_SECRET");
        match (cloud_name, api_key, api_secret) {
            (Some(cloud_name), Some(api_key), Some(api_secret)) => {
                builder = builder.cloudinary(CloudinaryConfig {
                    cloud_name,
                    api_key,
                    api_secret,
                    base_url: env_var("CLOUDINARY_BASE_URL")
                        .unwrap_or_else(|| DEFAULT_CLOUDINARY_BASE.to_string()),
                });
            }
            (None, None, None) => {}
            _ => return Err(ConfigError::MissingValue("CLOUDINARY_CLOUD_NAME/API_KEY/API_SECRET")),
        }

        builder.build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.access_token_secret.is_empty() {
            return Err(ConfigError::MissingValue("ACCESS_TOKEN_SECRET"));
        }
        if self.refresh_token_secret.is_empty() {
            return Err(ConfigError::MissingValue("REFRESH_TOKEN_SECRET"));
        }
        if self.access_token_secret == self.refresh_token_secret {
            return Err(ConfigError::SharedSecret);
        }
        // JWT `exp` has whole-second resolution
        for (key, ttl) in [
            ("ACCESS_TOKEN_EXPIRY", self.access_token_ttl),
            ("REFRESH_TOKEN_EXPIRY", self.refresh_token_ttl),
        ] {
            if ttl < Duration::from_secs(1) {
                return Err(ConfigError::InvalidDuration {
                    key,
                    value: humantime::format_duration(ttl).to_string(),
                });
            }
        }
        if !(4..=31).contains(&self.bcrypt_cost) {
            return Err(ConfigError::InvalidNumber {
                key: "BCRYPT_COST",
                value: self.bcrypt_cost.to_string(),
            });
        }
        if !self.public_base_url.starts_with("http://") && !self.public_base_url.starts_with("https://") {
            return Err(ConfigError::InvalidUrl(self.public_base_url.clone()));
        }
        Ok(())
    }
}

/// Builder for AppConfig
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    port: Option<u16>,
    database_url: Option<String>,
    cors_origin: Option<String>,
    access_token_secret: Option<String>,
    access_token_ttl: Option<Duration>,
    refresh_token_secret: Option<String>,
    refresh_token_ttl: Option<Duration>,
    bcrypt_cost: Option<u32>,
    cookie_secure: Option<bool>,
    upload_temp_dir: Option<PathBuf>,
    public_dir: Option<PathBuf>,
    public_base_url: Option<String>,
    upload_limit_bytes: Option<usize>,
    cloudinary: Option<CloudinaryConfig>,
}

impl AppConfigBuilder {
    /// Set the listen port
    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Set the PostgreSQL URL
    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into());
        self
    }

    /// Set the allowed CORS origin
    pub fn cors_origin(mut self, origin: impl Into<String>) -> Self {
        self.cors_origin = Some(origin.into());
        self
    }

    /// Set the access token secret
    pub fn access_token_secret(mut self, secret: impl Into<String>) -> Self {
        self.access_token_secret = Some(secret.into());
        self
    }

    /// Set the access token lifetime
    pub fn access_token_ttl(mut self, ttl: Duration) -> Self {
        self.access_token_ttl = Some(ttl);
        self
    }

    /// Set the refresh token secret
    pub fn refresh_token_secret(mut self, secret: impl Into<String>) -> Self {
        self.refresh_token_secret = Some(secret.into());
        self
    }

    /// Set the refresh token lifetime
    pub fn refresh_token_ttl(mut self, ttl: Duration) -> Self {
        self.refresh_token_ttl = Some(ttl);
        self
    }

    /// Set the bcrypt cost factor
    pub fn bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = Some(cost);
        self
    }

    /// Set the `Secure` cookie flag
    pub fn cookie_secure(mut self, secure: bool) -> Self {
        self.cookie_secure = Some(secure);
        self
    }

    /// Set the upload staging directory
    pub fn upload_temp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.upload_temp_dir = Some(dir.into());
        self
    }

    /// Set the static files root
    pub fn public_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.public_dir = Some(dir.into());
        self
    }

    /// Set the base URL for local media links
    pub fn public_base_url(mut self, url: impl Into<String>) -> Self {
        self.public_base_url = Some(url.into());
        self
    }

    /// Set the multipart body limit
    pub fn upload_limit_bytes(mut self, limit: usize) -> Self {
        self.upload_limit_bytes = Some(limit);
        self
    }

    /// Enable Cloudinary media hosting
    pub fn cloudinary(mut self, cloudinary: CloudinaryConfig) -> Self {
        self.cloudinary = Some(cloudinary);
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        let port = self.port.unwrap_or(DEFAULT_PORT);
        let public_dir = self.public_dir.unwrap_or_else(|| PathBuf::from("./public"));
        let config = AppConfig {
            port,
            database_url: self.database_url,
            cors_origin: self.cors_origin,
            access_token_secret: self
                .access_token_secret
                .ok_or(ConfigError::MissingValue("ACCESS_TOKEN_SECRET"))?,
            access_token_ttl: self.access_token_ttl.unwrap_or(DEFAULT_ACCESS_TTL),
            refresh_token_secret: self
                .refresh_token_secret
                .ok_or(ConfigError::MissingValue("REFRESH_TOKEN_SECRET"))?,
            refresh_token_ttl: self.refresh_token_ttl.unwrap_or(DEFAULT_REFRESH_TTL),
            bcrypt_cost: self.bcrypt_cost.unwrap_or(DEFAULT_BCRYPT_COST),
            cookie_secure: self.cookie_secure.unwrap_or(true),
            upload_temp_dir: self
                .upload_temp_dir
                .unwrap_or_else(|| public_dir.join("temp")),
            public_dir,
            public_base_url: self
                .public_base_url
                .unwrap_or_else(|| format!("http://localhost:{}", port))
                .trim_end_matches('/')
                .to_string(),
            upload_limit_bytes: self.upload_limit_bytes.unwrap_or(DEFAULT_UPLOAD_LIMIT),
            cloudinary: self.cloudinary,
        };
        config.validate()?;
        Ok(config)
    }
}

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("missing value: {0}")]
    MissingValue(&'static str),
    #[error("invalid duration for {key}: {value}")]
    InvalidDuration { key: &'static str, value: String },
    #[error("invalid number for {key}: {value}")]
    InvalidNumber { key: &'static str, value: String },
    #[error("invalid boolean for {key}: {value}")]
    InvalidBool { key: &'static str, value: String },
    #[error("access and refresh tokens must use different secrets")]
    SharedSecret,
}

fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_duration(key: &'static str, value: &str) -> Result<Duration, ConfigError> {
    humantime::parse_duration(value.trim()).map_err(|_| ConfigError::InvalidDuration {
        key,
        value: value.to_string(),
    })
}

fn parse_number<T: std::str::FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidNumber {
        key,
        value: value.to_string(),
    })
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            key,
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn base() -> AppConfigBuilder {
        AppConfig::builder()
            .access_token_secret("access")
            .refresh_token_secret("refresh")
    }

    #[test]
    fn test_builder_defaults() {
        let config = base().build().unwrap();
        assert_eq!(config.port, 8000);
        assert_eq!(config.access_token_ttl, Duration::from_secs(86_400));
        assert_eq!(config.refresh_token_ttl, Duration::from_secs(864_000));
        assert!(config.cookie_secure);
        assert_eq!(config.upload_temp_dir, PathBuf::from("./public").join("temp"));
        assert_eq!(config.public_base_url, "http://localhost:8000");
        assert!(config.database_url.is_none());
        assert!(config.cloudinary.is_none());
    }

    #[test]
    fn test_builder_requires_secrets() {
        let err = AppConfig::builder().refresh_token_secret("r").build().unwrap_err();
        assert_eq!(err, ConfigError::MissingValue("ACCESS_TOKEN_SECRET"));
    }

    #[test]
    fn test_builder_rejects_shared_secret() {
        let err = AppConfig::builder()
            .access_token_secret("same")
            .refresh_token_secret("same")
            .build()
            .unwrap_err();
        assert_eq!(err, ConfigError::SharedSecret);
    }

    #[test]
    fn test_builder_rejects_bad_cost() {
        assert!(base().bcrypt_cost(3).build().is_err());
        assert!(base().bcrypt_cost(4).build().is_ok());
    }

    #[test]
    fn test_builder_rejects_sub_second_expiry() {
        let err = base()
            .access_token_ttl(Duration::from_millis(500))
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidDuration {
                key: "ACCESS_TOKEN_EXPIRY",
                value: "500ms".to_string(),
            }
        );

        let err = base().refresh_token_ttl(Duration::ZERO).build().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidDuration { key: "REFRESH_TOKEN_EXPIRY", .. }
        ));

        assert!(base().access_token_ttl(Duration::from_secs(1)).build().is_ok());
    }

    #[test]
    fn test_public_base_url_trailing_slash_trimmed() {
        let config = base().public_base_url("http://cdn.local/").build().unwrap();
        assert_eq!(config.public_base_url, "http://cdn.local");
    }

    #[test]
    fn test_debug_hides_secrets() {
        let config = base().database_url("postgres://u:pw@h/db").build().unwrap();
        let printed = format!("{:?}", config);
        assert!(!printed.contains("access\""));
        assert!(!printed.contains("pw@h"));
    }

    #[test]
    fn test_parse_helpers() {
        assert_eq!(parse_duration("X", "15m").unwrap(), Duration::from_secs(900));
        assert_eq!(parse_duration("X", "1d").unwrap(), Duration::from_secs(86_400));
        assert!(parse_duration("X", "soon").is_err());
        assert_eq!(parse_number::<u16>("X", " 42 ").unwrap(), 42);
        assert!(parse_number::<u16>("X", "70000").is_err());
        assert!(parse_bool("X", "off").is_ok_and(|b| !b));
        assert!(parse_bool("X", "maybe").is_err());
    }

    const VARS: &[&str] = &[
        "PORT",
        "DATABASE_URL",
        "CORS_ORIGIN",
        "ACCESS_TOKEN_SECRET",
        "ACCESS_TOKEN_EXPIRY",
        "REFRESH_TOKEN_SECRET",
        "REFRESH_TOKEN_EXPIRY",
        "BCRYPT_COST",
        "COOKIE_SECURE",
        "UPLOAD_TEMP_DIR",
        "PUBLIC_DIR",
        "PUBLIC_BASE_URL",
        "UPLOAD_LIMIT_BYTES",
        "CLOUDINARY_CLOUD_NAME",
        "CLOUDINARY_API_KEY",
        "CLOUDINARY_API_SECRET",
        "CLOUDINARY_BASE_URL",
    ];

    fn clear_env() {
        for var in VARS {
            std::env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_from_env() {
        clear_env();
        std::env::set_var("PORT", "9000");
        std::env::set_var("ACCESS_TOKEN_SECRET", "a-secret");
        std::env::set_var("ACCESS_TOKEN_EXPIRY", "15m");
        std::env::set_var("REFRESH_TOKEN_SECRET", "r-secret");
        std::env::set_var("COOKIE_SECURE", "false");
        std::env::set_var("DATABASE_URL", "");

        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.access_token_ttl, Duration::from_secs(900));
        assert!(!config.cookie_secure);
        assert!(config.database_url.is_none());
        assert_eq!(config.public_base_url, "http://localhost:9000");
        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_partial_cloudinary_is_error() {
        clear_env();
        std::env::set_var("ACCESS_TOKEN_SECRET", "a-secret");
        std::env::set_var("REFRESH_TOKEN_SECRET", "r-secret");
        std::env::set_var("CLOUDINARY_CLOUD_NAME", "demo");

        assert!(matches!(AppConfig::from_env(), Err(ConfigError::MissingValue(_))));
        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_cloudinary() {
        clear_env();
        std::env::set_var("ACCESS_TOKEN_SECRET", "a-secret");
        std::env::set_var("REFRESH_TOKEN_SECRET", "r-secret");
        std::env::set_var("CLOUDINARY_CLOUD_NAME", "demo");
        std::env::set_var("CLOUDINARY_API_KEY", "key");
        std::env::set_var("CLOUDINARY_API_SECRET", "shh");

        let cloudinary = AppConfig::from_env().unwrap().cloudinary.unwrap();
        assert_eq!(cloudinary.cloud_name, "demo");
        assert_eq!(cloudinary.base_url, "https://api.cloudinary.com");
        clear_env();
    }
}
