use std::env;
use std::fmt;

use chrono::Duration;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;
use thiserror::Error;

/// Authentication settings: signing secret plus token lifetimes.
#[derive(Deserialize, Clone)]
pub struct AuthConfig {
    pub secret: String,
    #[serde(default)]
    pub token: TokenSettings,
}

/// Token signing algorithm and lifetimes, in minutes.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct TokenSettings {
    #[serde(default = "default_algorithm")]
    pub algorithm: String,
    #[serde(default = "default_expire_minutes")]
    pub default_expire_minutes: i64,
    #[serde(default = "default_access_expire_minutes")]
    pub access_expire_minutes: i64,
    #[serde(default = "default_refresh_expire_minutes")]
    pub refresh_expire_minutes: i64,
}

fn default_algorithm() -> String {
    "HS256".to_string()
}

fn default_expire_minutes() -> i64 {
    15
}

fn default_access_expire_minutes() -> i64 {
    15
}

fn default_refresh_expire_minutes() -> i64 {
    60 * 24 * 7
}

impl Default for TokenSettings {
    fn default() -> Self {
        Self {
            algorithm: default_algorithm(),
            default_expire_minutes: default_expire_minutes(),
            access_expire_minutes: default_access_expire_minutes(),
            refresh_expire_minutes: default_refresh_expire_minutes(),
        }
    }
}

/// Error for token lifetimes that cannot be used
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("{name} must be positive, got {minutes}")]
    NonPositiveLifetime { name: &'static str, minutes: i64 },

    #[error("{name} is out of range: {minutes} minutes")]
    LifetimeOutOfRange { name: &'static str, minutes: i64 },
}

fn lifetime(name: &'static str, minutes: i64) -> Result<Duration, SettingsError> {
    if minutes <= 0 {
        return Err(SettingsError::NonPositiveLifetime { name, minutes });
    }

    Duration::try_minutes(minutes).ok_or(SettingsError::LifetimeOutOfRange { name, minutes })
}

impl TokenSettings {
    pub fn default_ttl(&self) -> Result<Duration, SettingsError> {
        lifetime("default_expire_minutes", self.default_expire_minutes)
    }

    pub fn access_ttl(&self) -> Result<Duration, SettingsError> {
        lifetime("access_expire_minutes", self.access_expire_minutes)
    }

    pub fn refresh_ttl(&self) -> Result<Duration, SettingsError> {
        lifetime("refresh_expire_minutes", self.refresh_expire_minutes)
    }

    /// Check that every lifetime is positive and representable.
    ///
    /// # Errors
    /// * `NonPositiveLifetime` - A lifetime is zero or negative
    /// * `LifetimeOutOfRange` - A lifetime does not fit a duration
    pub fn validate(&self) -> Result<(), SettingsError> {
        self.default_ttl()?;
        self.access_ttl()?;
        self.refresh_ttl()?;
        Ok(())
    }
}

impl AuthConfig {
    pub fn new(secret: impl Into<String>, token: TokenSettings) -> Self {
        Self {
            secret: secret.into(),
            token,
        }
    }

    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (AUTH__SECRET, AUTH__TOKEN__ALGORITHM, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    ///
    /// Settings live under the `auth` table.
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            .add_source(Environment::default().separator("__"))
            .build()?;

        let config: AuthConfig = configuration.get("auth")?;
        config
            .token
            .validate()
            .map_err(|e| ConfigError::Message(e.to_string()))?;

        Ok(config)
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("secret", &"[redacted]")
            .field("token", &self.token)
            .finish()
    }
}
