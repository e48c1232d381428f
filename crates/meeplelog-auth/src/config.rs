//! Auth subsystem configuration.
//!
//! Constructed once at process start from the server's configuration file
//! and environment, then passed into each component. There are no ambient
//! secrets; the signing key lives here and nowhere else.

use serde::{Deserialize, Serialize};
use time::Duration;

/// Configuration for token issuance, verification, and account retention.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Server-held HMAC secret for token signing.
    #[serde(default)]
    pub secret_key: String,

    /// Signing algorithm identifier. Only HS256 is supported.
    #[serde(default = "default_algorithm")]
    pub algorithm: String,

    /// Access token lifetime in minutes.
    #[serde(default = "default_access_token_lifetime_minutes")]
    pub access_token_lifetime_minutes: u64,

    /// Refresh token lifetime in minutes (default: 7 days).
    #[serde(default = "default_refresh_token_lifetime_minutes")]
    pub refresh_token_lifetime_minutes: u64,

    /// Recovery (reset/restore) token lifetime in minutes.
    #[serde(default = "default_recovery_token_lifetime_minutes")]
    pub recovery_token_lifetime_minutes: u64,

    /// Days a soft-deleted account is retained before the sweep removes it.
    #[serde(default = "default_retention_days")]
    pub retention_days: u64,
}

fn default_algorithm() -> String {
    "HS256".to_string()
}

fn default_access_token_lifetime_minutes() -> u64 {
    30
}

fn default_refresh_token_lifetime_minutes() -> u64 {
    10_080
}

fn default_recovery_token_lifetime_minutes() -> u64 {
    30
}

fn default_retention_days() -> u64 {
    30
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            secret_key: String::new(),
            algorithm: default_algorithm(),
            access_token_lifetime_minutes: default_access_token_lifetime_minutes(),
            refresh_token_lifetime_minutes: default_refresh_token_lifetime_minutes(),
            recovery_token_lifetime_minutes: default_recovery_token_lifetime_minutes(),
            retention_days: default_retention_days(),
        }
    }
}

impl AuthConfig {
    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.secret_key.is_empty() {
            return Err("auth.secret_key must be set".into());
        }
        if self.algorithm != "HS256" {
            return Err("auth.algorithm must be HS256".into());
        }
        if self.access_token_lifetime_minutes == 0
            || self.refresh_token_lifetime_minutes == 0
            || self.recovery_token_lifetime_minutes == 0
        {
            return Err("auth token lifetimes must be > 0".into());
        }
        Ok(())
    }

    /// Access token lifetime as a `time::Duration`.
    #[must_use]
    pub fn access_token_lifetime(&self) -> Duration {
        Duration::minutes(self.access_token_lifetime_minutes as i64)
    }

    /// Refresh token lifetime as a `time::Duration`.
    #[must_use]
    pub fn refresh_token_lifetime(&self) -> Duration {
        Duration::minutes(self.refresh_token_lifetime_minutes as i64)
    }

    /// Recovery token lifetime as a `time::Duration`.
    #[must_use]
    pub fn recovery_token_lifetime(&self) -> Duration {
        Duration::minutes(self.recovery_token_lifetime_minutes as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> AuthConfig {
        AuthConfig {
            secret_key: "test-secret".to_string(),
            ..AuthConfig::default()
        }
    }

    #[test]
    fn defaults_match_documented_lifetimes() {
        let config = AuthConfig::default();
        assert_eq!(config.access_token_lifetime_minutes, 30);
        assert_eq!(config.refresh_token_lifetime_minutes, 10_080);
        assert_eq!(config.recovery_token_lifetime_minutes, 30);
        assert_eq!(config.algorithm, "HS256");
    }

    #[test]
    fn empty_secret_rejected() {
        assert!(AuthConfig::default().validate().is_err());
        assert!(test_config().validate().is_ok());
    }

    #[test]
    fn non_hs256_algorithm_rejected() {
        let config = AuthConfig {
            algorithm: "RS256".to_string(),
            ..test_config()
        };
        assert!(config.validate().is_err());
    }
}
