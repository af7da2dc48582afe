//! Runtime settings loaded via OrthoConfig.
//!
//! Every field can be supplied through a `VOTING_*` environment variable or
//! the matching command-line flag. Backing services are optional: without a
//! database URL the server keeps voters in memory, and without a Redis URL
//! passcodes live in process.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::OTP_TTL;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Errors raised while interpreting loaded settings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// The bind address is not `host:port`.
    #[error("invalid bind address {value:?}: {message}")]
    InvalidBindAddr { value: String, message: String },
    /// Passcodes must live for at least one second.
    #[error("otp ttl must be positive")]
    ZeroOtpTtl,
}

/// Configuration values for the voting server and admin tool.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "VOTING")]
pub struct VotingSettings {
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection string.
    pub database_url: Option<String>,
    /// Redis connection string for the passcode store.
    pub redis_url: Option<String>,
    /// Passcode lifetime in seconds.
    pub otp_ttl_secs: Option<u64>,
    /// Accept any well-formed passcode. Refused in release builds.
    #[ortho_config(default = false)]
    pub otp_bypass: bool,
}

impl VotingSettings {
    /// Configured bind address, falling back to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value
            .parse()
            .map_err(|err: std::net::AddrParseError| SettingsError::InvalidBindAddr {
                value: value.to_owned(),
                message: err.to_string(),
            })
    }

    /// Configured passcode lifetime, falling back to five minutes.
    pub fn otp_ttl(&self) -> Result<Duration, SettingsError> {
        match self.otp_ttl_secs {
            None => Ok(OTP_TTL),
            Some(0) => Err(SettingsError::ZeroOtpTtl),
            Some(secs) => Ok(Duration::from_secs(secs)),
        }
    }

    pub fn database_url(&self) -> Option<&str> {
        self.database_url.as_deref().filter(|url| !url.trim().is_empty())
    }

    pub fn redis_url(&self) -> Option<&str> {
        self.redis_url.as_deref().filter(|url| !url.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 5] = [
        "VOTING_BIND_ADDR",
        "VOTING_DATABASE_URL",
        "VOTING_REDIS_URL",
        "VOTING_OTP_TTL_SECS",
        "VOTING_OTP_BYPASS",
    ];

    fn load_from_empty_args() -> VotingSettings {
        VotingSettings::load_from_iter([OsString::from("voting")]).expect("config should load")
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr(),
            Ok(SocketAddr::from(([0, 0, 0, 0], 8080)))
        );
        assert_eq!(settings.otp_ttl(), Ok(OTP_TTL));
        assert!(!settings.otp_bypass);
        assert!(settings.database_url().is_none());
        assert!(settings.redis_url().is_none());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("VOTING_BIND_ADDR", Some("127.0.0.1:9000".to_owned())),
            (
                "VOTING_DATABASE_URL",
                Some("postgres://voting@localhost/voting".to_owned()),
            ),
            ("VOTING_REDIS_URL", Some("redis://127.0.0.1/".to_owned())),
            ("VOTING_OTP_TTL_SECS", Some("60".to_owned())),
            ("VOTING_OTP_BYPASS", Some("true".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr(),
            Ok(SocketAddr::from(([127, 0, 0, 1], 9000)))
        );
        assert_eq!(
            settings.database_url(),
            Some("postgres://voting@localhost/voting")
        );
        assert_eq!(settings.redis_url(), Some("redis://127.0.0.1/"));
        assert_eq!(settings.otp_ttl(), Ok(Duration::from_secs(60)));
        assert!(settings.otp_bypass);
    }

    #[rstest]
    #[case(Some("not an address"), None)]
    #[case(None, Some(0))]
    fn invalid_values_are_reported(#[case] bind: Option<&str>, #[case] ttl: Option<u64>) {
        let settings = VotingSettings {
            bind_addr: bind.map(str::to_owned),
            database_url: None,
            redis_url: None,
            otp_ttl_secs: ttl,
            otp_bypass: false,
        };
        assert!(settings.bind_addr().is_err() || settings.otp_ttl().is_err());
    }

    #[rstest]
    fn blank_urls_count_as_unset() {
        let settings = VotingSettings {
            bind_addr: None,
            database_url: Some("  ".to_owned()),
            redis_url: Some(String::new()),
            otp_ttl_secs: None,
            otp_bypass: false,
        };
        assert!(settings.database_url().is_none());
        assert!(settings.redis_url().is_none());
    }
}
