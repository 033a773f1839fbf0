use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use crate::compliance::scoring::{ScoringConfig, ScoringConfigError};

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the compliance service. Everything is
/// env-driven with defaults; the scoring tables start from the versioned
/// `ScoringConfig` defaults and accept per-deployment overrides for the
/// temporal knobs.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub scoring: ScoringConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            environment: AppEnvironment::from_str(&env_or("ENVGUARD_ENV", "development")),
            server: ServerConfig {
                host: env_or("ENVGUARD_HOST", "127.0.0.1"),
                port: parse_env("ENVGUARD_PORT", 3000)?,
            },
            telemetry: TelemetryConfig {
                log_level: env_or("ENVGUARD_LOG_LEVEL", "info"),
            },
            scoring: scoring_from_env()?,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T>(key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr<Err = std::num::ParseIntError>,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|source| ConfigError::InvalidNumber { key, source }),
        Err(_) => Ok(default),
    }
}

/// Deployment overrides for the engine's temporal knobs. The weight and
/// band tables stay versioned data, not free-form env input.
fn scoring_from_env() -> Result<ScoringConfig, ConfigError> {
    let defaults = ScoringConfig::default();
    let scoring = ScoringConfig {
        horizon_days: parse_env("ENVGUARD_HORIZON_DAYS", defaults.horizon_days)?,
        reminder_lead_days: parse_env("ENVGUARD_REMINDER_LEAD_DAYS", defaults.reminder_lead_days)?,
        storage_warning_days: parse_env(
            "ENVGUARD_STORAGE_WARNING_DAYS",
            defaults.storage_warning_days,
        )?,
        esg_question_count: parse_env("ENVGUARD_ESG_QUESTION_COUNT", defaults.esg_question_count)?,
        ..defaults
    };
    scoring
        .validate()
        .map_err(|source| ConfigError::InvalidScoring { source })?;
    Ok(scoring)
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{key} must be a valid number")]
    InvalidNumber {
        key: &'static str,
        source: std::num::ParseIntError,
    },
    #[error("ENVGUARD_HOST must parse to an IPv4 or IPv6 address")]
    InvalidHost { source: std::net::AddrParseError },
    #[error("scoring overrides are invalid: {source}")]
    InvalidScoring { source: ScoringConfigError },
}
