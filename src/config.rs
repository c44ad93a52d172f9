//! Application configuration management
//!
//! This module handles loading and validating configuration from environment variables.
//! All configuration is loaded at startup and validated before the application runs.

use std::env;

use chrono::{FixedOffset, Offset, Utc};

use crate::constants::{
    DEFAULT_CALENDAR_UTC_OFFSET_MINUTES, DEFAULT_DATABASE_MAX_CONNECTIONS, DEFAULT_SERVER_HOST,
    DEFAULT_SERVER_PORT, MAX_CALENDAR_UTC_OFFSET_MINUTES,
};

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub cors: CorsConfig,
    pub calendar: CalendarConfig,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub rust_log: String,
    pub log_format: LogFormat,
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

/// Credentials used to guard the API
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Shared key expected in the API key header of public endpoints
    pub api_key: String,
    /// HS256 secret used to verify bearer tokens
    pub jwt_secret: String,
}

/// CORS configuration
#[derive(Debug, Clone, Default)]
pub struct CorsConfig {
    /// Origins whose preflight requests are answered with an allow-origin header
    pub allowed_origins: Vec<String>,
}

/// Calendar used for day/week/month/year comparisons
#[derive(Debug, Clone, Copy)]
pub struct CalendarConfig {
    pub offset: FixedOffset,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            offset: Utc.fix(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            server: ServerConfig::from_env()?,
            database: DatabaseConfig::from_env()?,
            auth: AuthConfig::from_env()?,
            cors: CorsConfig::from_env(),
            calendar: CalendarConfig::from_env()?,
        })
    }
}

impl ServerConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            host: env::var("SERVER_HOST").unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
            port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| DEFAULT_SERVER_PORT.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("SERVER_PORT".to_string()))?,
            rust_log: env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            log_format: parse_log_format(
                &env::var("LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string()),
            )?,
        })
    }
}

impl DatabaseConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            url: env::var("DATABASE_URL")
                .map_err(|_| ConfigError::Missing("DATABASE_URL".to_string()))?,
            max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|_| DEFAULT_DATABASE_MAX_CONNECTIONS.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("DATABASE_MAX_CONNECTIONS".to_string()))?,
        })
    }
}

impl AuthConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let api_key = env::var("API_KEY").map_err(|_| ConfigError::Missing("API_KEY".to_string()))?;
        if api_key.trim().is_empty() {
            return Err(ConfigError::InvalidValue("API_KEY".to_string()));
        }

        Ok(Self {
            api_key,
            jwt_secret: env::var("JWT_SECRET")
                .map_err(|_| ConfigError::Missing("JWT_SECRET".to_string()))?,
        })
    }
}

impl CorsConfig {
    fn from_env() -> Self {
        Self {
            allowed_origins: parse_origins(&env::var("ALLOWED_ORIGINS").unwrap_or_default()),
        }
    }
}

impl CalendarConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let minutes = env::var("CALENDAR_UTC_OFFSET_MINUTES")
            .unwrap_or_else(|_| DEFAULT_CALENDAR_UTC_OFFSET_MINUTES.to_string())
            .parse::<i32>()
            .map_err(|_| ConfigError::InvalidValue("CALENDAR_UTC_OFFSET_MINUTES".to_string()))?;

        Ok(Self {
            offset: offset_from_minutes(minutes)?,
        })
    }
}

fn parse_log_format(value: &str) -> Result<LogFormat, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "pretty" | "text" => Ok(LogFormat::Pretty),
        "json" => Ok(LogFormat::Json),
        _ => Err(ConfigError::InvalidValue("LOG_FORMAT".to_string())),
    }
}

/// Split a comma-separated origin list, dropping blanks
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}

fn offset_from_minutes(minutes: i32) -> Result<FixedOffset, ConfigError> {
    if !(-MAX_CALENDAR_UTC_OFFSET_MINUTES..=MAX_CALENDAR_UTC_OFFSET_MINUTES).contains(&minutes) {
        return Err(ConfigError::InvalidValue(
            "CALENDAR_UTC_OFFSET_MINUTES".to_string(),
        ));
    }

    FixedOffset::east_opt(minutes * 60)
        .ok_or_else(|| ConfigError::InvalidValue("CALENDAR_UTC_OFFSET_MINUTES".to_string()))
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(String),

    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_origins() {
        let origins = parse_origins(" https://a.example , ,https://b.example,");
        assert_eq!(origins, vec!["https://a.example", "https://b.example"]);
        assert!(parse_origins("").is_empty());
    }

    #[test]
    fn test_parse_log_format() {
        assert_eq!(parse_log_format("JSON").unwrap(), LogFormat::Json);
        assert_eq!(parse_log_format("pretty").unwrap(), LogFormat::Pretty);
        assert!(parse_log_format("xml").is_err());
    }

    #[test]
    fn test_offset_from_minutes() {
        assert_eq!(offset_from_minutes(0).unwrap().local_minus_utc(), 0);
        assert_eq!(offset_from_minutes(-300).unwrap().local_minus_utc(), -300 * 60);
        assert_eq!(offset_from_minutes(345).unwrap().local_minus_utc(), 345 * 60);
        assert!(offset_from_minutes(24 * 60).is_err());
        assert!(offset_from_minutes(-24 * 60).is_err());
        assert!(offset_from_minutes(i32::MIN).is_err());
        assert!(offset_from_minutes(i32::MAX).is_err());
    }

    #[test]
    fn test_default_calendar_is_utc() {
        assert_eq!(CalendarConfig::default().offset.local_minus_utc(), 0);
    }
}
