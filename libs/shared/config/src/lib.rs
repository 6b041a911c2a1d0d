use std::env;
use std::str::FromStr;
use tracing::warn;

pub const DEFAULT_TOKEN_TTL_HOURS: i64 = 24;
pub const MAX_TOKEN_TTL_HOURS: i64 = 24 * 365;
pub const DEFAULT_MOCK_DATA_SEED: u64 = 42;
pub const DEFAULT_MEETING_LINK_BASE: &str = "https://meet.consult-mock.app/session";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
    pub server_host: String,
    pub server_port: u16,
    pub mock_data_seed: u64,
    pub meeting_link_base: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            jwt_secret: env::var("JWT_SECRET")
                .unwrap_or_else(|_| {
                    warn!("JWT_SECRET not set, using empty value");
                    String::new()
                }),
            token_ttl_hours: token_ttl_or_default(parse_or("TOKEN_TTL_HOURS", DEFAULT_TOKEN_TTL_HOURS)),
            server_host: env::var("SERVER_HOST")
                .unwrap_or_else(|_| "0.0.0.0".to_string()),
            server_port: parse_or("SERVER_PORT", 3000),
            mock_data_seed: parse_or("MOCK_DATA_SEED", DEFAULT_MOCK_DATA_SEED),
            meeting_link_base: env::var("MEETING_LINK_BASE")
                .unwrap_or_else(|_| DEFAULT_MEETING_LINK_BASE.to_string()),
        };

        if !config.is_configured() {
            warn!("Application not fully configured - tokens cannot be issued or verified without JWT_SECRET");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.jwt_secret.is_empty()
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            token_ttl_hours: DEFAULT_TOKEN_TTL_HOURS,
            server_host: "0.0.0.0".to_string(),
            server_port: 3000,
            mock_data_seed: DEFAULT_MOCK_DATA_SEED,
            meeting_link_base: DEFAULT_MEETING_LINK_BASE.to_string(),
        }
    }
}

fn parse_or<T: FromStr + Copy + std::fmt::Display>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("{} has invalid value {:?}, using default {}", key, raw, default);
            default
        }),
        Err(_) => default,
    }
}

/// Token lifetimes must be positive and at most a year.
pub fn token_ttl_or_default(hours: i64) -> i64 {
    if (1..=MAX_TOKEN_TTL_HOURS).contains(&hours) {
        return hours;
    }
    warn!(
        "TOKEN_TTL_HOURS {} is outside 1..={}, using default {}",
        hours, MAX_TOKEN_TTL_HOURS, DEFAULT_TOKEN_TTL_HOURS
    );
    DEFAULT_TOKEN_TTL_HOURS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_not_configured() {
        let config = AppConfig::default();
        assert!(!config.is_configured());
        assert_eq!(config.token_ttl_hours, 24);
        assert_eq!(config.bind_address(), "0.0.0.0:3000");
    }

    #[test]
    fn secret_makes_config_usable() {
        let config = AppConfig {
            jwt_secret: "s3cret".to_string(),
            ..AppConfig::default()
        };
        assert!(config.is_configured());
    }

    #[test]
    fn out_of_range_token_ttl_falls_back() {
        assert_eq!(token_ttl_or_default(48), 48);
        assert_eq!(token_ttl_or_default(MAX_TOKEN_TTL_HOURS), MAX_TOKEN_TTL_HOURS);
        assert_eq!(token_ttl_or_default(0), DEFAULT_TOKEN_TTL_HOURS);
        assert_eq!(token_ttl_or_default(-5), DEFAULT_TOKEN_TTL_HOURS);
        assert_eq!(token_ttl_or_default(9_000_000_000_000), DEFAULT_TOKEN_TTL_HOURS);
    }
}
