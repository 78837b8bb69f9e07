use std::env;
use std::time::Duration;

use thiserror::Error;

use crate::domain::discount::DiscountPolicy;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{key} is invalid: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Runtime settings, read from the environment (and `.env` via `dotenvy`).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub order_service_url: String,
    pub order_service_timeout: Duration,
    pub discount_policy: DiscountPolicy,
    pub cors_allowed_origins: Vec<String>,
}

pub const DEFAULT_CORS_ORIGINS: &str = "http://localhost:3000,http://localhost:3001,\
http://localhost:4200,https://multipedidos.com,https://www.multipedidos.com";

fn parse_origins(raw: &str) -> Result<Vec<String>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(|origin| {
            if origin == "*" {
                return Err(ConfigError::Invalid {
                    key: "CORS_ALLOWED_ORIGINS",
                    reason: "wildcard is not allowed with credentials".to_string(),
                });
            }
            if !(origin.starts_with("http://") || origin.starts_with("https://")) {
                return Err(ConfigError::Invalid {
                    key: "CORS_ALLOWED_ORIGINS",
                    reason: format!("'{}' is not an http(s) origin", origin),
                });
            }
            Ok(origin.trim_end_matches('/').to_string())
        })
        .collect()
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|e| ConfigError::Invalid {
                key: "PORT",
                reason: e.to_string(),
            })?,
            None => 8081,
        };
        let order_service_url =
            lookup("ORDER_SERVICE_URL").unwrap_or_else(|| "http://localhost:8080".to_string());
        let timeout_ms = match lookup("ORDER_SERVICE_TIMEOUT_MS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map_err(|e| ConfigError::Invalid {
                    key: "ORDER_SERVICE_TIMEOUT_MS",
                    reason: e.to_string(),
                })?,
            None => 3000,
        };
        if timeout_ms == 0 {
            return Err(ConfigError::Invalid {
                key: "ORDER_SERVICE_TIMEOUT_MS",
                reason: "must be greater than 0".to_string(),
            });
        }
        let discount_policy = match lookup("DISCOUNT_TIERS") {
            Some(raw) => raw
                .parse::<DiscountPolicy>()
                .map_err(|e| ConfigError::Invalid {
                    key: "DISCOUNT_TIERS",
                    reason: e.to_string(),
                })?,
            None => DiscountPolicy::default(),
        };

        let cors_allowed_origins = parse_origins(
            lookup("CORS_ALLOWED_ORIGINS")
                .as_deref()
                .unwrap_or(DEFAULT_CORS_ORIGINS),
        )?;

        Ok(Self {
            database_url,
            host,
            port,
            order_service_url,
            order_service_timeout: Duration::from_millis(timeout_ms),
            discount_policy,
            cors_allowed_origins,
        })
    }
}
