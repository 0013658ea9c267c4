use std::{env, time::Duration};
use thiserror::Error;

use crate::tasks::types::{CHECK_INTERVAL, FETCH_TIMEOUT};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse {key}={value}: expected {expected}")]
    Invalid {
        key: &'static str,
        value: String,
        expected: &'static str,
    },
    #[error("Failed to get current directory: {0}")]
    CurrentDir(#[from] std::io::Error),
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub db_path: String,
    pub host: String,
    pub port: u16,
    pub db_pool_size: u32,
    pub refresh_interval: Duration,
    pub fetch_timeout: Duration,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let db_path = match env::var("FM_DATABASE_URL") {
            Ok(path) => {
                log::info!("Using database path from FM_DATABASE_URL: {}", path);
                path
            }
            Err(_) => {
                let mut path = env::current_dir()?;
                path.push("feedmill.db");
                let res = path.display().to_string();
                log::info!("Using default database path: {}", res);
                res
            }
        };
        let host = env::var("FM_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = parse_var("FM_PORT", 8090u16, "a port number")?;
        let db_pool_size = parse_var("FM_DB_POOL_SIZE", 4u32, "a positive integer")?;
        if db_pool_size == 0 {
            return Err(ConfigError::Invalid {
                key: "FM_DB_POOL_SIZE",
                value: "0".to_string(),
                expected: "a positive integer",
            });
        }
        let refresh_secs = parse_var(
            "FM_REFRESH_INTERVAL_SECS",
            CHECK_INTERVAL.as_secs(),
            "a number of seconds",
        )?;
        let timeout_secs = parse_var(
            "FM_FETCH_TIMEOUT_SECS",
            FETCH_TIMEOUT.as_secs(),
            "a number of seconds",
        )?;

        Ok(AppConfig {
            db_path,
            host,
            port,
            db_pool_size,
            refresh_interval: Duration::from_secs(refresh_secs.max(1)),
            fetch_timeout: Duration::from_secs(timeout_secs.max(1)),
        })
    }
}

fn parse_var<T>(key: &'static str, default: T, expected: &'static str) -> Result<T, ConfigError>
where
    T: std::str::FromStr + std::fmt::Display,
{
    match env::var(key) {
        Ok(value) => {
            log::info!("Using {} from environment: {}", key, value);
            value.trim().parse::<T>().map_err(|_| ConfigError::Invalid {
                key,
                value,
                expected,
            })
        }
        Err(_) => {
            log::info!("Using default {}: {}", key, default);
            Ok(default)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Each test uses its own variable so they can run in parallel.

    #[test]
    fn test_parse_var_default() {
        let value = parse_var("FM_TEST_UNSET_VAR", 8090u16, "a port number").unwrap();
        assert_eq!(value, 8090);
    }

    #[test]
    fn test_parse_var_from_env() {
        env::set_var("FM_TEST_PORT_OK", " 9000 ");
        let value = parse_var("FM_TEST_PORT_OK", 8090u16, "a port number").unwrap();
        assert_eq!(value, 9000);
    }

    #[test]
    fn test_parse_var_invalid() {
        env::set_var("FM_TEST_PORT_BAD", "not-a-port");
        let err = parse_var("FM_TEST_PORT_BAD", 8090u16, "a port number").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Failed to parse FM_TEST_PORT_BAD=not-a-port: expected a port number"
        );
    }
}
