use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use dotenv::dotenv;
use thiserror::Error;
use tracing::Level;

const SERVER_HOST: &str = "SERVER_HOST";
const SERVER_PORT: &str = "SERVER_PORT";
const REQUEST_TIMEOUT: &str = "REQUEST_TIMEOUT";
const WORKER_COUNT: &str = "WORKER_COUNT";
const QUEUE_BUFFER_SIZE: &str = "QUEUE_BUFFER_SIZE";
const SHUTDOWN_TIMEOUT: &str = "SHUTDOWN_TIMEOUT";
const LOG_LEVEL: &str = "LOG_LEVEL";

/// Errors raised while reading configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value {value:?} for environment variable {key}")]
    Invalid { key: &'static str, value: String },

    #[error("environment variable {0} must be greater than zero")]
    Zero(&'static str),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub request_timeout: Duration,
    pub worker_count: usize,
    pub queue_buffer_size: usize,
    pub shutdown_timeout: Duration,
    pub log_level: Level,
}

impl Config {
    /// Loads `.env` if present, then reads the process environment.
    pub fn try_from_env() -> Result<Config, ConfigError> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup. Missing keys take defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Config, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let config = Config {
            host: parse_or(&lookup, SERVER_HOST, defaults.host)?,
            port: parse_or(&lookup, SERVER_PORT, defaults.port)?,
            request_timeout: Duration::from_secs(positive_or(
                &lookup,
                REQUEST_TIMEOUT,
                defaults.request_timeout.as_secs(),
            )?),
            worker_count: positive_or(&lookup, WORKER_COUNT, defaults.worker_count)?,
            queue_buffer_size: positive_or(&lookup, QUEUE_BUFFER_SIZE, defaults.queue_buffer_size)?,
            shutdown_timeout: Duration::from_secs(positive_or(
                &lookup,
                SHUTDOWN_TIMEOUT,
                defaults.shutdown_timeout.as_secs(),
            )?),
            log_level: parse_or(&lookup, LOG_LEVEL, defaults.log_level)?,
        };

        Ok(config)
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            host: IpAddr::from([0, 0, 0, 0]),
            port: 8080,
            request_timeout: Duration::from_secs(15),
            worker_count: 5,
            queue_buffer_size: 100,
            shutdown_timeout: Duration::from_secs(30),
            log_level: Level::INFO,
        }
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => {
            raw.trim().parse().map_err(|_| ConfigError::Invalid { key, value: raw })
        }
        _ => Ok(default),
    }
}

fn positive_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + PartialEq + Default,
{
    let value = parse_or(lookup, key, default)?;
    if value == T::default() {
        return Err(ConfigError::Zero(key));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_reads_values() {
        let config = Config::from_lookup(lookup(&[
            ("SERVER_PORT", "9000"),
            ("WORKER_COUNT", "3"),
            ("QUEUE_BUFFER_SIZE", "10"),
            ("SHUTDOWN_TIMEOUT", "5"),
            ("LOG_LEVEL", "debug"),
        ]))
        .unwrap();

        assert_eq!(config.port, 9000);
        assert_eq!(config.worker_count, 3);
        assert_eq!(config.queue_buffer_size, 10);
        assert_eq!(config.shutdown_timeout, Duration::from_secs(5));
        assert_eq!(config.log_level, Level::DEBUG);
        assert_eq!(config.addr().to_string(), "0.0.0.0:9000");
    }

    #[test]
    fn test_rejects_garbage() {
        let err = Config::from_lookup(lookup(&[("WORKER_COUNT", "many")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid {
                key: "WORKER_COUNT",
                value: "many".to_string()
            }
        );
    }

    #[test]
    fn test_rejects_zero_capacity() {
        let err = Config::from_lookup(lookup(&[("QUEUE_BUFFER_SIZE", "0")])).unwrap_err();
        assert_eq!(err, ConfigError::Zero("QUEUE_BUFFER_SIZE"));
    }
}
