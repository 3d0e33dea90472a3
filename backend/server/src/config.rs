use std::{env, fmt::Display, str::FromStr, time::Duration};

use bills::{remote::OIREACHTAS_API, resolver::DEFAULT_MAX_IN_FLIGHT};
use tracing::{info, warn};

use crate::error::AppError;

pub struct Config {
    pub port: u16,
    pub upstream_url: String,
    pub upstream_timeout: Duration,
    pub lookup_concurrency: usize,
}

impl Config {
    pub fn load() -> Result<Self, AppError> {
        Ok(Self {
            port: try_load("PROXY_PORT", "3001")?,
            upstream_url: try_load("UPSTREAM_URL", OIREACHTAS_API)?,
            upstream_timeout: Duration::from_millis(try_load("UPSTREAM_TIMEOUT_MS", "10000")?),
            lookup_concurrency: try_load("LOOKUP_CONCURRENCY", &DEFAULT_MAX_IN_FLIGHT.to_string())?,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3001,
            upstream_url: OIREACHTAS_API.to_string(),
            upstream_timeout: Duration::from_secs(10),
            lookup_concurrency: DEFAULT_MAX_IN_FLIGHT,
        }
    }
}

fn var(key: &str) -> Option<String> {
    env::var(key).ok()
}

fn try_load<T: FromStr>(key: &str, default: &str) -> Result<T, AppError>
where
    T::Err: Display,
{
    let raw = var(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });

    parse_value(key, &raw)
}

fn parse_value<T: FromStr>(key: &str, raw: &str) -> Result<T, AppError>
where
    T::Err: Display,
{
    raw.trim().parse().map_err(|e| {
        warn!("Invalid {key} value: {e}");
        AppError::Config(format!("{key}={raw}: {e}"))
    })
}
