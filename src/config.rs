use std::{env, fmt::Display, str::FromStr};

use tracing::{info, warn};

/// Process configuration, read from the environment once at startup.
///
/// The database keys are optional on purpose: a missing `DATABASE_URL` or
/// `DATABASE_NAME` disables the store instead of crashing the process, and
/// the health endpoint reports the gap.
pub struct Config {
    pub port: u16,
    pub database_url: Option<String>,
    pub database_name: Option<String>,
}

impl Config {
    pub fn load() -> Self {
        Self {
            port: try_load("PORT", "8000"),
            database_url: var("DATABASE_URL").ok(),
            database_name: var("DATABASE_NAME").ok(),
        }
    }
}

fn var(key: &str) -> Result<String, ()> {
    env::var(key).map_err(|_| {
        warn!("Environment variable {key} not found");
    })
}

fn try_load<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    var(key)
        .unwrap_or_else(|_| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e| {
            warn!("Invalid {key} value: {e}");
        })
        .expect("Environment misconfigured!")
}
