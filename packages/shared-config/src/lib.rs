//! Configuration shared by Kinship binaries
//!
//! Everything is read from environment variables. Unset variables fall back
//! to development defaults; set-but-malformed ones are errors.

mod database;
mod error;
mod loader;

pub use database::{DatabaseConfig, DEFAULT_DATABASE_URL};
pub use error::{ConfigError, ConfigResult};
pub use loader::{LoaderConfig, DEFAULT_MAX_BATCH_SIZE};

use std::env;
use std::fmt;
use std::str::FromStr;

/// Deployment mode, from `ENVIRONMENT`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "staging" | "stage" => Ok(Self::Staging),
            "production" | "prod" => Ok(Self::Production),
            _ => Err("expected development, staging or production".to_string()),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Development => "development",
            Self::Staging => "staging",
            Self::Production => "production",
        })
    }
}

/// Settings every Kinship binary reads
#[derive(Debug, Clone)]
pub struct CommonConfig {
    pub environment: Environment,
    pub database: DatabaseConfig,
    pub loader: LoaderConfig,
}

impl CommonConfig {
    pub fn from_env() -> ConfigResult<Self> {
        Ok(Self {
            environment: env_or("ENVIRONMENT", Environment::default())?,
            database: DatabaseConfig::from_env()?,
            loader: LoaderConfig::from_env()?,
        })
    }
}

/// Parse `var` if it is set and non-empty, otherwise return `default`
pub fn env_or<T>(var: &str, default: T) -> ConfigResult<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match env::var(var) {
        Ok(value) if !value.trim().is_empty() => {
            let parsed = value.trim().parse::<T>();
            parsed.map_err(|e| ConfigError::Unparsable {
                var: var.to_string(),
                value,
                reason: e.to_string(),
            })
        }
        _ => Ok(default),
    }
}
