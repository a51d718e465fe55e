//! API server configuration

use std::env;
use std::fmt;
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use kinship_shared_config::{env_or, CommonConfig, DatabaseConfig, Environment, LoaderConfig};

/// Which [`Store`](crate::store::Store) implementation backs the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreBackend {
    #[default]
    Postgres,
    /// In-process tables, lost on restart
    Memory,
}

impl FromStr for StoreBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "postgres" | "postgresql" | "pg" => Ok(Self::Postgres),
            "memory" | "mem" => Ok(Self::Memory),
            other => bail!("unknown store backend '{}', expected 'postgres' or 'memory'", other),
        }
    }
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Postgres => "postgres",
            Self::Memory => "memory",
        })
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub common: CommonConfig,

    /// `PORT`, default 8080
    pub port: u16,

    /// `STORE_BACKEND`, default postgres
    pub store_backend: StoreBackend,

    /// `CORS_ORIGINS`, comma-separated
    pub cors_allowed_origins: Option<Vec<String>>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Production refuses the in-memory store and requires an explicit
    /// `DATABASE_URL`; other environments fall back to local defaults.
    pub fn from_env() -> Result<Self> {
        let common = CommonConfig::from_env().context("Failed to load shared configuration")?;
        let is_production = common.environment.is_production();

        let store_backend = Self::load_store_backend(is_production)?;
        if is_production && store_backend == StoreBackend::Postgres {
            Self::require_database_url()?;
        }

        Ok(Self {
            common,
            port: env_or("PORT", 8080).context("Invalid PORT value")?,
            store_backend,
            cors_allowed_origins: Self::load_cors_origins(),
        })
    }

    fn load_store_backend(is_production: bool) -> Result<StoreBackend> {
        let backend = match env::var("STORE_BACKEND") {
            Ok(value) if !value.trim().is_empty() => value.parse()?,
            _ => StoreBackend::default(),
        };

        if backend == StoreBackend::Memory {
            if is_production {
                bail!("STORE_BACKEND=memory is not allowed in production");
            }
            tracing::warn!("Using in-memory store; all data is lost on restart");
        }

        Ok(backend)
    }

    fn require_database_url() -> Result<()> {
        match env::var("DATABASE_URL") {
            Ok(url) if !url.trim().is_empty() => Ok(()),
            _ => bail!("DATABASE_URL must be set explicitly in production"),
        }
    }

    fn load_cors_origins() -> Option<Vec<String>> {
        let raw = env::var("CORS_ORIGINS").ok()?;
        Some(
            raw.split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(String::from)
                .collect(),
        )
    }

    pub fn database(&self) -> &DatabaseConfig {
        &self.common.database
    }

    pub fn loader(&self) -> LoaderConfig {
        self.common.loader
    }

    pub fn environment(&self) -> Environment {
        self.common.environment
    }

    pub fn is_production(&self) -> bool {
        self.common.environment.is_production()
    }
}
