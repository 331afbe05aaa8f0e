//! Centralized configuration (environment variables + defaults).

use anyhow::Context;
use std::str::FromStr;

/// Which store backend the server runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StoreBackend::Postgres),
            "memory" => Ok(StoreBackend::Memory),
            other => Err(anyhow::anyhow!(
                "unknown STORE_BACKEND '{}' (expected 'postgres' or 'memory')",
                other
            )),
        }
    }
}

/// Loads `.env` into the process environment, if present.
pub fn load_dotenv() {
    dotenv::dotenv().ok();
}

/// Database URL must be provided (no default) for safety.
pub fn database_url() -> anyhow::Result<String> {
    std::env::var("DATABASE_URL").context("DATABASE_URL must be set")
}

/// Listen address for the HTTP server.
pub fn bind_addr() -> String {
    std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string())
}

/// Pool size for the PostgreSQL store (default 5, never below 1).
pub fn db_max_connections() -> anyhow::Result<u32> {
    match std::env::var("DB_MAX_CONNECTIONS") {
        Ok(v) => Ok(v
            .parse::<u32>()
            .context("DB_MAX_CONNECTIONS must be a valid u32")?
            .max(1)),
        Err(_) => Ok(5),
    }
}

pub fn store_backend() -> anyhow::Result<StoreBackend> {
    match std::env::var("STORE_BACKEND") {
        Ok(v) => v.parse(),
        Err(_) => Ok(StoreBackend::Postgres),
    }
}

/// `LOG_FORMAT=json` switches to JSON logs; anything else is pretty.
pub fn log_format() -> crate::infra::logging::LogFormat {
    match std::env::var("LOG_FORMAT") {
        Ok(v) if v.eq_ignore_ascii_case("json") => crate::infra::logging::LogFormat::Json,
        _ => crate::infra::logging::LogFormat::Pretty,
    }
}
