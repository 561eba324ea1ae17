//! Configuration module
//!
//! Environment-driven configuration with stated defaults. A `.env` file is
//! loaded when present; real environment variables always win.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_UPLOAD_DIR: &str = "uploads";
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 20;
const DEFAULT_DB_TIMEOUT_SECS: u64 = 30;
// Mirrors the classic 10 MB multipart limit.
const DEFAULT_MAX_UPLOAD_SIZE_BYTES: usize = 10 << 20;

/// Which upload store backs the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "postgres" => Ok(StoreBackend::Postgres),
            "memory" => Ok(StoreBackend::Memory),
            _ => Err(anyhow::anyhow!("Invalid store backend: {}", s)),
        }
    }
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    /// Final directory for relocated uploads. Created at startup if absent.
    pub upload_dir: PathBuf,
    /// Directory holding uploaded bytes between receipt and relocation.
    pub staging_dir: PathBuf,
    pub store_backend: StoreBackend,
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub db_timeout_seconds: u64,
    pub max_upload_size_bytes: usize,
    pub environment: String,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        // Best-effort .env loading; absence is not an error.
        dotenvy::dotenv().ok();

        let config = Config {
            server_port: env_parse("PORT", DEFAULT_PORT)?,
            upload_dir: PathBuf::from(
                env::var("UPLOAD_DIR").unwrap_or_else(|_| DEFAULT_UPLOAD_DIR.to_string()),
            ),
            staging_dir: env::var("STAGING_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| env::temp_dir()),
            store_backend: env_parse("STORE_BACKEND", StoreBackend::Postgres)?,
            database_url: env::var("DATABASE_URL").ok(),
            db_max_connections: env_parse("DB_MAX_CONNECTIONS", DEFAULT_DB_MAX_CONNECTIONS)?,
            db_timeout_seconds: env_parse("DB_TIMEOUT_SECONDS", DEFAULT_DB_TIMEOUT_SECS)?,
            max_upload_size_bytes: env_parse(
                "MAX_UPLOAD_SIZE_BYTES",
                DEFAULT_MAX_UPLOAD_SIZE_BYTES,
            )?,
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
        };

        config.validate()?;
        Ok(config)
    }

    /// Fail fast on misconfiguration instead of at first request.
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.store_backend == StoreBackend::Postgres && self.database_url.is_none() {
            anyhow::bail!("DATABASE_URL is required when STORE_BACKEND is postgres");
        }
        if self.max_upload_size_bytes == 0 {
            anyhow::bail!("MAX_UPLOAD_SIZE_BYTES must be greater than zero");
        }
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }
}

/// Parse an env var, falling back to `default` when unset. An unparseable
/// value is a hard error rather than a silent fallback.
fn env_parse<T>(key: &str, default: T) -> Result<T, anyhow::Error>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid value for {}: {}", key, e)),
        Err(_) => Ok(default),
    }
}
