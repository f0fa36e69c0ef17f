use anyhow::{bail, Context, Result};

/// Service configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Number of migrated documents memoized by content hash.
    pub migration_cache_capacity: usize,
    /// Run the equivalence check on every migration and reject failures.
    pub validate_migrations: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let migration_cache_capacity = env_or("MIGRATION_CACHE_CAPACITY", "256")
            .parse::<usize>()
            .context("MIGRATION_CACHE_CAPACITY must be a positive integer")?;
        if migration_cache_capacity == 0 {
            bail!("MIGRATION_CACHE_CAPACITY must be greater than zero");
        }

        Ok(Config {
            port: env_or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
            migration_cache_capacity,
            validate_migrations: parse_bool(&env_or("VALIDATE_MIGRATIONS", "true"))
                .context("VALIDATE_MIGRATIONS must be true or false")?,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            rust_log: "info".to_string(),
            migration_cache_capacity: 256,
            validate_migrations: true,
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_bool(raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("'{other}' is not a boolean"),
    }
}
