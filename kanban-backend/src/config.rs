use std::env;

/// Environment variable names - single source of truth
pub mod env_vars {
    pub const HOST: &str = "HOST";
    pub const PORT: &str = "PORT";
    /// Path of the SQLite database file holding the notes collection.
    pub const DATABASE_URL: &str = "DATABASE_URL";
    pub const DATABASE_POOL_SIZE: &str = "DATABASE_POOL_SIZE";
}

/// Default values
pub mod defaults {
    pub const HOST: &str = "0.0.0.0";
    pub const PORT: u16 = 8080;
    pub const DATABASE_URL: &str = "./.db/kanban.db";
    pub const DATABASE_POOL_SIZE: u32 = 8;
}

#[derive(Clone, Debug)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub database_pool_size: u32,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        Ok(Self {
            host: env::var(env_vars::HOST).unwrap_or_else(|_| defaults::HOST.to_string()),
            port: parse_var(env_vars::PORT, env::var(env_vars::PORT).ok(), defaults::PORT)?,
            database_url: env::var(env_vars::DATABASE_URL)
                .unwrap_or_else(|_| defaults::DATABASE_URL.to_string()),
            database_pool_size: parse_var(
                env_vars::DATABASE_POOL_SIZE,
                env::var(env_vars::DATABASE_POOL_SIZE).ok(),
                defaults::DATABASE_POOL_SIZE,
            )?,
        })
    }
}

/// Parse an optional env value, falling back to `default` when unset.
fn parse_var<T: std::str::FromStr>(name: &str, raw: Option<String>, default: T) -> Result<T, String>
where
    T::Err: std::fmt::Display,
{
    match raw {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|e| format!("{} must be a valid number (got '{}'): {}", name, value, e)),
        None => Ok(default),
    }
}
