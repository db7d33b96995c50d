/// Configuration management
///
/// Loads configuration from environment variables (and a `.env` file when
/// present) into a type-safe struct.
///
/// # Environment Variables
///
/// - `DATABASE_URL`: PostgreSQL connection string (required)
/// - `DATABASE_MAX_CONNECTIONS`: pool size (default: 10)
/// - `SECRET_KEY`: key used to sign confirmation tokens (required, at least 32 bytes)
/// - `CONFIRMATION_TOKEN_TTL_SECONDS`: confirmation token lifetime (default: 3600)
///
/// # Example
///
/// ```no_run
/// use devmon_core::config::Config;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// println!("Confirmation tokens live for {}s", config.confirmation_ttl_seconds);
/// # Ok(())
/// # }
/// ```

use std::env;
use std::fmt;

use crate::auth::token::DEFAULT_CONFIRMATION_TTL_SECONDS;
use crate::db::pool::DatabaseConfig;

/// Minimum accepted length of `SECRET_KEY`
pub const MIN_SECRET_KEY_LEN: usize = 32;

/// Complete application configuration
#[derive(Clone)]
pub struct Config {
    /// Database pool configuration
    pub database: DatabaseConfig,

    /// Secret key for signing confirmation tokens
    ///
    /// Generate with: `openssl rand -hex 32`
    pub secret_key: String,

    /// Lifetime of newly issued confirmation tokens
    pub confirmation_ttl_seconds: i64,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("database", &self.database)
            .field("secret_key", &"<redacted>")
            .field("confirmation_ttl_seconds", &self.confirmation_ttl_seconds)
            .finish()
    }
}

impl Config {
    /// Loads configuration from the process environment
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `DATABASE_URL` or `SECRET_KEY` is missing
    /// - `SECRET_KEY` is shorter than 32 characters
    /// - a numeric variable doesn't parse
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present (for development)
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup
    ///
    /// `from_env` is this function over `std::env::var`.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = lookup("DATABASE_URL")
            .ok_or_else(|| anyhow::anyhow!("DATABASE_URL environment variable is required"))?;

        let max_connections = lookup("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|| "10".to_string())
            .parse::<u32>()?;

        let secret_key = lookup("SECRET_KEY")
            .ok_or_else(|| anyhow::anyhow!("SECRET_KEY environment variable is required"))?;

        if secret_key.len() < MIN_SECRET_KEY_LEN {
            anyhow::bail!("SECRET_KEY must be at least {} characters long", MIN_SECRET_KEY_LEN);
        }

        let confirmation_ttl_seconds = match lookup("CONFIRMATION_TOKEN_TTL_SECONDS") {
            Some(raw) => raw.parse::<i64>()?,
            None => DEFAULT_CONFIRMATION_TTL_SECONDS,
        };

        if confirmation_ttl_seconds <= 0 {
            anyhow::bail!("CONFIRMATION_TOKEN_TTL_SECONDS must be positive");
        }

        Ok(Self {
            database: DatabaseConfig {
                url,
                max_connections,
                ..Default::default()
            },
            secret_key,
            confirmation_ttl_seconds,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgresql://localhost/devmon"),
            ("SECRET_KEY", SECRET),
        ]))
        .expect("config should load");

        assert_eq!(config.database.url, "postgresql://localhost/devmon");
        assert_eq!(config.database.max_connections, 10);
        assert_eq!(config.secret_key, SECRET);
        assert_eq!(config.confirmation_ttl_seconds, 3600);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgresql://localhost/devmon"),
            ("DATABASE_MAX_CONNECTIONS", "3"),
            ("SECRET_KEY", SECRET),
            ("CONFIRMATION_TOKEN_TTL_SECONDS", "60"),
        ]))
        .unwrap();

        assert_eq!(config.database.max_connections, 3);
        assert_eq!(config.confirmation_ttl_seconds, 60);
    }

    #[test]
    fn test_missing_required() {
        let err = Config::from_lookup(lookup_from(&[("SECRET_KEY", SECRET)])).unwrap_err();
        assert!(err.to_string().contains("DATABASE_URL"));

        let err = Config::from_lookup(lookup_from(&[("DATABASE_URL", "postgresql://x")]))
            .unwrap_err();
        assert!(err.to_string().contains("SECRET_KEY"));
    }

    #[test]
    fn test_short_secret_rejected() {
        let result = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgresql://x"),
            ("SECRET_KEY", "short"),
        ]));
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_numbers_rejected() {
        let result = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgresql://x"),
            ("SECRET_KEY", SECRET),
            ("DATABASE_MAX_CONNECTIONS", "many"),
        ]));
        assert!(result.is_err());

        let result = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgresql://x"),
            ("SECRET_KEY", SECRET),
            ("CONFIRMATION_TOKEN_TTL_SECONDS", "0"),
        ]));
        assert!(result.is_err());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgresql://x"),
            ("SECRET_KEY", SECRET),
        ]))
        .unwrap();

        let rendered = format!("{:?}", config);
        assert!(!rendered.contains(SECRET));
        assert!(rendered.contains("<redacted>"));
    }
}
