use anyhow::{Result, anyhow};

/// Deployment environment, selected with `TRIPSTATS_ENV`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Production,
    Staging,
    Development,
}

impl Environment {
    fn from_name(name: &str) -> Self {
        match name {
            "production" => Environment::Production,
            "staging" => Environment::Staging,
            _ => Environment::Development,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Production => "production",
            Environment::Staging => "staging",
            Environment::Development => "development",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    /// Username of the site owner; their news items are shown as "admin"
    pub owner: String,
    pub sentry_dsn: Option<String>,
    pub environment: Environment,
}

impl Config {
    /// Load configuration from environment variables
    /// (`.env` is loaded by the binary before this is called)
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Ok(Config {
            database_url: non_empty("DATABASE_URL")
                .ok_or_else(|| anyhow!("DATABASE_URL must be set"))?,
            owner: non_empty("TRIPSTATS_OWNER").unwrap_or_else(|| "admin".to_string()),
            sentry_dsn: non_empty("SENTRY_DSN"),
            environment: Environment::from_name(
                non_empty("TRIPSTATS_ENV").unwrap_or_default().as_str(),
            ),
        })
    }
}
