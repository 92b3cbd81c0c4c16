use std::env;
use anyhow::{Context, Result};

/// Runtime configuration, loaded once at startup.
/// Every value has a default so the binary runs with zero configuration;
/// the SQLite file is created next to the process if it does not exist.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub database_path: String,
    pub environment: Environment,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    Local,
    Production,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        // Load .env file if it exists (for local development)
        dotenvy::dotenv().ok();

        let port = env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()
            .context("PORT must be a valid port number")?;

        if port == 0 {
            anyhow::bail!("PORT must be greater than 0");
        }

        let database_path = env::var("DATABASE_PATH")
            .unwrap_or_else(|_| "japanese_phrases.db".to_string());

        if database_path.trim().is_empty() {
            anyhow::bail!("DATABASE_PATH cannot be empty");
        }

        let environment = match env::var("ENV").unwrap_or_else(|_| "local".to_string()).as_str() {
            "production" | "prod" => Environment::Production,
            _ => Environment::Local,
        };

        Ok(Config {
            port,
            database_path,
            environment,
        })
    }
}

impl Environment {
    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }

    pub fn is_local(&self) -> bool {
        matches!(self, Environment::Local)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_helpers() {
        assert!(Environment::Local.is_local());
        assert!(!Environment::Local.is_production());
        assert!(Environment::Production.is_production());
        assert!(!Environment::Production.is_local());
    }
}
