//! Server configuration from environment variables.

use std::path::PathBuf;

use anyhow::Context;

/// Where the key-value store lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageLocation {
    Memory,
    File(PathBuf),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub storage: StorageLocation,
    /// Create the demo set when the library is empty at startup.
    pub seed_demo: bool,
}

impl Config {
    /// Read configuration from the process environment.
    ///
    /// Env vars:
    /// - HOST (default "0.0.0.0")
    /// - PORT (default 3000)
    /// - DATABASE_PATH: SQLite file, or ":memory:" (default in the local data dir)
    /// - SEED_DEMO: "true"/"1" to seed the demo set on first run
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    fn from_vars<F>(var: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = var("HOST").unwrap_or_else(|| "0.0.0.0".to_string());

        let port = match var("PORT") {
            Some(port) => port
                .parse::<u16>()
                .with_context(|| format!("PORT must be a port number, got {:?}", port))?,
            None => 3000,
        };

        let storage = match var("DATABASE_PATH") {
            Some(path) if path == ":memory:" => StorageLocation::Memory,
            Some(path) => StorageLocation::File(PathBuf::from(path)),
            None => StorageLocation::File(default_db_path()),
        };

        let seed_demo = var("SEED_DEMO")
            .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Ok(Self {
            host,
            port,
            storage,
            seed_demo,
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn default_db_path() -> PathBuf {
    // Use app data directory for production, fallback to current dir
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("advanced-memory")
        .join("memory.db")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> anyhow::Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]).unwrap();
        assert_eq!(config.addr(), "0.0.0.0:3000");
        assert!(!config.seed_demo);
        match config.storage {
            StorageLocation::File(path) => assert!(path.ends_with("advanced-memory/memory.db")),
            StorageLocation::Memory => panic!("expected file storage"),
        }
    }

    #[test]
    fn test_overrides() {
        let config = config(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("DATABASE_PATH", ":memory:"),
            ("SEED_DEMO", "TRUE"),
        ])
        .unwrap();

        assert_eq!(config.addr(), "127.0.0.1:8080");
        assert_eq!(config.storage, StorageLocation::Memory);
        assert!(config.seed_demo);
    }

    #[test]
    fn test_invalid_port() {
        assert!(config(&[("PORT", "lots")]).is_err());
    }
}
