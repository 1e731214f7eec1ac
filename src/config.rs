//! Startup configuration read from the process environment.

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::constants::{DEFAULT_PORT, DEFAULT_PUBLIC_DIR, NWS_API_BASE};

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub public_dir: PathBuf,
    /// Base URL of the weather API, without a trailing slash.
    pub api_base: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            public_dir: PathBuf::from(DEFAULT_PUBLIC_DIR),
            api_base: NWS_API_BASE.to_string(),
        }
    }
}

impl Config {
    /// Reads `PORT` and `PUBLIC_DIR`, falling back to the defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(port) = lookup("PORT").filter(|p| !p.trim().is_empty()) {
            config.port = port
                .trim()
                .parse()
                .with_context(|| format!("Invalid PORT value: {}", port))?;
        }

        if let Some(dir) = lookup("PUBLIC_DIR").filter(|d| !d.is_empty()) {
            config.public_dir = PathBuf::from(dir);
        }

        Ok(config)
    }
}
