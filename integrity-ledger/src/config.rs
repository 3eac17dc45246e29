//! Configuration for the integrity ledger

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Ledger configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Data directory for the chain file
    pub data_dir: PathBuf,

    /// Chain file name inside `data_dir`
    pub chain_file: String,

    /// Service name
    pub service_name: String,

    /// Service version
    pub service_version: String,

    /// Mining configuration
    pub mining: MiningConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data/chain"),
            chain_file: "invoice_chain.json".to_string(),
            service_name: "integrity-ledger".to_string(),
            service_version: env!("CARGO_PKG_VERSION").to_string(),
            mining: MiningConfig::default(),
        }
    }
}

/// Proof-of-work configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MiningConfig {
    /// Leading zero hex characters required of a block hash
    pub difficulty: usize,

    /// Nonce search cap; exceeding it is a fatal mining error
    pub max_iterations: u64,
}

impl Default for MiningConfig {
    fn default() -> Self {
        Self {
            difficulty: 4,                // expected work ~16^4 hashes
            max_iterations: 100_000_000,  // orders of magnitude above expected
        }
    }
}

impl Config {
    /// Full path of the chain file
    pub fn chain_path(&self) -> PathBuf {
        self.data_dir.join(&self.chain_file)
    }

    /// Load from file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| crate::Error::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from environment variables
    pub fn from_env() -> crate::Result<Self> {
        let mut config = Config::default();

        if let Ok(data_dir) = std::env::var("LEDGER_DATA_DIR") {
            config.data_dir = PathBuf::from(data_dir);
        }

        if let Ok(difficulty) = std::env::var("LEDGER_DIFFICULTY") {
            config.mining.difficulty = difficulty
                .parse()
                .map_err(|_| crate::Error::Config(format!("Bad LEDGER_DIFFICULTY: {}", difficulty)))?;
        }

        if let Ok(cap) = std::env::var("LEDGER_MAX_ITERATIONS") {
            config.mining.max_iterations = cap
                .parse()
                .map_err(|_| crate::Error::Config(format!("Bad LEDGER_MAX_ITERATIONS: {}", cap)))?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Check configured bounds
    ///
    /// A pathological difficulty would make the nonce search effectively
    /// non-terminating, so it is rejected up front.
    pub fn validate(&self) -> crate::Result<()> {
        if self.mining.difficulty > 8 {
            return Err(crate::Error::Config(format!(
                "Difficulty {} exceeds the supported maximum of 8",
                self.mining.difficulty
            )));
        }

        if self.mining.max_iterations == 0 {
            return Err(crate::Error::Config(
                "Mining iteration cap must be positive".to_string(),
            ));
        }

        if self.chain_file.is_empty() {
            return Err(crate::Error::Config("Chain file name is empty".to_string()));
        }

        Ok(())
    }
}
