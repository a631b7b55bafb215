use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct MnemoConfig {
    pub server: ServerConfig,
    pub embedding: EmbeddingConfig,
    pub store: StoreConfig,
    pub retrieval: RetrievalConfig,
    pub ingest: IngestConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub transport: String,
    pub host: String,
    pub port: u16,
    pub log_level: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct EmbeddingConfig {
    pub host: String,
    pub port: u16,
    pub model: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct StoreConfig {
    pub host: String,
    pub port: u16,
    pub collection: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct RetrievalConfig {
    pub default_results: usize,
    /// Cosine-distance band thresholds, ascending. Distances below `highly`
    /// are "Highly relevant", below `somewhat` are "Somewhat relevant",
    /// below `slightly` are "Slightly relevant", anything else "Not very relevant".
    pub highly: f64,
    pub somewhat: f64,
    pub slightly: f64,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct IngestConfig {
    /// Number of PDF pages handed to the agent per memorize_pdf_file call.
    pub page_window: usize,
}

impl Default for MnemoConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            embedding: EmbeddingConfig::default(),
            store: StoreConfig::default(),
            retrieval: RetrievalConfig::default(),
            ingest: IngestConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            transport: "stdio".into(),
            host: "127.0.0.1".into(),
            port: 8900,
            log_level: "info".into(),
        }
    }
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            host: "localhost".into(),
            port: 11434,
            model: "all-minilm:l6-v2".into(),
            timeout_secs: 30,
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            host: "localhost".into(),
            port: 8321,
            collection: "texts_collection".into(),
            timeout_secs: 30,
        }
    }
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            default_results: 5,
            highly: 0.2,
            somewhat: 0.5,
            slightly: 0.8,
        }
    }
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self { page_window: 20 }
    }
}

/// Returns `~/.mnemo/`
pub fn default_mnemo_dir() -> PathBuf {
    dirs::home_dir()
        .expect("home directory must exist")
        .join(".mnemo")
}

/// Returns the default config file path: `~/.mnemo/config.toml`
pub fn default_config_path() -> PathBuf {
    default_mnemo_dir().join("config.toml")
}

impl MnemoConfig {
    /// Load config from TOML file (if it exists) then apply env var overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(default_config_path())
    }

    /// Load from a specific path, then apply env var overrides.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let contents =
                std::fs::read_to_string(path).context("failed to read config file")?;
            toml::from_str(&contents).context("failed to parse config TOML")?
        } else {
            info!("no config file at {}, using defaults", path.display());
            MnemoConfig::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides.
    ///
    /// `OLLAMA_PORT` and `CHROMADB_PORT` match what the external services
    /// themselves are launched with, so one variable steers both sides.
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("OLLAMA_PORT") {
            if let Ok(port) = val.parse() {
                self.embedding.port = port;
            }
        }
        if let Ok(val) = std::env::var("CHROMADB_PORT") {
            if let Ok(port) = val.parse() {
                self.store.port = port;
            }
        }
        if let Ok(val) = std::env::var("MNEMO_COLLECTION") {
            self.store.collection = val;
        }
        if let Ok(val) = std::env::var("MNEMO_LOG_LEVEL") {
            self.server.log_level = val;
        }
    }

    /// Base URL of the embedding service.
    pub fn embedding_url(&self) -> String {
        format!("http://{}:{}", self.embedding.host, self.embedding.port)
    }

    /// Base URL of the vector store service.
    pub fn store_url(&self) -> String {
        format!("http://{}:{}", self.store.host, self.store.port)
    }
}
