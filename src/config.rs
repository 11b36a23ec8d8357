//! Configuration management for morgan-search using the prefer crate.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Default number of results per backend request.
pub const DEFAULT_PAGE_SIZE: usize = 15;

/// Default Islandora root when nothing is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/";

/// Default server bind address.
pub const DEFAULT_BIND: &str = "127.0.0.1:3030";

/// Search backend (Islandora Solr) configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolrConfig {
    /// Islandora root; `solr/` is appended when building queries.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Results per page.
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Fedora content model every result must have.
    #[serde(default = "default_model")]
    pub model: String,
    /// Collection every result must descend from.
    #[serde(default = "default_ancestor")]
    pub ancestor: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_model() -> String {
    "bookCModel".to_string()
}

fn default_ancestor() -> String {
    "rekl:morgan-ms010".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for SolrConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            page_size: default_page_size(),
            model: default_model(),
            ancestor: default_ancestor(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl SolrConfig {
    /// Apply `ISLANDORA_BASE_URL` and `MORGAN_SEARCH_PAGE_SIZE` overrides.
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(url) = std::env::var("ISLANDORA_BASE_URL")
            .ok()
            .filter(|s| !s.is_empty())
        {
            self.base_url = url;
        }
        if let Some(size) = std::env::var("MORGAN_SEARCH_PAGE_SIZE")
            .ok()
            .and_then(|s| s.parse::<usize>().ok())
            .filter(|s| *s > 0)
        {
            self.page_size = size;
        }
        self.normalized()
    }

    /// Ensure the base URL ends with a slash and the page size is usable.
    pub fn normalized(mut self) -> Self {
        if !self.base_url.ends_with('/') {
            self.base_url.push('/');
        }
        if self.page_size == 0 {
            self.page_size = DEFAULT_PAGE_SIZE;
        }
        self
    }
}

/// Web server configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address: a port, a host, or `host:port`.
    #[serde(default = "default_bind")]
    pub bind: String,
}

fn default_bind() -> String {
    DEFAULT_BIND.to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

/// Top-level configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub solr: SolrConfig,
    #[serde(default)]
    pub server: ServerConfig,
    /// Path of the file this config was loaded from.
    #[serde(skip)]
    pub source_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration using prefer crate for discovery.
    /// Falls back to defaults with environment overrides when no file is found.
    pub async fn load() -> Self {
        match prefer::load("morgan-search").await {
            Ok(pref_config) => {
                if let Some(path) = pref_config.source_path() {
                    match Self::load_from_path(path).await {
                        Ok(config) => config,
                        Err(e) => {
                            tracing::warn!("{}; using defaults", e);
                            Self::default_with_env()
                        }
                    }
                } else {
                    Self::default_with_env()
                }
            }
            Err(_) => Self::default_with_env(),
        }
    }

    /// Load from an explicit path, or discover one.
    pub async fn load_with_override(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::load_from_path(path)
                .await
                .map_err(|e| anyhow::anyhow!(e)),
            None => Ok(Self::load().await),
        }
    }

    /// Default config with environment variable overrides applied.
    pub fn default_with_env() -> Self {
        let mut config = Self::default();
        config.solr = config.solr.with_env_overrides();
        config
    }

    /// Load configuration from a specific file path.
    /// Supports JSON, TOML and YAML based on file extension.
    pub async fn load_from_path(path: &Path) -> Result<Self, String> {
        let contents = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

        let mut config: Config = match ext {
            "toml" => toml::from_str(&contents)
                .map_err(|e| format!("Failed to parse TOML config: {}", e))?,
            "yaml" | "yml" => serde_yaml::from_str(&contents)
                .map_err(|e| format!("Failed to parse YAML config: {}", e))?,
            _ => serde_json::from_str(&contents)
                .map_err(|e| format!("Failed to parse JSON config: {}", e))?,
        };

        config.source_path = Some(path.to_path_buf());
        config.solr = config.solr.with_env_overrides();
        Ok(config)
    }
}
