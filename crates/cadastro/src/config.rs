// File: src/config.rs
// Purpose: Configuration parsing from cadastro.toml

use anyhow::{Context, Result};
use cadastro_validation::FieldKind;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::field::ValidationTrigger;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub endpoint: EndpointConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub validation: ValidationConfig,

    #[serde(default)]
    pub server: ServerConfig,
}

/// Registration endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointConfig {
    #[serde(default = "default_endpoint_url")]
    pub url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Which key-value backend keeps the entry route identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Memory,
    Filesystem,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,

    /// Directory for the filesystem backend
    #[serde(default = "default_storage_path")]
    pub path: PathBuf,
}

/// Per-field validation trigger
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationConfig {
    #[serde(default)]
    pub name: ValidationTrigger,

    #[serde(default)]
    pub email: ValidationTrigger,

    #[serde(default)]
    pub phone: ValidationTrigger,

    #[serde(default)]
    pub cpf: ValidationTrigger,

    #[serde(default)]
    pub birth_date: ValidationTrigger,

    #[serde(default)]
    pub consent: ValidationTrigger,
}

impl ValidationConfig {
    pub fn trigger_for(&self, field: FieldKind) -> ValidationTrigger {
        match field {
            FieldKind::Name => self.name,
            FieldKind::Email => self.email,
            FieldKind::Phone => self.phone,
            FieldKind::Cpf => self.cpf,
            FieldKind::BirthDate => self.birth_date,
            FieldKind::Consent => self.consent,
        }
    }
}

/// Reference server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// First path segment of entry URLs (`/<prefix>/<session>/...`)
    #[serde(default = "default_route_prefix")]
    pub route_prefix: String,

    /// Most forms kept in memory at once; the least recently used is evicted
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,

    /// Forms untouched for this many seconds are dropped
    #[serde(default = "default_session_idle_secs")]
    pub session_idle_secs: u64,
}

// Default values
fn default_endpoint_url() -> String {
    "http://127.0.0.1:3335/Person/Person".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_storage_path() -> PathBuf {
    PathBuf::from(".cadastro/storage")
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_route_prefix() -> String {
    "cadastro".to_string()
}

fn default_max_sessions() -> usize {
    1000
}

fn default_session_idle_secs() -> u64 {
    1800
}

// Default implementations
impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            url: default_endpoint_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            path: default_storage_path(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            route_prefix: default_route_prefix(),
            max_sessions: default_max_sessions(),
            session_idle_secs: default_session_idle_secs(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // If file doesn't exist, return default config
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        Ok(config)
    }

    /// Load configuration from default path (./cadastro.toml)
    pub fn load_default() -> Result<Self> {
        Self::load("cadastro.toml")
    }
}
