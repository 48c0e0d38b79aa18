use crate::error::config::ConfigError;
use crate::{DEFAULT_BACKEND_ADDRESS, DEFAULT_FRAME_BASE_URL, DEFAULT_SOCKET_NAME};

use common::ErrorLocation;
use models::{SocketTarget, SocketTargetBuilder};

use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::{info, warn};
use serde::{Deserialize, Serialize};
use url::Url;

const CONFIG_FILE_NAME: &str = "config.json";
const CONFIG_VERSION: u32 = 1;
const APP_DIR_NAME: &str = "compile-client";

pub const BACKEND_URL_ENV: &str = "COMPILE_CLIENT_BACKEND_URL";
pub const SOCKET_PROTOCOL_ENV: &str = "COMPILE_CLIENT_SOCKET_PROTOCOL";
pub const FRAME_BASE_URL_ENV: &str = "COMPILE_CLIENT_FRAME_BASE_URL";

// ============================================
// CONFIG STRUCTS
// ============================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BackendConfig {
    #[serde(default = "default_address")]
    pub address: String,
    #[serde(default = "default_socket_name")]
    pub socket_name: String,
    #[serde(default)]
    pub protocol: Option<String>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            address: default_address(),
            socket_name: default_socket_name(),
            protocol: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RetryConfig {
    /// Fixed reconnect interval, humantime format ("2s", "1500ms").
    #[serde(default = "default_retry_interval")]
    pub interval: String,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            interval: default_retry_interval(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EditorConfig {
    #[serde(default = "default_poll_interval")]
    pub poll_interval: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            poll_interval: default_poll_interval(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DisplayConfig {
    /// Result handles are resolved against this URL.
    #[serde(default = "default_frame_base_url")]
    pub frame_base_url: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            frame_base_url: default_frame_base_url(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClientConfig {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default)]
    pub backend: BackendConfig,

    #[serde(default)]
    pub retry: RetryConfig,

    #[serde(default)]
    pub editor: EditorConfig,

    #[serde(default)]
    pub display: DisplayConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            backend: BackendConfig::default(),
            retry: RetryConfig::default(),
            editor: EditorConfig::default(),
            display: DisplayConfig::default(),
        }
    }
}

// ============================================
// DEFAULT FUNCTIONS
// ============================================

fn default_version() -> u32 {
    CONFIG_VERSION
}
fn default_address() -> String {
    DEFAULT_BACKEND_ADDRESS.to_string()
}
fn default_socket_name() -> String {
    DEFAULT_SOCKET_NAME.to_string()
}
fn default_retry_interval() -> String {
    "2s".to_string()
}
fn default_poll_interval() -> String {
    "500ms".to_string()
}
fn default_frame_base_url() -> String {
    DEFAULT_FRAME_BASE_URL.to_string()
}

/// `{platform config dir}/compile-client`, when the platform has one.
pub fn default_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME))
}

/// Load `.env` from the working directory, if present.
pub fn load_dotenv() -> Option<PathBuf> {
    match dotenvy::dotenv() {
        Ok(path) => {
            info!("Loaded .env from: {}", path.display());
            Some(path)
        }
        Err(e) if e.not_found() => None,
        Err(e) => {
            warn!("Failed to parse .env: {e}");
            None
        }
    }
}

// ============================================
// IMPLEMENTATION
// ============================================

impl ClientConfig {
    /// Load config from {config_dir}/config.json.
    ///
    /// # Returns
    ///
    /// Returns `Ok(ClientConfig)` if loaded successfully or defaults if file missing.
    /// Returns `Err(ConfigError)` if file exists but is corrupted/invalid.
    pub fn load(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);

        if !config_path.exists() {
            info!(
                "Config file not found at {}, using defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path).map_err(|e| {
            warn!("Failed to read config file: {}", e);
            ConfigError::ReadError {
                location: ErrorLocation::caller(),
                path: config_path.clone(),
                source: e,
            }
        })?;

        let config: ClientConfig = serde_json::from_str(&contents).map_err(|e| {
            warn!("Failed to parse config JSON: {}", e);
            ConfigError::ParseError {
                location: ErrorLocation::caller(),
                path: config_path.clone(),
                reason: e.to_string(),
            }
        })?;

        config.validate()?;

        info!("Config loaded from {}", config_path.display());
        Ok(config)
    }

    /// Save config to {config_dir}/config.json using atomic write.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if validation, directory creation, serialization,
    /// write or rename fails.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        self.validate()?;

        std::fs::create_dir_all(config_dir).map_err(|e| ConfigError::WriteError {
            location: ErrorLocation::caller(),
            path: config_dir.to_path_buf(),
            source: e,
        })?;

        let config_path = config_dir.join(CONFIG_FILE_NAME);
        let temp_path = config_dir.join(format!("{}.tmp", CONFIG_FILE_NAME));

        let json = serde_json::to_string_pretty(self).map_err(|e| ConfigError::SerializeError {
            location: ErrorLocation::caller(),
            reason: e.to_string(),
        })?;

        std::fs::write(&temp_path, json).map_err(|e| ConfigError::WriteError {
            location: ErrorLocation::caller(),
            path: temp_path.clone(),
            source: e,
        })?;

        std::fs::rename(&temp_path, &config_path).map_err(|e| ConfigError::WriteError {
            location: ErrorLocation::caller(),
            path: config_path.clone(),
            source: e,
        })?;

        info!("Config saved to {}", config_path.display());
        Ok(())
    }

    /// Apply overrides from the process environment, then re-validate.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|key| env::var(key).ok())
    }

    /// Apply overrides from `lookup` (keyed by the `*_ENV` names), then re-validate.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(address) = lookup(BACKEND_URL_ENV) {
            info!("Backend address overridden by {BACKEND_URL_ENV}: {address}");
            self.backend.address = address;
        }

        if let Some(protocol) = lookup(SOCKET_PROTOCOL_ENV) {
            info!("Socket protocol overridden by {SOCKET_PROTOCOL_ENV}: {protocol}");
            self.backend.protocol = Some(protocol);
        }

        if let Some(frame_base_url) = lookup(FRAME_BASE_URL_ENV) {
            info!("Frame base URL overridden by {FRAME_BASE_URL_ENV}: {frame_base_url}");
            self.display.frame_base_url = frame_base_url;
        }

        self.validate()
    }

    /// Validate config values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version == 0 || self.version > CONFIG_VERSION {
            return Err(ConfigError::validation(format!(
                "Invalid version: {} (expected 1-{})",
                self.version, CONFIG_VERSION
            )));
        }

        let address = Url::parse(&self.backend.address).map_err(|e| {
            ConfigError::validation(format!(
                "Invalid backend address {}: {e}",
                self.backend.address
            ))
        })?;
        if !matches!(address.scheme(), "ws" | "wss") {
            return Err(ConfigError::validation(format!(
                "Backend address must use ws:// or wss://: {}",
                self.backend.address
            )));
        }

        if self.backend.socket_name.is_empty() {
            return Err(ConfigError::validation("socket_name cannot be empty"));
        }

        if self.backend.protocol.as_deref() == Some("") {
            return Err(ConfigError::validation("protocol cannot be empty string"));
        }

        parse_interval("retry.interval", &self.retry.interval)?;
        parse_interval("editor.poll_interval", &self.editor.poll_interval)?;

        self.frame_base_url()?;

        Ok(())
    }

    /// The target every `Connect` command carries.
    pub fn socket_target(&self) -> Result<SocketTarget, ConfigError> {
        let mut builder = SocketTargetBuilder::default()
            .with_name(self.backend.socket_name.as_str())
            .with_address(self.backend.address.as_str());

        if let Some(ref protocol) = self.backend.protocol {
            builder = builder.with_protocol(protocol.as_str());
        }

        Ok(builder.build()?)
    }

    pub fn retry_interval(&self) -> Result<Duration, ConfigError> {
        parse_interval("retry.interval", &self.retry.interval)
    }

    pub fn editor_poll_interval(&self) -> Result<Duration, ConfigError> {
        parse_interval("editor.poll_interval", &self.editor.poll_interval)
    }

    pub fn frame_base_url(&self) -> Result<Url, ConfigError> {
        let url = Url::parse(&self.display.frame_base_url).map_err(|e| {
            ConfigError::validation(format!(
                "Invalid frame base URL {}: {e}",
                self.display.frame_base_url
            ))
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::validation(format!(
                "Frame base URL must use http:// or https://: {}",
                self.display.frame_base_url
            )));
        }

        Ok(url)
    }
}

#[track_caller]
fn parse_interval(field: &str, value: &str) -> Result<Duration, ConfigError> {
    let interval = humantime::parse_duration(value)
        .map_err(|e| ConfigError::validation(format!("Invalid {field} {value:?}: {e}")))?;

    if interval.is_zero() {
        return Err(ConfigError::validation(format!("{field} must be non-zero")));
    }

    Ok(interval)
}
