// crates/serverless-contracts-config/src/config.rs
// ============================================================================
// Module: Serverless Contracts Configuration
// Description: Configuration loading and validation for contract runtimes.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: serverless-contracts-client, serverless-contracts-core, serde, toml, url
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size and path limits
//! and converted into the runtime pieces the adapters take: validation
//! settings, an HTTP transport, and an audit sink.
//! Invariants:
//! - Unknown keys are rejected.
//! - Every loaded configuration has passed [`ContractsConfig::validate`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use serverless_contracts_client::ReqwestTransport;
use serverless_contracts_core::AuditSink;
use serverless_contracts_core::NoopAuditSink;
use serverless_contracts_core::StderrAuditSink;
use serverless_contracts_core::ValidationMode;
use serverless_contracts_core::ValidationSettings;
use serverless_contracts_core::WriterAuditSink;
use thiserror::Error;
use url::Url;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "serverless-contracts.toml";
/// Environment variable used to override the config path.
pub const CONFIG_ENV_VAR: &str = "SERVERLESS_CONTRACTS_CONFIG";
/// Maximum configuration file size in bytes.
pub const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Minimum client timeout in milliseconds.
pub const MIN_TIMEOUT_MS: u64 = 100;
/// Maximum client timeout in milliseconds.
pub const MAX_TIMEOUT_MS: u64 = 60_000;
/// Default client timeout in milliseconds.
const DEFAULT_TIMEOUT_MS: u64 = 30_000;
/// Maximum number of default client headers.
pub const MAX_DEFAULT_HEADERS: usize = 64;

// ============================================================================
// SECTION: Configuration Types
// ============================================================================

/// Serverless Contracts runtime configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContractsConfig {
    /// Schema validation policy.
    #[serde(default)]
    pub validation: ValidationConfig,
    /// Outbound client configuration.
    #[serde(default)]
    pub client: ClientConfig,
    /// Audit sink configuration.
    #[serde(default)]
    pub audit: AuditConfig,
}

impl ContractsConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// Resolution order: explicit `path`, then [`CONFIG_ENV_VAR`], then
    /// `serverless-contracts.toml` in the working directory.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = resolve_path(path);
        check_path("config path", &resolved)?;
        let bytes = fs::read(&resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        Self::from_toml_str(content)
    }

    /// Parses and validates configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when parsing or validation fails.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.client.validate()?;
        self.audit.validate()?;
        Ok(())
    }

    /// Returns the validation settings described by `[validation]`.
    #[must_use]
    pub fn validation_settings(&self) -> ValidationSettings {
        ValidationSettings::from_mode(self.validation.mode, self.validation.validate_output)
    }

    /// Builds the HTTP transport described by `[client]`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when no base URL is configured or the
    /// client cannot be built.
    pub fn client_transport(&self) -> Result<ReqwestTransport, ConfigError> {
        let base_url = self
            .client
            .base_url
            .as_deref()
            .ok_or_else(|| ConfigError::Invalid("client.base_url is required".to_string()))?;
        let base_url = parse_base_url(base_url)?;
        let transport = ReqwestTransport::with_timeout(
            base_url,
            Duration::from_millis(self.client.timeout_ms),
        )
        .map_err(|err| ConfigError::Invalid(format!("client transport: {err}")))?;
        Ok(transport.with_default_headers(self.client.default_headers.clone()))
    }

    /// Builds the audit sink described by `[audit]`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] when the audit file cannot be opened.
    pub fn audit_sink(&self) -> Result<Arc<dyn AuditSink>, ConfigError> {
        match self.audit.sink {
            AuditSinkKind::None => Ok(Arc::new(NoopAuditSink)),
            AuditSinkKind::Stderr => Ok(Arc::new(StderrAuditSink)),
            AuditSinkKind::File => {
                let path = self.audit.path.as_deref().ok_or_else(|| {
                    ConfigError::Invalid("audit.path is required for file sink".to_string())
                })?;
                let sink = WriterAuditSink::open_append(Path::new(path.trim()))
                    .map_err(|err| ConfigError::Io(err.to_string()))?;
                Ok(Arc::new(sink))
            }
        }
    }
}

/// Schema validation policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ValidationConfig {
    /// Enforcement mode.
    #[serde(default)]
    pub mode: ValidationMode,
    /// Whether output values are validated when enforcing.
    #[serde(default = "default_validate_output")]
    pub validate_output: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            mode: ValidationMode::Off,
            validate_output: default_validate_output(),
        }
    }
}

/// Outbound client configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    /// Base URL of the deployed API.
    #[serde(default)]
    pub base_url: Option<String>,
    /// Request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Headers sent with every request.
    #[serde(default)]
    pub default_headers: BTreeMap<String, String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_ms: default_timeout_ms(),
            default_headers: BTreeMap::new(),
        }
    }
}

impl ClientConfig {
    /// Validates client settings.
    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(base_url) = &self.base_url {
            parse_base_url(base_url)?;
        }
        if !(MIN_TIMEOUT_MS..=MAX_TIMEOUT_MS).contains(&self.timeout_ms) {
            return Err(ConfigError::Invalid(format!(
                "client.timeout_ms must be between {MIN_TIMEOUT_MS} and {MAX_TIMEOUT_MS}"
            )));
        }
        if self.default_headers.len() > MAX_DEFAULT_HEADERS {
            return Err(ConfigError::Invalid(format!(
                "client.default_headers exceeds {MAX_DEFAULT_HEADERS} entries"
            )));
        }
        for name in self.default_headers.keys() {
            if name.is_empty() || name.bytes().any(|byte| !byte.is_ascii_graphic() || byte == b':')
            {
                return Err(ConfigError::Invalid(format!(
                    "client.default_headers has invalid header name: {name}"
                )));
            }
        }
        Ok(())
    }
}

/// Audit sink selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditSinkKind {
    /// Discard audit events.
    #[default]
    None,
    /// JSON lines on stderr.
    Stderr,
    /// JSON lines appended to `audit.path`.
    File,
}

/// Audit sink configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuditConfig {
    /// Sink selection.
    #[serde(default)]
    pub sink: AuditSinkKind,
    /// Audit log path for the file sink.
    #[serde(default)]
    pub path: Option<String>,
}

impl AuditConfig {
    /// Validates audit settings.
    fn validate(&self) -> Result<(), ConfigError> {
        match (self.sink, self.path.as_deref()) {
            (AuditSinkKind::File, None) => {
                Err(ConfigError::Invalid("audit.path is required for file sink".to_string()))
            }
            (AuditSinkKind::File, Some(path)) => check_path("audit.path", Path::new(path.trim())),
            (AuditSinkKind::None | AuditSinkKind::Stderr, Some(_)) => Err(ConfigError::Invalid(
                "audit.path is only valid for file sink".to_string(),
            )),
            (AuditSinkKind::None | AuditSinkKind::Stderr, None) => Ok(()),
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Default for `validation.validate_output`.
const fn default_validate_output() -> bool {
    true
}

/// Default for `client.timeout_ms`.
const fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

/// Parses a base URL, requiring an http(s) scheme.
fn parse_base_url(value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value)
        .map_err(|err| ConfigError::Invalid(format!("client.base_url is invalid: {err}")))?;
    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(ConfigError::Invalid(
            "client.base_url must be an http or https url".to_string(),
        ));
    }
    Ok(url)
}

/// Picks the config path: explicit argument, then environment, then default.
fn resolve_path(path: Option<&Path>) -> PathBuf {
    path.map(Path::to_path_buf)
        .or_else(|| env::var_os(CONFIG_ENV_VAR).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_NAME))
}

/// Checks a path against total and per-component length limits.
fn check_path(label: &str, path: &Path) -> Result<(), ConfigError> {
    if path.as_os_str().is_empty() {
        return Err(ConfigError::Invalid(format!("{label} must be non-empty")));
    }
    if path.as_os_str().len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid(format!("{label} exceeds max length")));
    }
    let oversized = path
        .components()
        .any(|component| component.as_os_str().len() > MAX_PATH_COMPONENT_LENGTH);
    if oversized {
        return Err(ConfigError::Invalid(format!("{label} component too long")));
    }
    Ok(())
}
