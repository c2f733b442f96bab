// crates/vrp-consent-config/src/config.rs
// ============================================================================
// Module: VRP Consent Configuration
// Description: Configuration loading and validation for the VRP consent tools.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: vrp-consent-core, serde, toml
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size and path limits.
//! Every section is optional and defaults to the baseline validator, required
//! idempotency keys, and stderr audit logging. Unknown keys are rejected.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::io::Read;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;
use vrp_consent_core::ConsentAuditSink;
use vrp_consent_core::DEFAULT_MAX_IDEMPOTENCY_KEY_LENGTH;
use vrp_consent_core::DEFAULT_MAX_PAYLOAD_BYTES;
use vrp_consent_core::FileAuditSink;
use vrp_consent_core::InitiationSettings;
use vrp_consent_core::NoopAuditSink;
use vrp_consent_core::StderrAuditSink;
use vrp_consent_core::ValidationOptions;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
pub const DEFAULT_CONFIG_NAME: &str = "vrp-consent.toml";
/// Environment variable used to override the config path.
pub const CONFIG_ENV_VAR: &str = "VRP_CONSENT_CONFIG";
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: u64 = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Maximum configurable payload size in bytes.
pub(crate) const MAX_MAX_PAYLOAD_BYTES: usize = 10 * 1024 * 1024;
/// Default maximum number of periodic limit entries.
pub(crate) const DEFAULT_MAX_PERIODIC_LIMITS: usize = 64;
/// Maximum configurable number of periodic limit entries.
pub(crate) const MAX_MAX_PERIODIC_LIMITS: usize = 1024;
/// Maximum configurable idempotency key length.
pub(crate) const MAX_MAX_KEY_LENGTH: usize = 256;

// ============================================================================
// SECTION: Configuration Model
// ============================================================================

/// VRP consent tooling configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VrpConsentConfig {
    /// Validator rule-set selection.
    #[serde(default)]
    pub validation: ValidationConfig,
    /// Input size and count limits.
    #[serde(default)]
    pub limits: LimitsConfig,
    /// Idempotency key policy.
    #[serde(default)]
    pub idempotency: IdempotencyConfig,
    /// Audit sink selection.
    #[serde(default)]
    pub audit: AuditConfig,
}

impl VrpConsentConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// The path is taken from `path`, then `VRP_CONSENT_CONFIG`, then
    /// `vrp-consent.toml` in the working directory.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = resolve_path(path)?;
        validate_path(&resolved)?;
        let bytes = read_config_bytes(&resolved)?;
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        Self::from_toml(content)
    }

    /// Parses and validates configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when parsing or validation fails.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
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
        self.limits.validate()?;
        self.idempotency.validate()?;
        self.audit.validate()?;
        Ok(())
    }

    /// Returns the validator options selected by this configuration.
    ///
    /// The periodic limit cap only applies when strict amounts are enabled.
    #[must_use]
    pub const fn validation_options(&self) -> ValidationOptions {
        ValidationOptions {
            strict_accounts: self.validation.strict_accounts,
            strict_amounts: self.validation.strict_amounts,
            check_window_order: self.validation.check_window_order,
            reference_time: None,
            max_periodic_limits: if self.validation.strict_amounts {
                Some(self.limits.max_periodic_limits)
            } else {
                None
            },
        }
    }

    /// Returns the initiation service settings selected by this configuration.
    #[must_use]
    pub const fn initiation_settings(&self) -> InitiationSettings {
        InitiationSettings {
            validation: self.validation_options(),
            reject_expired: self.validation.reject_expired,
            max_payload_bytes: self.limits.max_payload_bytes,
            idempotency_required: self.idempotency.required,
            max_idempotency_key_length: self.idempotency.max_key_length,
        }
    }

    /// Builds the configured audit sink.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] when the audit file cannot be opened.
    pub fn build_audit_sink(&self) -> Result<Arc<dyn ConsentAuditSink>, ConfigError> {
        match self.audit.sink {
            AuditSinkKind::Stderr => Ok(Arc::new(StderrAuditSink)),
            AuditSinkKind::None => Ok(Arc::new(NoopAuditSink)),
            AuditSinkKind::File => {
                let Some(path) = &self.audit.path else {
                    return Err(ConfigError::Invalid(
                        "audit.path is required when audit.sink = \"file\"".to_string(),
                    ));
                };
                let sink = FileAuditSink::new(path).map_err(|err| ConfigError::Io(err.to_string()))?;
                Ok(Arc::new(sink))
            }
        }
    }
}

/// Validator rule-set configuration.
#[allow(clippy::struct_excessive_bools, reason = "Config flags mirror user-facing toggles.")]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ValidationConfig {
    /// Enforce scheme-name membership, field lengths, and sort-code format.
    #[serde(default)]
    pub strict_accounts: bool,
    /// Enforce the decimal format of every amount.
    #[serde(default)]
    pub strict_amounts: bool,
    /// Reject windows whose start is after their end.
    #[serde(default)]
    pub check_window_order: bool,
    /// Reject windows that already ended.
    #[serde(default)]
    pub reject_expired: bool,
}

/// Input limit configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LimitsConfig {
    /// Maximum accepted payload size in bytes.
    #[serde(default = "default_max_payload_bytes")]
    pub max_payload_bytes: usize,
    /// Maximum number of periodic limit entries under strict amounts.
    #[serde(default = "default_max_periodic_limits")]
    pub max_periodic_limits: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_payload_bytes: default_max_payload_bytes(),
            max_periodic_limits: default_max_periodic_limits(),
        }
    }
}

impl LimitsConfig {
    /// Validates limit configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if !(1 ..= MAX_MAX_PAYLOAD_BYTES).contains(&self.max_payload_bytes) {
            return Err(ConfigError::Invalid(format!(
                "limits.max_payload_bytes must be between 1 and {MAX_MAX_PAYLOAD_BYTES}"
            )));
        }
        if !(1 ..= MAX_MAX_PERIODIC_LIMITS).contains(&self.max_periodic_limits) {
            return Err(ConfigError::Invalid(format!(
                "limits.max_periodic_limits must be between 1 and {MAX_MAX_PERIODIC_LIMITS}"
            )));
        }
        Ok(())
    }
}

/// Idempotency key configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IdempotencyConfig {
    /// Require an idempotency key on every initiation request.
    #[serde(default = "default_idempotency_required")]
    pub required: bool,
    /// Maximum idempotency key length in bytes.
    #[serde(default = "default_max_key_length")]
    pub max_key_length: usize,
}

impl Default for IdempotencyConfig {
    fn default() -> Self {
        Self {
            required: default_idempotency_required(),
            max_key_length: default_max_key_length(),
        }
    }
}

impl IdempotencyConfig {
    /// Validates idempotency configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if !(1 ..= MAX_MAX_KEY_LENGTH).contains(&self.max_key_length) {
            return Err(ConfigError::Invalid(format!(
                "idempotency.max_key_length must be between 1 and {MAX_MAX_KEY_LENGTH}"
            )));
        }
        Ok(())
    }
}

/// Audit sink selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditSinkKind {
    /// JSON lines on stderr.
    #[default]
    Stderr,
    /// JSON lines appended to `audit.path`.
    File,
    /// Discard audit events.
    None,
}

/// Audit configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuditConfig {
    /// Sink selection.
    #[serde(default)]
    pub sink: AuditSinkKind,
    /// Audit log path for the file sink.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl AuditConfig {
    /// Validates audit configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        match (&self.sink, &self.path) {
            (AuditSinkKind::File, None) => Err(ConfigError::Invalid(
                "audit.path is required when audit.sink = \"file\"".to_string(),
            )),
            (_, Some(path)) => validate_path_string("audit.path", &path.to_string_lossy()),
            (_, None) => Ok(()),
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading or validation errors.
#[derive(Debug, Error)]
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

/// Resolves the config path from CLI input or environment.
fn resolve_path(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = path {
        return Ok(path.to_path_buf());
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok(PathBuf::from(env_path));
    }
    Ok(PathBuf::from(DEFAULT_CONFIG_NAME))
}

/// Reads the config file, refusing oversized files before buffering them.
fn read_config_bytes(path: &Path) -> Result<Vec<u8>, ConfigError> {
    let file = fs::File::open(path).map_err(|err| ConfigError::Io(err.to_string()))?;
    let metadata = file.metadata().map_err(|err| ConfigError::Io(err.to_string()))?;
    if metadata.len() > MAX_CONFIG_FILE_SIZE {
        return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
    }
    let mut bytes = Vec::new();
    let mut limited = file.take(MAX_CONFIG_FILE_SIZE + 1);
    limited.read_to_end(&mut bytes).map_err(|err| ConfigError::Io(err.to_string()))?;
    let size = u64::try_from(bytes.len())
        .map_err(|_| ConfigError::Invalid("config file exceeds size limit".to_string()))?;
    if size > MAX_CONFIG_FILE_SIZE {
        return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
    }
    Ok(bytes)
}

/// Validates the resolved path against security limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

/// Validates a path string against length constraints.
fn validate_path_string(field: &str, value: &str) -> Result<(), ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    if trimmed.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid(format!("{field} exceeds max length")));
    }
    for component in Path::new(trimmed).components() {
        if component.as_os_str().len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid(format!("{field} path component too long")));
        }
    }
    Ok(())
}

/// Default maximum payload size.
const fn default_max_payload_bytes() -> usize {
    DEFAULT_MAX_PAYLOAD_BYTES
}

/// Default maximum periodic limit entries.
const fn default_max_periodic_limits() -> usize {
    DEFAULT_MAX_PERIODIC_LIMITS
}

/// Idempotency keys are required by default.
const fn default_idempotency_required() -> bool {
    true
}

/// Default maximum idempotency key length.
const fn default_max_key_length() -> usize {
    DEFAULT_MAX_IDEMPOTENCY_KEY_LENGTH
}
