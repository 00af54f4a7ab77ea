//! Configuration validation
//!
//! This module provides validation logic to ensure configuration values are
//! consistent and within valid ranges.

use crate::{ConfigError, ConfigResult, DevlabConfig};

/// Validation errors that can occur during config validation
#[derive(Debug, Clone)]
pub enum ConfigValidationError {
    InvalidPortRange { port_name: String, port: u16 },
    MissingRequired { field: String },
    InvalidValue { field: String, reason: String },
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPortRange { port_name, port } => {
                write!(
                    f,
                    "Port {} = {} is outside valid range (1024-65535)",
                    port_name, port
                )
            }
            Self::MissingRequired { field } => {
                write!(f, "Missing required configuration: {}", field)
            }
            Self::InvalidValue { field, reason } => {
                write!(f, "Invalid configuration value for {}: {}", field, reason)
            }
        }
    }
}

/// Validate the complete configuration
///
/// Checks for:
/// - Port range (1024-65535 for non-root ports)
/// - Required fields (signing secret, database path)
/// - Valid value ranges (token lifetimes)
///
/// # Errors
///
/// Returns `ConfigError::ValidationError` with details if validation fails
pub fn validate_config(config: &DevlabConfig) -> ConfigResult<()> {
    let mut errors = Vec::new();

    if config.api.port < 1024 {
        errors.push(ConfigValidationError::InvalidPortRange {
            port_name: "api.port".to_string(),
            port: config.api.port,
        });
    }

    if config.auth.jwt_secret.is_empty() {
        errors.push(ConfigValidationError::MissingRequired {
            field: "auth.jwt_secret".to_string(),
        });
    }
    if !config.system.debug && config.auth.jwt_secret == "insecure-dev-secret" {
        errors.push(ConfigValidationError::InvalidValue {
            field: "auth.jwt_secret".to_string(),
            reason: "default development secret is not allowed outside debug mode".to_string(),
        });
    }

    if config.auth.access_token_minutes <= 0 {
        errors.push(ConfigValidationError::InvalidValue {
            field: "auth.access_token_minutes".to_string(),
            reason: "must be positive".to_string(),
        });
    }
    if config.auth.refresh_token_minutes <= 0 {
        errors.push(ConfigValidationError::InvalidValue {
            field: "auth.refresh_token_minutes".to_string(),
            reason: "must be positive".to_string(),
        });
    }

    if config.storage.db_path.as_os_str().is_empty() {
        errors.push(ConfigValidationError::MissingRequired {
            field: "storage.db_path".to_string(),
        });
    }

    if !errors.is_empty() {
        let error_messages = errors
            .iter()
            .map(|e| format!("  - {}", e))
            .collect::<Vec<_>>()
            .join("\n");

        return Err(ConfigError::ValidationError(format!(
            "Configuration validation failed:\n{}",
            error_messages
        )));
    }

    Ok(())
}
