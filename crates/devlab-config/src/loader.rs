// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration file loading with override support
//!
//! This module implements the 3-tier configuration loading system:
//! 1. TOML file (base defaults)
//! 2. Environment variables (runtime overrides)
//! 3. CLI arguments (explicit user overrides)

use crate::{ConfigError, ConfigResult, DevlabConfig};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Find the DEVLAB configuration file
///
/// Search order:
/// 1. `DEVLAB_CONFIG_PATH` environment variable
/// 2. Current working directory: `./devlab_configuration.toml`
/// 3. Ancestor directories (searches up to 5 levels)
///
/// # Errors
///
/// Returns `ConfigError::FileNotFound` if no config file is found in any location
pub fn find_config_file() -> ConfigResult<PathBuf> {
    // 1. Check environment variable first
    if let Ok(env_path) = env::var("DEVLAB_CONFIG_PATH") {
        let path = PathBuf::from(env_path);
        if path.exists() {
            return Ok(path);
        } else {
            return Err(ConfigError::FileNotFound(format!(
                "Config file specified by DEVLAB_CONFIG_PATH not found: {}",
                path.display()
            )));
        }
    }

    // 2. Search in common locations
    let mut search_paths = Vec::new();

    if let Ok(cwd) = env::current_dir() {
        search_paths.push(cwd.join("devlab_configuration.toml"));

        // Search up to 5 levels for workspace root
        let mut current = cwd.clone();
        for _ in 0..5 {
            if let Some(parent) = current.parent() {
                search_paths.push(parent.join("devlab_configuration.toml"));
                current = parent.to_path_buf();
            }
        }
    }

    for path in &search_paths {
        if path.exists() {
            return Ok(path.clone());
        }
    }

    let search_list = search_paths
        .iter()
        .map(|p| format!("  - {}", p.display()))
        .collect::<Vec<_>>()
        .join("\n");

    Err(ConfigError::FileNotFound(format!(
        "DEVLAB configuration file 'devlab_configuration.toml' not found in any of these locations:\n{}\n\nSet DEVLAB_CONFIG_PATH environment variable to specify custom location.",
        search_list
    )))
}

/// Load configuration from TOML file
///
/// # Arguments
///
/// * `config_path` - Optional path to config file. If `None`, will search for config file.
/// * `cli_args` - Optional CLI argument overrides
///
/// # Returns
///
/// Complete `DevlabConfig` with all overrides applied
///
/// # Errors
///
/// Returns error if config file is not found or contains invalid TOML
pub fn load_config(
    config_path: Option<&Path>,
    cli_args: Option<&HashMap<String, String>>,
) -> ConfigResult<DevlabConfig> {
    let config_file = if let Some(path) = config_path {
        path.to_path_buf()
    } else {
        find_config_file()?
    };

    let content = fs::read_to_string(&config_file)?;

    let mut config: DevlabConfig = toml::from_str(&content)?;

    // Apply overrides in order
    apply_environment_overrides(&mut config);

    if let Some(cli) = cli_args {
        apply_cli_overrides(&mut config, cli);
    }

    Ok(config)
}

/// Apply environment variable overrides to configuration
///
/// Supported environment variables:
/// - `DEVLAB_API_HOST` -> `api.host`
/// - `DEVLAB_API_PORT` -> `api.port`
/// - `DEVLAB_DB_PATH` -> `storage.db_path`
/// - `DEVLAB_LOG_LEVEL` -> `system.log_level`
/// - `DEVLAB_JWT_SECRET` -> `auth.jwt_secret`
/// - `DEVLAB_LLM_API_URL` -> `llm.default_api_url`
/// - `DEVLAB_LLM_API_KEY` -> `llm.default_api_key`
/// - `DEVLAB_LLM_MODEL_NAME` -> `llm.default_model_name`
pub fn apply_environment_overrides(config: &mut DevlabConfig) {
    // API settings
    if let Ok(value) = env::var("DEVLAB_API_HOST") {
        config.api.host = value;
    }
    if let Ok(value) = env::var("DEVLAB_API_PORT") {
        if let Ok(port) = value.parse::<u16>() {
            config.api.port = port;
        }
    }

    // Storage settings
    if let Ok(value) = env::var("DEVLAB_DB_PATH") {
        config.storage.db_path = PathBuf::from(value);
    }

    // System settings
    if let Ok(value) = env::var("DEVLAB_LOG_LEVEL") {
        config.system.log_level = value;
    }
    if let Ok(value) = env::var("DEVLAB_DEBUG") {
        config.system.debug =
            value.to_lowercase() == "true" || value == "1" || value.to_lowercase() == "yes";
    }

    // Auth settings
    if let Ok(value) = env::var("DEVLAB_JWT_SECRET") {
        config.auth.jwt_secret = value;
    }

    // LLM defaults
    if let Ok(value) = env::var("DEVLAB_LLM_API_URL") {
        config.llm.default_api_url = value;
    }
    if let Ok(value) = env::var("DEVLAB_LLM_API_KEY") {
        config.llm.default_api_key = value;
    }
    if let Ok(value) = env::var("DEVLAB_LLM_MODEL_NAME") {
        config.llm.default_model_name = value;
    }
}

/// Apply CLI argument overrides to configuration
///
/// # Arguments
///
/// * `config` - Configuration to modify
/// * `cli_args` - HashMap of CLI arguments (e.g., `{"api_host": "192.168.1.1", "api_port": "9000"}`)
pub fn apply_cli_overrides(config: &mut DevlabConfig, cli_args: &HashMap<String, String>) {
    if let Some(value) = cli_args.get("api_host") {
        config.api.host = value.clone();
    }
    if let Some(value) = cli_args.get("api_port") {
        if let Ok(port) = value.parse::<u16>() {
            config.api.port = port;
        }
    }
    if let Some(value) = cli_args.get("db_path") {
        config.storage.db_path = PathBuf::from(value);
    }
    if let Some(value) = cli_args.get("debug") {
        config.system.debug = value.to_lowercase() == "true" || value == "1";
    }
    if let Some(value) = cli_args.get("log_level") {
        config.system.log_level = value.clone();
    }
}
