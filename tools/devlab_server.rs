// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! DEVLAB HTTP API Server
//!
//! Loads configuration, initializes logging, opens the SQLite store,
//! wires the service layer, and serves the axum router.
//!
//! Run with: cargo run --bin devlab_server

use std::sync::Arc;

use devlab_api::security::TokenSigner;
use devlab_api::transports::http::server::{create_http_server, ApiState};
use devlab_config::{load_config, validate_config, DevlabConfig};
use devlab_observability::{init_logging, parse_debug_flags};
use devlab_services::impls::{
    AccountServiceImpl, DatasetServiceImpl, DeviceServiceImpl, ProfileServiceImpl,
    SystemServiceImpl,
};
use devlab_services::{
    AccountService, DatasetService, DeviceService, ProfileService, Store, SystemService,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ========================================================================
    // STEP 1: Configuration
    // ========================================================================

    let config: DevlabConfig = match load_config(None, None) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("⚠️  {}", e);
            eprintln!("Falling back to built-in defaults (debug mode)");
            let mut config = DevlabConfig::default();
            config.system.debug = true;
            config
        }
    };
    validate_config(&config)?;

    // ========================================================================
    // STEP 2: Logging
    // ========================================================================

    let debug_flags = parse_debug_flags();
    let log_dir = config
        .logging
        .file_logging
        .then(|| config.logging.log_dir.clone());
    let logging_guard = init_logging(
        &debug_flags,
        log_dir,
        Some(config.logging.retention_days),
        Some(config.logging.retention_runs),
    )?;
    if let Some(dir) = logging_guard.log_dir() {
        tracing::info!(target: "devlab", "File logging active: {}", dir.display());
    }

    // ========================================================================
    // STEP 3: Storage and Service Layer
    // ========================================================================

    let store = Arc::new(Store::open(&config.storage.db_path)?);

    let device_service =
        Arc::new(DeviceServiceImpl::new(store.clone())) as Arc<dyn DeviceService + Send + Sync>;
    let dataset_service =
        Arc::new(DatasetServiceImpl::new(store.clone())) as Arc<dyn DatasetService + Send + Sync>;
    let account_service =
        Arc::new(AccountServiceImpl::new(store.clone())) as Arc<dyn AccountService + Send + Sync>;
    let profile_service =
        Arc::new(ProfileServiceImpl::new(store.clone())) as Arc<dyn ProfileService + Send + Sync>;
    let system_service =
        Arc::new(SystemServiceImpl::new(store)) as Arc<dyn SystemService + Send + Sync>;

    tracing::info!(target: "devlab", "Service layer created");

    // ========================================================================
    // STEP 4: API State and HTTP Server
    // ========================================================================

    let token_signer = Arc::new(TokenSigner::new(
        &config.auth.jwt_secret,
        config.auth.access_token_minutes,
        config.auth.refresh_token_minutes,
    ));

    let api_state = ApiState {
        device_service,
        dataset_service,
        account_service,
        profile_service,
        system_service,
        token_signer,
        llm_defaults: config.llm.clone(),
    };

    let bind_address = format!("{}:{}", config.api.host, config.api.port);
    let app = create_http_server(api_state);

    println!("🚀 DEVLAB API server ready");
    println!("   HTTP API:      http://{}/v1/", bind_address);
    println!("   OpenAPI spec:  http://{}/api-docs/openapi.json", bind_address);
    println!("   Database:      {}", config.storage.db_path.display());

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!(target: "devlab", "Listening on {}", bind_address);
    axum::serve(listener, app).await?;

    Ok(())
}
