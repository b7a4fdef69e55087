//! # Hook-Relay Gateway
//!
//! Binary entry point for the hook-relay HTTP gateway.
//!
//! This executable:
//! - Loads configuration from files and environment
//! - Initializes logging
//! - Loads secrets and builds the hook registry
//! - Starts the HTTP server from the library crate

use hook_relay_gateway::{
    config::GatewayConfig,
    notifier::HttpNotifier,
    start_server, AppState,
};
use hook_relay_core::{DirectorySecretStore, Endpoint, HookRegistry};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hook_relay_gateway=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting hook-relay gateway");

    // -------------------------------------------------------------------------
    // Load configuration
    //
    // Sources (applied in order; later sources override earlier ones):
    //  1. /etc/hook-relay/gateway.yaml        : system-wide defaults
    //  2. ./config/gateway.yaml               : deployment-local override
    //  3. Path given by HOOK_RELAY_CONFIG_FILE: operator-specified file
    //  4. Environment variables prefixed HOOK_RELAY__ (double-underscore
    //     separator), e.g. HOOK_RELAY__SERVER__PORT=9090
    //
    // Absent files fall back to serde defaults; a malformed file or an
    // environment variable that cannot be coerced is a hard error because it
    // indicates deliberate-but-broken operator configuration.
    // -------------------------------------------------------------------------
    let mut config_builder = config::Config::builder()
        .add_source(
            config::File::with_name("/etc/hook-relay/gateway")
                .required(false)
                .format(config::FileFormat::Yaml),
        )
        .add_source(
            config::File::with_name("config/gateway")
                .required(false)
                .format(config::FileFormat::Yaml),
        );

    if let Ok(explicit_path) = std::env::var("HOOK_RELAY_CONFIG_FILE") {
        if !explicit_path.is_empty() {
            config_builder = config_builder.add_source(
                config::File::with_name(&explicit_path)
                    .required(true)
                    .format(config::FileFormat::Yaml),
            );
            info!(path = %explicit_path, "Loading configuration from explicit path");
        }
    }

    let config = match config_builder
        .add_source(config::Environment::with_prefix("HOOK_RELAY").separator("__"))
        .build()
    {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(error = %e, "Failed to build configuration; aborting");
            std::process::exit(3);
        }
    };

    let gateway_config: GatewayConfig = match config.try_deserialize() {
        Ok(gc) => gc,
        Err(e) => {
            error!(
                error = %e,
                "Could not deserialize gateway configuration; aborting. \
                 Fix the configuration and restart."
            );
            std::process::exit(3);
        }
    };

    if let Err(e) = gateway_config.validate() {
        error!(error = %e, "Gateway configuration is invalid; aborting");
        std::process::exit(3);
    }

    // -------------------------------------------------------------------------
    // Build the hook registry
    //
    // Every configured endpoint must resolve its secret here. A hook the
    // gateway cannot authenticate must not be served, so any load failure
    // aborts startup instead of continuing with a partial registry.
    // -------------------------------------------------------------------------
    let store = DirectorySecretStore::new(&gateway_config.secrets.dir);
    let mut registry = HookRegistry::new();

    for endpoint_config in &gateway_config.endpoints {
        let endpoint = Endpoint::new(endpoint_config.source, endpoint_config.key.clone());
        if let Err(e) = registry.register(endpoint, &store) {
            error!(
                source = endpoint_config.source.as_str(),
                key_id = %endpoint_config.key,
                error = %e,
                "Failed to load secret for configured endpoint; aborting"
            );
            std::process::exit(1);
        }
    }

    if registry.is_empty() {
        error!("No endpoints configured; nothing to serve. Aborting.");
        std::process::exit(3);
    }

    info!(hooks = registry.len(), "Hook registry built");

    let notifier = match HttpNotifier::new(
        &gateway_config.downstream.base_url,
        Duration::from_secs(gateway_config.downstream.timeout_seconds),
    ) {
        Ok(n) => n,
        Err(e) => {
            error!(error = %e, "Failed to construct downstream notifier; aborting");
            std::process::exit(3);
        }
    };

    let state = AppState::new(Arc::new(registry), Arc::new(notifier));

    if let Err(e) = start_server(&gateway_config.server, state).await {
        error!("Failed to start server: {}", e);
        std::process::exit(2);
    }

    Ok(())
}
