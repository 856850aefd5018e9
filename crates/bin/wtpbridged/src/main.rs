//! # wtpbridged — WTP bridge daemon
//!
//! Composition root that wires all adapters together and starts the bridge.
//!
//! ## Responsibilities
//! - Load configuration (config file, env vars)
//! - Initialize structured logging
//! - Construct the WTP API client and the in-process accessory host
//! - Construct the platform and run the launch reconciliation
//! - Build the axum router and serve it until SIGINT/SIGTERM
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;
use wtpbridge_adapter_http_axum::router;
use wtpbridge_adapter_http_axum::state::AppState;
use wtpbridge_adapter_wtp_reqwest::WtpClient;
use wtpbridge_app::host_registry::InMemoryAccessoryHost;
use wtpbridge_app::platform::WtpPlatform;

use crate::config::Config;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.logging.filter)?)
        .init();

    // Remote API + host
    let client = WtpClient::new(&config.api_config())?;
    let host = Arc::new(InMemoryAccessoryHost::new());

    // Platform
    let platform = Arc::new(WtpPlatform::with_policy(
        client,
        host,
        config.reconcile.policy,
    ));
    let report = platform.did_finish_launching().await;
    tracing::info!(
        removed = report.removed,
        discovered = report.discovered,
        registered = report.registered,
        preserved = report.preserved,
        "platform launched"
    );

    // HTTP
    let app = router::build(AppState::from_arc(platform));
    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("wtpbridged listening on http://{bind_addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("wtpbridged stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    tracing::info!("shutdown requested");
}
