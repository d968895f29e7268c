//! Herald - console line relay
//!
//! Reads console lines from stdin, classifies them against the configured
//! pattern rules, and writes one JSON outcome per line to stdout. Logs go
//! to stderr.

use std::sync::Arc;

use anyhow::Result;
use tokio::io::BufReader;
use tokio::signal;
use tracing::{error, info, warn};

use herald::bridge::{run_lines, Relay};
use herald::config::{env::get_config_path, load_and_validate};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("Herald v{} starting...", env!("CARGO_PKG_VERSION"));

    let config_path = get_config_path();
    info!("Loading configuration from {}...", config_path);

    let config = load_and_validate(&config_path).map_err(|e| {
        error!("Failed to load configuration: {}", e);
        error!("Please ensure {} exists and is properly formatted.", config_path);
        e
    })?;

    info!("Configuration loaded successfully");
    info!("  Default channel: {}", config.relay.default_channel);
    info!("  Patterns enabled: {}", config.patterns.enabled);
    info!("  Templates enabled: {}", config.templates.enabled);

    let relay = Arc::new(Relay::new(&config));

    let reload_task = tokio::spawn(reload_on_hangup(Arc::clone(&relay), config_path));

    let relay_task = {
        let relay = Arc::clone(&relay);
        tokio::spawn(async move {
            let stdin = BufReader::new(tokio::io::stdin());
            let mut stdout = tokio::io::stdout();
            run_lines(&relay, stdin, &mut stdout).await
        })
    };

    tokio::select! {
        biased;
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
        result = relay_task => match result {
            Ok(Ok(count)) => info!("Input closed, relayed {} line(s)", count),
            Ok(Err(e)) => error!("Relay stopped: {}", e),
            Err(e) => warn!("Relay task panicked: {}", e),
        },
    }

    reload_task.abort();
    info!("Exiting...");
    Ok(())
}

/// Reload configuration whenever the process receives SIGHUP.
///
/// A config that fails to load or validate leaves the running one in place.
#[cfg(unix)]
async fn reload_on_hangup(relay: Arc<Relay>, config_path: String) {
    let mut hangup = match signal::unix::signal(signal::unix::SignalKind::hangup()) {
        Ok(s) => s,
        Err(e) => {
            warn!("Failed to install SIGHUP handler, reload disabled: {}", e);
            return;
        }
    };

    while hangup.recv().await.is_some() {
        info!("Received SIGHUP, reloading {}", config_path);
        match load_and_validate(&config_path) {
            Ok(config) => {
                relay.reload(&config);
                info!("Configuration reloaded");
            }
            Err(e) => error!("Reload failed, keeping current configuration: {}", e),
        }
    }
}

#[cfg(not(unix))]
async fn reload_on_hangup(_relay: Arc<Relay>, _config_path: String) {}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C"),
        _ = terminate => info!("Received SIGTERM"),
    }
}
