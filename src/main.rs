use anyhow::{Context, Result};
use clap::Parser;
use rosterd::{api, config, logging, roster::StudentStore};
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use tokio::net::TcpListener;

#[derive(Parser)]
#[command(name = "rosterd", about = "In-memory student roster HTTP server")]
struct Cli {
    /// Address to bind (overrides `SERVER_HOST`).
    #[arg(long)]
    host: Option<IpAddr>,
    /// Port to bind (overrides `SERVER_PORT`).
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut settings = config::load_config().context("failed to load configuration")?;
    if let Some(host) = cli.host {
        settings.server_host = host;
    }
    if let Some(port) = cli.port {
        settings.server_port = port;
    }
    logging::init_tracing(settings.log_file.as_deref());
    tracing::debug!(
        host = %settings.server_host,
        port = settings.server_port,
        log_file = ?settings.log_file,
        "Loaded configuration"
    );

    let app = api::create_router(Arc::new(StudentStore::new()));

    let addr = SocketAddr::new(settings.server_host, settings.server_port);
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server terminated unexpectedly")?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Resolve once SIGINT or (on Unix) SIGTERM is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %err, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                tracing::warn!(error = %err, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received SIGINT, shutting down gracefully"),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down gracefully"),
    }
}
