// Development host for the dungeon gateway.
// Plays the part of the image-generation server: owns the router, lets the
// gateway register its routes on it, and serves it until Ctrl-C / SIGTERM.

use axum::Router;
use clap::Parser;
use dungeon_gateway::{Directories, web};
use std::path::PathBuf;
use tokio::signal;
use tower_http::trace::{DefaultMakeSpan, TraceLayer};
use tracing::Level;

/// Command line arguments for the gateway host
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct AppConfig {
    /// Hostname/IP to bind the server to.
    /// Without a value it becomes "*", meaning all interfaces.
    #[arg(long, env = "DUNGEON_GATEWAY_HOST", default_value = "localhost", num_args = 0..=1, default_missing_value = "*")]
    host: String,

    /// Port number to listen on.
    #[arg(short, long, env = "DUNGEON_GATEWAY_PORT", default_value_t = 8188)]
    port: u16,

    /// Install directory of the extension. The web root is `<base>/web`;
    /// the host input and output directories sit two levels above it.
    #[arg(long, env = "DUNGEON_GATEWAY_BASE_DIR", default_value = ".")]
    base_dir: PathBuf,

    /// Override for the web client directory.
    #[arg(long, env = "DUNGEON_GATEWAY_WEBROOT")]
    webroot: Option<PathBuf>,

    /// Override for the host input directory (upload target).
    #[arg(long, env = "DUNGEON_GATEWAY_INPUT_DIR")]
    input_dir: Option<PathBuf>,

    /// Override for the host output directory.
    #[arg(long, env = "DUNGEON_GATEWAY_OUTPUT_DIR")]
    output_dir: Option<PathBuf>,
}

impl AppConfig {
    fn directories(&self) -> Directories {
        let base = std::fs::canonicalize(&self.base_dir)
            .or_else(|_| std::path::absolute(&self.base_dir))
            .unwrap_or_else(|_| self.base_dir.clone());

        let mut dirs = Directories::from_base(base);
        if let Some(webroot) = &self.webroot {
            dirs.webroot = webroot.clone();
        }
        if let Some(input_dir) = &self.input_dir {
            dirs.input_dir = input_dir.clone();
        }
        if let Some(output_dir) = &self.output_dir {
            dirs.output_dir = output_dir.clone();
        }
        dirs
    }
}

#[tokio::main]
async fn main() {
    let config = AppConfig::parse();

    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    let directories = config.directories();
    tracing::info!("Web root: {}", directories.webroot.display());
    tracing::info!("Input directory: {}", directories.input_dir.display());
    tracing::info!("Output directory: {}", directories.output_dir.display());

    // The host's own routes would already be on this router.
    let host_router = Router::new();
    let app = web::register(host_router, directories).layer(
        TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::new().level(Level::INFO)),
    );

    let listener = match web::create_listener(&config.host, config.port).await {
        Ok((addr, listener)) => {
            tracing::info!("Listening on {}", addr);
            listener
        }
        Err(e) => {
            tracing::error!("FATAL: Failed to bind server: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!("Server run error: {}", e);
    }

    tracing::info!("dungeon-gateway has shut down.");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Ctrl-C handler unavailable: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("SIGTERM handler unavailable: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Ctrl-C received, shutting down"),
        _ = terminate => tracing::info!("SIGTERM received, shutting down"),
    }
}
