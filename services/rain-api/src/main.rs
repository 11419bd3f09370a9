//! Raincell Map API Server
//!
//! Serves a Leaflet map of rainfall observations read from NetCDF files.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use clap::Parser;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use rain_api::handlers;
use rain_api::state::AppState;

/// Raincell Map API Server
#[derive(Parser, Debug)]
#[command(name = "rain-api")]
#[command(about = "Web backend serving rainfall observations on a map")]
struct Args {
    /// Listen address
    #[arg(short, long, default_value = "0.0.0.0:8080", env = "RAIN_LISTEN_ADDR")]
    listen: String,

    /// Directory holding the NetCDF datasets
    #[arg(short, long, default_value = "data", env = "RAIN_DATA_DIR")]
    data_dir: String,

    /// Maximum number of points returned per request
    #[arg(long, default_value_t = 200, env = "RAIN_MAX_POINTS")]
    max_points: usize,

    /// Log level
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// Number of worker threads
    #[arg(long, env = "RAIN_WORKER_THREADS")]
    worker_threads: Option<usize>,
}

fn main() {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Build runtime with configured threads
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();

    if let Some(threads) = args.worker_threads {
        runtime_builder.worker_threads(threads);
    }

    let runtime = runtime_builder
        .build()
        .expect("Failed to create Tokio runtime");

    runtime.block_on(async move {
        run_server(args).await;
    });
}

async fn run_server(args: Args) {
    // Initialize tracing
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .json()
        .init();

    info!("Starting raincell map API server");

    // Initialize application state; the data directory must exist and hold
    // at least one dataset, otherwise refuse to start.
    let state = match AppState::new(&args.data_dir, args.max_points) {
        Ok(state) => Arc::new(state),
        Err(e) => {
            tracing::error!("Failed to initialize application state: {}", e);
            std::process::exit(1);
        }
    };

    info!(
        files = state.files.len(),
        "Serving datasets from {}",
        state.data_dir.display()
    );

    // Build router
    let app = Router::new()
        .route("/", get(handlers::pages::home_handler))
        .route("/map", get(handlers::pages::map_handler))
        .route("/raincells", get(handlers::raincells::raincells_handler))
        .route("/health", get(handlers::health::health_handler))
        // Middleware
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive());

    // Parse listen address
    let addr: SocketAddr = args.listen.parse().expect("Invalid listen address");

    info!("Raincell map API listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind");
    axum::serve(listener, app).await.expect("Server failed");
}
