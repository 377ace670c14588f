use axum::http::{header, HeaderValue, Method};
use dotenvy::dotenv;
use once_cell::sync::Lazy;
use tokio::{net::TcpListener, signal};
use tower_http::cors::CorsLayer;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

mod config;
mod controllers;
mod db;
mod models;
mod routes;
mod services;
mod state;
mod utils;
mod views;

use config::Config;
use controllers::health::START_TIME;

#[tokio::main]
async fn main() {
    dotenv().ok();

    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    Lazy::force(&START_TIME);

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let store = match db::init_store(&config).await {
        Ok(store) => store,
        Err(e) => {
            error!("Failed to initialize poll store: {}", e);
            std::process::exit(1);
        }
    };

    if let Some(path) = &config.seed_file {
        let seeded = match db::seed::load_seed_file(path) {
            Ok(seeds) => db::seed::apply_seed(store.as_ref(), &seeds).await,
            Err(e) => Err(e),
        };
        if let Err(e) = seeded {
            error!("Failed to seed polls from {}: {}", path.display(), e);
            std::process::exit(1);
        }
    }

    let app_state = state::AppState::new(store, config.refresh_interval_secs);
    let mut app = routes::app(app_state);

    match config.cors_origin.as_deref().map(str::parse::<HeaderValue>) {
        Some(Ok(origin)) => {
            info!("CORS origin: {:?}", origin);
            app = app.layer(
                CorsLayer::new()
                    .allow_origin(origin)
                    .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                    .allow_headers([header::CONTENT_TYPE, header::ACCEPT]),
            );
        }
        Some(Err(_)) => {
            error!("Failed to parse CORS_ORIGIN: {:?}", config.cors_origin);
            std::process::exit(1);
        }
        None => info!("CORS_ORIGIN not set, CORS layer disabled"),
    }

    let listener = match TcpListener::bind(config.server_addr).await {
        Ok(l) => l,
        Err(e) => {
            error!("Failed to bind to address {}: {}", config.server_addr, e);
            std::process::exit(1);
        }
    };

    info!("Server running at http://{}", config.server_addr);

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("Server error: {}", e);
        std::process::exit(1);
    }

    info!("Server shut down");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
