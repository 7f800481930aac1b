//! # Cafe API
//!
//! Backend for the café's public website.
//!
//! Serves the menu listing, accepts table reservations, and persists both to
//! MongoDB. Each request is a single pass: parse and validate the payload,
//! read or write a document collection, shape the JSON response. There is no
//! background work and no cross-request state beyond the shared database
//! handle held in [`state::AppState`].
//!
//! # Endpoints
//! - `GET /` and `GET /hello`: static greetings
//! - `GET /menu`: menu listing, with a fixed fallback when the store is empty
//! - `POST /reservations`: validated reservation intake
//! - `GET /health`: connectivity diagnostics, no credentials disclosed

pub mod config;
pub mod database;
pub mod error;
pub mod routes;
pub mod schema;
pub mod state;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tokio::{net::TcpListener, signal::ctrl_c};
use tower_http::cors::CorsLayer;
use tracing::info;

#[cfg(unix)]
use tokio::signal::unix::{SignalKind, signal};

use crate::state::AppState;

pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(routes::root_handler))
        .route("/hello", get(routes::hello_handler))
        .route("/menu", get(routes::menu_handler))
        .route("/reservations", post(routes::create_reservation_handler))
        .route("/health", get(routes::health_handler))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn start_server() {
    let state = AppState::new().await;
    let port = state.config.port;
    let router = app(state);

    let listener = TcpListener::bind(("0.0.0.0", port))
        .await
        .expect("Failed to bind port");

    info!("Listening on port {port}");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server crashed");

    info!("Server shutting down");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        ctrl_c().await.expect("Failed to install Ctrl+C handler");

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal(SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;

        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
