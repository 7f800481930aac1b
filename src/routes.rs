use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use mongodb::bson::{self, Document};
use serde::Serialize;
use serde_json::json;
use tracing::{info, warn};

use crate::{
    error::AppError,
    schema::{MenuItem, Reservation, fallback_menu},
    state::AppState,
};

const MENU_LIMIT: i64 = 100;
const HEALTH_COLLECTIONS_LIMIT: usize = 10;

pub async fn root_handler() -> impl IntoResponse {
    Json(json!({ "message": "Cafe API is running" }))
}

pub async fn hello_handler() -> impl IntoResponse {
    Json(json!({ "message": "Welcome to our cafe!" }))
}

/// Lists the menu. An unavailable store reads as an empty one here; either
/// way the caller gets the curated fallback instead of a bare storefront.
pub async fn menu_handler(State(state): State<Arc<AppState>>) -> Json<Vec<MenuItem>> {
    let docs = match state.store.fetch(MenuItem::COLLECTION, None, MENU_LIMIT).await {
        Ok(docs) => docs,
        Err(e) => {
            warn!("Menu fetch failed, serving fallback: {e}");
            Vec::new()
        }
    };

    let items: Vec<MenuItem> = docs.into_iter().filter_map(coerce_menu_item).collect();

    if items.is_empty() {
        return Json(fallback_menu());
    }

    Json(items)
}

// The store is schema-less, so a stray document must not blank the menu.
fn coerce_menu_item(mut doc: Document) -> Option<MenuItem> {
    doc.remove("_id");
    match bson::from_document(doc) {
        Ok(item) => Some(item),
        Err(e) => {
            warn!("Skipping menu document that does not fit the schema: {e}");
            None
        }
    }
}

/// Accepts a reservation. Persistence failures surface loudly: a 2xx from
/// this handler means the document was written.
///
/// The body lands as an untyped value first so that the schema layer can
/// name every missing or invalid field in one response.
pub async fn create_reservation_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(value) = payload.map_err(|e| AppError::MalformedPayload(e.body_text()))?;
    let reservation = Reservation::from_payload(&value)?;

    let document = bson::to_document(&reservation)?;
    let id = state.store.insert(Reservation::COLLECTION, document).await?;

    info!("Stored reservation {id} for {} guest(s)", reservation.guests);

    Ok((StatusCode::CREATED, Json(json!({ "status": "ok", "id": id }))))
}

#[derive(Serialize)]
pub struct Health {
    pub backend: &'static str,
    pub database_configured: bool,
    pub database_connected: bool,
    pub database_url_set: bool,
    pub database_name_set: bool,
    pub collections: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Connectivity diagnostics. Reports flags and collection names only; the
/// connection string never appears in the response.
pub async fn health_handler(State(state): State<Arc<AppState>>) -> Json<Health> {
    let mut health = Health {
        backend: "running",
        database_configured: state.store.is_configured(),
        database_connected: false,
        database_url_set: state.config.database_url.is_some(),
        database_name_set: state.config.database_name.is_some(),
        collections: Vec::new(),
        error: None,
    };

    if health.database_configured {
        health.database_connected = state.store.ping().await;

        match state.store.collection_names(HEALTH_COLLECTIONS_LIMIT).await {
            Ok(names) => health.collections = names,
            Err(e) => health.error = Some(truncate(&e.to_string(), 50)),
        }
    }

    Json(health)
}

fn truncate(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}
