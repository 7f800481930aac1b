//! # MongoDB
//!
//! Document store behind the menu and reservation endpoints.
//!
//! ## Collections
//!
//! One flat collection per record type, named after the lowercased type
//! (`menuitem`, `reservation`). Documents are schema-less on the store side;
//! shape is enforced at the edges by [`crate::schema`].
//!
//! ## Handle
//!
//! The driver `Client` is the connection pool: created once at startup,
//! shared through [`crate::state::AppState`], connections checked out per
//! operation. When `DATABASE_URL`/`DATABASE_NAME` are unset the store runs
//! in a disabled mode where every write fails with
//! [`AppError::StoreUnavailable`] and reads report the same; only the
//! health endpoint distinguishes "not configured" from "not reachable".

use std::time::Duration;

use chrono::Utc;
use futures_util::TryStreamExt;
use mongodb::{
    Client, Database,
    bson::{Bson, Document, doc},
    options::ClientOptions,
};
use tracing::warn;

use crate::error::AppError;

/// Created timestamp stamped onto every inserted document. Not part of any
/// schema; readers ignore it.
pub const CREATED_AT: &str = "created_at";

pub struct Store {
    db: Option<Database>,
}

impl Store {
    /// Connects lazily: the driver does not reach out to the server here, so
    /// an unreachable database surfaces per-operation, never at startup.
    pub async fn connect(url: Option<&str>, name: Option<&str>) -> Self {
        let db = match (url, name) {
            (Some(url), Some(name)) => match client_options(url).await {
                Ok(options) => match Client::with_options(options) {
                    Ok(client) => Some(client.database(name)),
                    Err(e) => {
                        warn!("Failed to initialize database client: {e}");
                        None
                    }
                },
                Err(e) => {
                    warn!("Invalid DATABASE_URL: {e}");
                    None
                }
            },
            _ => {
                warn!("DATABASE_URL/DATABASE_NAME not set, store disabled");
                None
            }
        };

        Self { db }
    }

    pub fn is_configured(&self) -> bool {
        self.db.is_some()
    }

    fn db(&self) -> Result<&Database, AppError> {
        self.db.as_ref().ok_or(AppError::StoreUnavailable)
    }

    /// Inserts one document, stamping `created_at` (ISO-8601, UTC). Returns
    /// the storage-assigned identifier as a string.
    pub async fn insert(&self, collection: &str, mut document: Document) -> Result<String, AppError> {
        document.insert(CREATED_AT, Utc::now().to_rfc3339());

        let result = self
            .db()?
            .collection::<Document>(collection)
            .insert_one(document)
            .await?;

        Ok(match result.inserted_id {
            Bson::ObjectId(id) => id.to_hex(),
            other => other.to_string(),
        })
    }

    /// Fetches up to `limit` documents in natural storage order. An empty or
    /// missing collection yields an empty vec, not an error.
    pub async fn fetch(
        &self,
        collection: &str,
        filter: Option<Document>,
        limit: i64,
    ) -> Result<Vec<Document>, AppError> {
        let cursor = self
            .db()?
            .collection::<Document>(collection)
            .find(filter.unwrap_or_default())
            .limit(limit)
            .await?;

        Ok(cursor.try_collect().await?)
    }

    pub async fn ping(&self) -> bool {
        match self.db.as_ref() {
            Some(db) => db.run_command(doc! { "ping": 1 }).await.is_ok(),
            None => false,
        }
    }

    pub async fn collection_names(&self, limit: usize) -> Result<Vec<String>, AppError> {
        let mut names = self.db()?.list_collection_names().await?;
        names.truncate(limit);
        Ok(names)
    }
}

async fn client_options(url: &str) -> Result<ClientOptions, mongodb::error::Error> {
    let mut options = ClientOptions::parse(url).await?;
    // Keeps the health endpoint responsive when the server is down.
    options.server_selection_timeout = Some(Duration::from_secs(2));
    Ok(options)
}
