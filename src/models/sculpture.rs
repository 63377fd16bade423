//! Represents an AR-displayable sculpture and its model asset metadata.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, types::Json};
use uuid::Uuid;

/// A sculpture metadata record.
///
/// The record describes one AR-displayable model: its display metadata and a
/// reference to the model blob held by the object store.
#[derive(Serialize, Deserialize, Clone, FromRow, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Sculpture {
    /// Stable identifier, assigned on creation.
    pub id: Uuid,

    /// Display name. Non-empty, at most 100 characters.
    pub name: String,

    /// Optional description, at most 500 characters.
    pub description: Option<String>,

    /// Object key of the uploaded model blob.
    ///
    /// Despite the name this is a key, not a resolvable URL; a signed URL is
    /// issued from it at read time.
    pub model_url: String,

    /// Ordered animation clip names, persisted as a JSON array.
    pub animations: Json<Vec<String>>,

    /// Timestamp when the record was created.
    pub created_at: DateTime<Utc>,

    /// Set at creation; no mutation path exists.
    pub updated_at: DateTime<Utc>,
}

/// Read-side view of a sculpture, returned by `GET /sculptures/{id}`.
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SculptureView {
    pub id: Uuid,
    pub name: String,
    pub ar_content: ArContent,
}

/// The block the AR front-end consumes to place and animate the model.
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ArContent {
    /// Freshly signed, time-limited URL for the model blob.
    pub model_url: String,

    /// Animation clip names in display order.
    pub animations: Vec<String>,
}

/// Receipt returned by `POST /files/upload`.
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct FileInfo {
    /// Fully-qualified object key the blob was stored under.
    pub file_name: String,

    /// Signed URL for immediate retrieval.
    pub url: String,

    /// Size of the uploaded payload in bytes.
    pub size: i64,

    /// MIME type as supplied by the client, if any.
    pub content_type: Option<String>,
}
