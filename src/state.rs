//! Shared application state handed to the router.
//!
//! All handles are explicitly constructed at startup and dependency-injected;
//! nothing is ambient or static.

use sqlx::SqlitePool;
use std::sync::Arc;

use crate::services::{
    asset_gateway::AssetGateway, object_store::ObjectStore, sculpture_service::SculptureService,
};

#[derive(Clone)]
pub struct AppState {
    /// Metadata store pool, shared with the sculpture service.
    pub db: Arc<SqlitePool>,

    /// Raw store handle, used by readiness probing.
    pub store: Arc<dyn ObjectStore>,

    /// File upload/download/delete/URL-resolution contract.
    pub assets: AssetGateway,

    /// Sculpture record lifecycle.
    pub sculptures: SculptureService,

    /// Bucket assets land in when callers do not name one.
    pub default_bucket: String,
}

impl AppState {
    pub fn new(db: Arc<SqlitePool>, store: Arc<dyn ObjectStore>, default_bucket: String) -> Self {
        let assets = AssetGateway::new(store.clone(), default_bucket.clone());
        let sculptures = SculptureService::new(db.clone(), assets.clone());
        Self {
            db,
            store,
            assets,
            sculptures,
            default_bucket,
        }
    }
}
