//! Document storage behind an injected handle.
//!
//! Routers are constructed only after a store exists, so no request can race
//! a half-initialized connection. The trait is object-safe and held as
//! `Arc<dyn DocumentStore>` in [`crate::state::AppState`].

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::{ensure_database_exists, PgStore};

use crate::error::AppError;
use async_trait::async_trait;
use serde_json::{Map, Value};
use uuid::Uuid;

/// Schema-less document storage keyed by store-assigned UUIDs, one named
/// collection per resource.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Cheap liveness probe for readiness checks.
    async fn ping(&self) -> Result<(), AppError>;

    /// All documents in a collection, insertion order, with the assigned id
    /// merged into each object under `"id"`.
    async fn list(&self, collection: &str) -> Result<Vec<Value>, AppError>;

    /// Insert a new document; the store assigns and returns the id.
    async fn insert(&self, collection: &str, doc: Map<String, Value>) -> Result<Uuid, AppError>;

    /// Merge `patch` into the matching document, preserving unspecified
    /// fields. `None` when no document matched.
    async fn update(
        &self,
        collection: &str,
        id: Uuid,
        patch: Map<String, Value>,
    ) -> Result<Option<u64>, AppError>;

    /// Remove the matching document. Returns the removed count (0 or 1).
    async fn delete(&self, collection: &str, id: Uuid) -> Result<u64, AppError>;
}
