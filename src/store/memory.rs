//! In-memory document store with the same observable semantics as the
//! PostgreSQL backend. Used by the integration test suite; also works as a
//! throwaway backend for local experiments.

use crate::error::AppError;
use crate::store::DocumentStore;
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;
use uuid::Uuid;

#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Vec<(Uuid, Map<String, Value>)>>>,
    ops: AtomicU64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of storage operations issued so far. Lets tests assert that a
    /// rejected request never reached storage.
    pub fn op_count(&self) -> u64 {
        self.ops.load(Ordering::SeqCst)
    }

    fn lock(
        &self,
    ) -> Result<std::sync::RwLockWriteGuard<'_, HashMap<String, Vec<(Uuid, Map<String, Value>)>>>, AppError>
    {
        self.collections
            .write()
            .map_err(|_| AppError::Unavailable("store lock poisoned".into()))
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }

    async fn list(&self, collection: &str) -> Result<Vec<Value>, AppError> {
        self.ops.fetch_add(1, Ordering::SeqCst);
        let collections = self.lock()?;
        let docs = collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .map(|(id, doc)| {
                        let mut doc = doc.clone();
                        doc.insert("id".into(), Value::String(id.to_string()));
                        Value::Object(doc)
                    })
                    .collect()
            })
            .unwrap_or_default();
        Ok(docs)
    }

    async fn insert(&self, collection: &str, doc: Map<String, Value>) -> Result<Uuid, AppError> {
        self.ops.fetch_add(1, Ordering::SeqCst);
        let id = Uuid::new_v4();
        let mut collections = self.lock()?;
        collections
            .entry(collection.to_string())
            .or_default()
            .push((id, doc));
        Ok(id)
    }

    async fn update(
        &self,
        collection: &str,
        id: Uuid,
        patch: Map<String, Value>,
    ) -> Result<Option<u64>, AppError> {
        self.ops.fetch_add(1, Ordering::SeqCst);
        let mut collections = self.lock()?;
        let Some(docs) = collections.get_mut(collection) else {
            return Ok(None);
        };
        match docs.iter_mut().find(|(doc_id, _)| *doc_id == id) {
            Some((_, doc)) => {
                for (k, v) in patch {
                    doc.insert(k, v);
                }
                Ok(Some(1))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, collection: &str, id: Uuid) -> Result<u64, AppError> {
        self.ops.fetch_add(1, Ordering::SeqCst);
        let mut collections = self.lock()?;
        let Some(docs) = collections.get_mut(collection) else {
            return Ok(0);
        };
        let before = docs.len();
        docs.retain(|(doc_id, _)| *doc_id != id);
        Ok((before - docs.len()) as u64)
    }
}
