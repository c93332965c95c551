//! Shared application state. The store handle is injected at construction,
//! so routers only exist once a connection does.

use crate::resource::Resource;
use crate::store::DocumentStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }
}

/// Per-router state: the resource definition bound to its collection handle.
/// Each CRUD router gets its own instance.
#[derive(Clone)]
pub struct ResourceContext {
    pub resource: Arc<Resource>,
    pub store: Arc<dyn DocumentStore>,
}

impl ResourceContext {
    pub fn new(resource: Resource, store: Arc<dyn DocumentStore>) -> Self {
        Self {
            resource: Arc::new(resource),
            store,
        }
    }

    pub fn label(&self) -> &str {
        &self.resource.label
    }

    pub fn collection(&self) -> &str {
        &self.resource.collection
    }
}
