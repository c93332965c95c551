//! The CRUD router factory. Given a resource definition and a store handle it
//! produces the four standard routes; the assembly mounts one instance per
//! resource.

use crate::handlers::resource::{create, delete as delete_handler, list, update};
use crate::resource::Resource;
use crate::state::ResourceContext;
use crate::store::DocumentStore;
use axum::{routing::get, routing::put, Router};
use std::sync::Arc;

pub fn resource_routes(resource: Resource, store: Arc<dyn DocumentStore>) -> Router {
    let ctx = ResourceContext::new(resource, store);
    Router::new()
        .route("/", get(list).post(create))
        .route("/:id", put(update).delete(delete_handler))
        .with_state(ctx)
}
