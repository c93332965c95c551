//! Application assembly: one CRUD router per resource plus the common routes.

use crate::resource::Resource;
use crate::routes::{common_routes, resource_routes};
use crate::state::AppState;
use axum::Router;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};

/// Request bodies are arbitrary JSON documents; cap them at 1 MiB.
const BODY_LIMIT_BYTES: usize = 1024 * 1024;

/// Build the full router. The body limit is outermost and runs before any
/// JSON parsing; `TraceLayer` logs each request/response pair.
pub fn build_app(state: AppState, resources: &[Resource]) -> Router {
    let mut app = Router::new().merge(common_routes(state.clone()));
    for resource in resources {
        app = app.nest(
            &format!("/{}", resource.collection),
            resource_routes(resource.clone(), state.store.clone()),
        );
    }
    app.layer(TraceLayer::new_for_http())
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES))
}
