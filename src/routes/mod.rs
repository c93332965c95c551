//! Routers: the per-resource CRUD factory and the common service routes.

mod common;
mod resource;

pub use common::common_routes;
pub use resource::resource_routes;
