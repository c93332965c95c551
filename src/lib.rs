//! tienda-api: configuration-driven CRUD REST service over a PostgreSQL
//! document store.

pub mod app;
pub mod config;
pub mod error;
pub mod handlers;
pub mod resource;
pub mod response;
pub mod routes;
pub mod state;
pub mod store;

pub use app::build_app;
pub use config::AppConfig;
pub use error::AppError;
pub use resource::Resource;
pub use state::AppState;
pub use store::{ensure_database_exists, DocumentStore, MemoryStore, PgStore};
