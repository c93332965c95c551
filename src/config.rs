//! Environment configuration. The reference deployment hard-coded the port,
//! database name and resource pairs; here they are env-driven with the same
//! values as defaults.

use crate::error::AppError;
use crate::resource::{parse_resources, validate_collection_name, Resource};

pub const DEFAULT_RESOURCES: &str = "Categoria:categorias,Producto:productos";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub database_url: String,
    /// PostgreSQL schema holding the collection tables.
    pub schema: String,
    pub max_connections: u32,
    pub resources: Vec<Resource>,
}

impl AppConfig {
    /// Read configuration from the environment. `dotenvy` is loaded by the
    /// binary before this runs.
    pub fn from_env() -> Result<Self, AppError> {
        let port = std::env::var("TIENDA_PORT")
            .unwrap_or_else(|_| "3001".to_string())
            .parse()
            .map_err(|e| AppError::Config(format!("invalid TIENDA_PORT: {}", e)))?;
        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "postgres://localhost/tienda".to_string());
        let schema = std::env::var("TIENDA_SCHEMA").unwrap_or_else(|_| "tienda".to_string());
        validate_collection_name(&schema)
            .map_err(|_| AppError::Config(format!("invalid TIENDA_SCHEMA '{}'", schema)))?;
        let max_connections = std::env::var("TIENDA_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "5".to_string())
            .parse()
            .map_err(|e| AppError::Config(format!("invalid TIENDA_MAX_CONNECTIONS: {}", e)))?;
        let raw_resources =
            std::env::var("TIENDA_RESOURCES").unwrap_or_else(|_| DEFAULT_RESOURCES.to_string());
        let resources = parse_resources(&raw_resources)?;
        Ok(Self {
            port,
            database_url,
            schema,
            max_connections,
            resources,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_resources_parse() {
        let resources = parse_resources(DEFAULT_RESOURCES).unwrap();
        assert_eq!(resources.len(), 2);
        assert_eq!(resources[0].collection, "categorias");
        assert_eq!(resources[1].collection, "productos");
    }
}
