//! PostgreSQL document store: one JSONB table per collection, all tables in a
//! schema named from config (default `tienda`).

use crate::error::AppError;
use crate::resource::{validate_collection_name, Resource};
use crate::store::DocumentStore;
use async_trait::async_trait;
use serde_json::{Map, Value};
use sqlx::{ConnectOptions, PgPool, Row};
use std::str::FromStr;
use uuid::Uuid;

pub struct PgStore {
    pool: PgPool,
    schema: String,
}

impl PgStore {
    pub fn new(pool: PgPool, schema: impl Into<String>) -> Self {
        Self {
            pool,
            schema: schema.into(),
        }
    }

    /// Create the schema and one document table per resource. Idempotent;
    /// runs at startup before the server binds.
    pub async fn ensure_collections(&self, resources: &[Resource]) -> Result<(), AppError> {
        sqlx::query(&format!("CREATE SCHEMA IF NOT EXISTS {}", self.schema))
            .execute(&self.pool)
            .await?;
        for resource in resources {
            let ddl = format!(
                r#"
                CREATE TABLE IF NOT EXISTS {} (
                    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                    doc JSONB NOT NULL,
                    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
                )
                "#,
                self.qualified_table(&resource.collection)?
            );
            sqlx::query(&ddl).execute(&self.pool).await?;
        }
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Schema-qualified table name. Collection names are validated again at
    /// the point they enter query text.
    fn qualified_table(&self, collection: &str) -> Result<String, AppError> {
        validate_collection_name(collection)?;
        Ok(format!("{}.{}", self.schema, collection))
    }

    /// A closed pool must fail deterministically instead of hanging on
    /// acquire.
    fn guard(&self) -> Result<(), AppError> {
        if self.pool.is_closed() {
            return Err(AppError::Unavailable("connection pool is closed".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for PgStore {
    async fn ping(&self) -> Result<(), AppError> {
        self.guard()?;
        sqlx::query("SELECT 1").fetch_one(&self.pool).await?;
        Ok(())
    }

    async fn list(&self, collection: &str) -> Result<Vec<Value>, AppError> {
        self.guard()?;
        let sql = format!(
            "SELECT id, doc FROM {} ORDER BY created_at, id",
            self.qualified_table(collection)?
        );
        tracing::debug!(sql = %sql, "query");
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            let id: Uuid = row.try_get("id")?;
            let mut doc: Value = row.try_get("doc")?;
            if let Value::Object(ref mut map) = doc {
                map.insert("id".into(), Value::String(id.to_string()));
            }
            out.push(doc);
        }
        Ok(out)
    }

    async fn insert(&self, collection: &str, doc: Map<String, Value>) -> Result<Uuid, AppError> {
        self.guard()?;
        let sql = format!(
            "INSERT INTO {} (doc) VALUES ($1) RETURNING id",
            self.qualified_table(collection)?
        );
        tracing::debug!(sql = %sql, "query");
        let row = sqlx::query(&sql)
            .bind(Value::Object(doc))
            .fetch_one(&self.pool)
            .await?;
        Ok(row.try_get("id")?)
    }

    async fn update(
        &self,
        collection: &str,
        id: Uuid,
        patch: Map<String, Value>,
    ) -> Result<Option<u64>, AppError> {
        self.guard()?;
        // `doc || $2` merges top-level fields, leaving the rest of the
        // document untouched.
        let sql = format!(
            "UPDATE {} SET doc = doc || $2, updated_at = NOW() WHERE id = $1",
            self.qualified_table(collection)?
        );
        tracing::debug!(sql = %sql, id = %id, "query");
        let result = sqlx::query(&sql)
            .bind(id)
            .bind(Value::Object(patch))
            .execute(&self.pool)
            .await?;
        match result.rows_affected() {
            0 => Ok(None),
            n => Ok(Some(n)),
        }
    }

    async fn delete(&self, collection: &str, id: Uuid) -> Result<u64, AppError> {
        self.guard()?;
        let sql = format!(
            "DELETE FROM {} WHERE id = $1",
            self.qualified_table(collection)?
        );
        tracing::debug!(sql = %sql, id = %id, "query");
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected())
    }
}

/// Ensure the database in `database_url` exists; create it if not. Connects
/// to the default `postgres` database to run CREATE DATABASE. Call before
/// creating the main pool.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url)
        .map_err(|e| AppError::Config(format!("invalid DATABASE_URL: {}", e)))?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
    let exists: (bool,) =
        sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
            .bind(&db_name)
            .fetch_one(&mut conn)
            .await?;
    if !exists.0 {
        let quoted = quote_ident(&db_name);
        sqlx::query(&format!("CREATE DATABASE {}", quoted))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

fn parse_db_name_from_url(url: &str) -> Result<(String, String), AppError> {
    let path_start = url
        .rfind('/')
        .ok_or_else(|| AppError::Config("DATABASE_URL: no path".into()))?
        + 1;
    let path_and_query = url.get(path_start..).unwrap_or("");
    let db_name = path_and_query.split('?').next().unwrap_or("").trim();
    let base = url.get(..path_start).unwrap_or(url);
    let admin_url = format!("{}postgres", base);
    Ok((admin_url, db_name.to_string()))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('\\', "\\\\").replace('"', "\\\""))
}
