//! Generic CRUD handlers: list, create, update, delete. One storage call per
//! request; every failure propagates as [`AppError`] and is translated once.

use crate::error::AppError;
use crate::response;
use crate::state::ResourceContext;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Identifier validation. Runs before any storage call; a malformed id is a
/// client error, never a lookup miss.
fn parse_id(id_str: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(id_str).map_err(|_| AppError::InvalidId)
}

fn body_to_map(value: Value) -> Result<Map<String, Value>, AppError> {
    match value {
        Value::Object(m) => Ok(m),
        _ => Err(AppError::BadRequest("body must be a JSON object".into())),
    }
}

pub async fn list(
    State(ctx): State<ResourceContext>,
) -> Result<impl IntoResponse, AppError> {
    let docs = ctx.store.list(ctx.collection()).await?;
    Ok(response::listed(ctx.label(), docs))
}

pub async fn create(
    State(ctx): State<ResourceContext>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let doc = body_to_map(body)?;
    let inserted_id = ctx.store.insert(ctx.collection(), doc).await?;
    Ok(response::created(ctx.label(), inserted_id))
}

pub async fn update(
    State(ctx): State<ResourceContext>,
    Path(id_str): Path<String>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let patch = body_to_map(body)?;
    let modified = ctx
        .store
        .update(ctx.collection(), id, patch)
        .await?
        .ok_or_else(|| AppError::NotFound(ctx.label().to_string()))?;
    Ok(response::updated(ctx.label(), modified))
}

pub async fn delete(
    State(ctx): State<ResourceContext>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let deleted = ctx.store.delete(ctx.collection(), id).await?;
    if deleted == 0 {
        return Err(AppError::NotFound(ctx.label().to_string()));
    }
    Ok(response::deleted(ctx.label(), deleted))
}
