//! Success envelope types. Field names match the reference wire format.

use axum::{http::StatusCode, Json};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

#[derive(Serialize)]
pub struct ListBody {
    pub success: bool,
    pub recurso: String,
    pub total: usize,
    pub data: Vec<Value>,
}

#[derive(Serialize)]
pub struct CreatedBody {
    pub success: bool,
    pub message: String,
    #[serde(rename = "insertedId")]
    pub inserted_id: Uuid,
}

#[derive(Serialize)]
pub struct UpdatedBody {
    pub success: bool,
    pub message: String,
    #[serde(rename = "modifiedCount")]
    pub modified_count: u64,
}

#[derive(Serialize)]
pub struct DeletedBody {
    pub success: bool,
    pub message: String,
    #[serde(rename = "deletedCount")]
    pub deleted_count: u64,
}

pub fn listed(label: &str, data: Vec<Value>) -> (StatusCode, Json<ListBody>) {
    let total = data.len();
    (
        StatusCode::OK,
        Json(ListBody {
            success: true,
            recurso: label.to_string(),
            total,
            data,
        }),
    )
}

pub fn created(label: &str, inserted_id: Uuid) -> (StatusCode, Json<CreatedBody>) {
    (
        StatusCode::CREATED,
        Json(CreatedBody {
            success: true,
            message: format!("{} creado", label),
            inserted_id,
        }),
    )
}

pub fn updated(label: &str, modified_count: u64) -> (StatusCode, Json<UpdatedBody>) {
    (
        StatusCode::OK,
        Json(UpdatedBody {
            success: true,
            message: format!("{} actualizado", label),
            modified_count,
        }),
    )
}

pub fn deleted(label: &str, deleted_count: u64) -> (StatusCode, Json<DeletedBody>) {
    (
        StatusCode::OK,
        Json(DeletedBody {
            success: true,
            message: format!("{} eliminado", label),
            deleted_count,
        }),
    )
}
