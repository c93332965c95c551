use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use tienda_api::config::DEFAULT_RESOURCES;
use tienda_api::resource::parse_resources;
use tienda_api::{build_app, AppState, MemoryStore};

/// Fresh in-memory store + app with the default resource pair mounted.
fn setup() -> (Arc<MemoryStore>, axum::Router) {
    let store = Arc::new(MemoryStore::new());
    let state = AppState::new(store.clone());
    let resources = parse_resources(DEFAULT_RESOURCES).expect("default resources");
    let app = build_app(state, &resources);
    (store, app)
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("build request")
}

fn bare_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("build request")
}

async fn json_body(response: axum::http::Response<Body>) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("read body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("parse JSON")
}

#[tokio::test]
async fn test_create_then_list_contains_document() {
    let (_, app) = setup();

    let response = app
        .clone()
        .oneshot(json_request("POST", "/categorias", json!({"nombre": "Ropa"})))
        .await
        .expect("request");
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = json_body(response).await;
    assert_eq!(created["success"], true);
    assert_eq!(created["message"], "Categoria creado");
    assert!(created["insertedId"].is_string());

    let response = app
        .oneshot(bare_request("GET", "/categorias"))
        .await
        .expect("request");
    assert_eq!(response.status(), StatusCode::OK);
    let listed = json_body(response).await;
    assert_eq!(listed["success"], true);
    assert_eq!(listed["recurso"], "Categoria");
    assert_eq!(listed["total"], 1);
    assert_eq!(listed["data"][0]["nombre"], "Ropa");
    assert_eq!(listed["data"][0]["id"], created["insertedId"]);
}

#[tokio::test]
async fn test_malformed_id_returns_400_without_storage_call() {
    let (store, app) = setup();
    let ops_before = store.op_count();

    for request in [
        json_request("PUT", "/productos/not-an-id", json!({"precio": 1})),
        bare_request("DELETE", "/productos/123"),
    ] {
        let response = app.clone().oneshot(request).await.expect("request");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "ID invalido");
    }

    assert_eq!(store.op_count(), ops_before);
}

#[tokio::test]
async fn test_unknown_id_returns_404() {
    let (_, app) = setup();
    let missing = Uuid::new_v4();

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/productos/{}", missing),
            json!({"precio": 1}),
        ))
        .await
        .expect("request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = json_body(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Producto no encontrado");

    let response = app
        .oneshot(bare_request("DELETE", &format!("/productos/{}", missing)))
        .await
        .expect("request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = json_body(response).await;
    assert_eq!(body["message"], "Producto no encontrado");
}

#[tokio::test]
async fn test_second_delete_returns_404() {
    let (_, app) = setup();

    let response = app
        .clone()
        .oneshot(json_request("POST", "/productos", json!({"nombre": "Gorra"})))
        .await
        .expect("request");
    let id = json_body(response).await["insertedId"]
        .as_str()
        .expect("insertedId")
        .to_string();

    let response = app
        .clone()
        .oneshot(bare_request("DELETE", &format!("/productos/{}", id)))
        .await
        .expect("request");
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["deletedCount"], 1);

    let response = app
        .oneshot(bare_request("DELETE", &format!("/productos/{}", id)))
        .await
        .expect("request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_partial_update_preserves_unspecified_fields() {
    let (_, app) = setup();

    let response = app
        .clone()
        .oneshot(json_request("POST", "/productos", json!({"a": 0, "b": 2})))
        .await
        .expect("request");
    let id = json_body(response).await["insertedId"]
        .as_str()
        .expect("insertedId")
        .to_string();

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/productos/{}", id),
            json!({"a": 1}),
        ))
        .await
        .expect("request");
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Producto actualizado");
    assert_eq!(body["modifiedCount"], 1);

    let response = app
        .oneshot(bare_request("GET", "/productos"))
        .await
        .expect("request");
    let listed = json_body(response).await;
    assert_eq!(listed["data"][0]["a"], 1);
    assert_eq!(listed["data"][0]["b"], 2);
}

#[tokio::test]
async fn test_full_product_lifecycle() {
    let (_, app) = setup();

    let response = app
        .clone()
        .oneshot(bare_request("GET", "/productos"))
        .await
        .expect("request");
    assert_eq!(json_body(response).await["total"], 0);

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/productos",
            json!({"nombre": "Camisa", "precio": 10}),
        ))
        .await
        .expect("request");
    assert_eq!(response.status(), StatusCode::CREATED);
    let id = json_body(response).await["insertedId"]
        .as_str()
        .expect("insertedId")
        .to_string();

    let response = app
        .clone()
        .oneshot(bare_request("GET", "/productos"))
        .await
        .expect("request");
    let listed = json_body(response).await;
    assert_eq!(listed["total"], 1);
    assert_eq!(listed["data"][0]["nombre"], "Camisa");

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/productos/{}", id),
            json!({"precio": 12}),
        ))
        .await
        .expect("request");
    assert_eq!(json_body(response).await["modifiedCount"], 1);

    let response = app
        .clone()
        .oneshot(bare_request("GET", "/productos"))
        .await
        .expect("request");
    assert_eq!(json_body(response).await["data"][0]["precio"], 12);

    let response = app
        .clone()
        .oneshot(bare_request("DELETE", &format!("/productos/{}", id)))
        .await
        .expect("request");
    assert_eq!(json_body(response).await["deletedCount"], 1);

    let response = app
        .oneshot(bare_request("GET", "/productos"))
        .await
        .expect("request");
    assert_eq!(json_body(response).await["total"], 0);
}

#[tokio::test]
async fn test_create_rejects_non_object_body() {
    let (_, app) = setup();

    let response = app
        .oneshot(json_request("POST", "/productos", json!([1, 2, 3])))
        .await
        .expect("request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["success"], false);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_resource_groups_are_independent() {
    let (_, app) = setup();

    app.clone()
        .oneshot(json_request("POST", "/categorias", json!({"nombre": "Ropa"})))
        .await
        .expect("request");

    let response = app
        .oneshot(bare_request("GET", "/productos"))
        .await
        .expect("request");
    let listed = json_body(response).await;
    assert_eq!(listed["recurso"], "Producto");
    assert_eq!(listed["total"], 0);
}
