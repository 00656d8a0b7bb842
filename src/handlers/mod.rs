pub mod auth;
pub mod catalog;
pub mod dealers;

use axum::Json;
use serde_json::{Value, json};

/// GET /healthz
pub async fn healthz() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
