use axum::{http::StatusCode, Json};
use serde::Serialize;
use serde_json::{json, Value};

/// Success envelope shared by every endpoint: `{success, message, data}`.
pub fn ok<T: Serialize>(message: &str, data: T) -> Json<Value> {
    Json(json!({
        "success": true,
        "message": message,
        "data": data
    }))
}

pub fn created<T: Serialize>(message: &str, data: T) -> (StatusCode, Json<Value>) {
    (StatusCode::CREATED, ok(message, data))
}

/// One page of a filtered listing.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub page: i64,
    pub limit: i64,
    pub total_pages: i64,
}
