//! Standard response envelope helpers.

use axum::Json;
use serde::Serialize;
use serde_json::Value;

/// `{message, data?, changes?, id?}` returned by every successful handler.
#[derive(Debug, Serialize)]
pub struct Envelope {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub changes: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
}

pub fn success(data: Value) -> Json<Envelope> {
    Json(Envelope {
        message: "success".into(),
        data: Some(data),
        changes: None,
        id: None,
    })
}

pub fn updated(data: Value, changes: u64) -> Json<Envelope> {
    Json(Envelope {
        message: "success".into(),
        data: Some(data),
        changes: Some(changes),
        id: None,
    })
}

pub fn deleted(changes: u64, id: i64) -> Json<Envelope> {
    Json(Envelope {
        message: "deleted".into(),
        data: None,
        changes: Some(changes),
        id: Some(id),
    })
}

/// Update or delete matched no row. Sent with a success status.
pub fn not_found(label: &str) -> Json<Envelope> {
    Json(Envelope {
        message: format!("{} not found", label),
        data: None,
        changes: None,
        id: None,
    })
}
