//! Entity handlers: list, read, create, update, delete. Generic over the route family.
//! Each request validates first and then runs exactly one statement.

use crate::error::AppError;
use crate::extractors::{JsonObject, RecordId};
use crate::model::{Payload, Resource};
use crate::response::{self, Envelope};
use crate::service::RequestValidator;
use crate::state::AppState;
use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::{Map, Value};

/// Required-field check on the raw object, then typed parsing. The store is never reached on failure.
/// The raw object is handed back untouched so responses echo what the client sent.
fn parse_payload<P: Payload>(body: Map<String, Value>) -> Result<(P, Value), AppError> {
    RequestValidator::validate(&body, P::REQUIRED)?;
    let raw = Value::Object(body);
    let payload = P::deserialize(&raw).map_err(|e| AppError::BadRequest(e.to_string()))?;
    Ok((payload, raw))
}

pub async fn list<R: Resource>(State(state): State<AppState>) -> Result<Json<Envelope>, AppError> {
    let rows = state.accessor::<R>().list().await?;
    Ok(response::success(Value::Array(rows)))
}

/// No matching row is still a success, with `data: null`.
pub async fn read<R: Resource>(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> Result<Json<Envelope>, AppError> {
    let row = state.accessor::<R>().get(id).await?;
    Ok(response::success(row.unwrap_or(Value::Null)))
}

pub async fn create<R: Resource>(
    State(state): State<AppState>,
    JsonObject(body): JsonObject,
) -> Result<Json<Envelope>, AppError> {
    let (payload, raw): (R::Create, _) = parse_payload(body)?;
    state.accessor::<R>().insert(&payload).await?;
    Ok(response::success(raw))
}

pub async fn update<R: Resource>(
    State(state): State<AppState>,
    RecordId(id): RecordId,
    JsonObject(body): JsonObject,
) -> Result<Json<Envelope>, AppError> {
    let (payload, raw): (R::Update, _) = parse_payload(body)?;
    let changes = state.accessor::<R>().update(id, &payload).await?;
    if changes == 0 {
        return Ok(response::not_found(R::LABEL));
    }
    Ok(response::updated(raw, changes))
}

pub async fn delete<R: Resource>(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> Result<Json<Envelope>, AppError> {
    let changes = state.accessor::<R>().delete(id).await?;
    if changes == 0 {
        return Ok(response::not_found(R::LABEL));
    }
    Ok(response::deleted(changes, id))
}
