//! REST API handlers
//!
//! CRUD over the results collection. Every successful write is broadcast
//! to WebSocket clients as a change event, published before the next write
//! may start.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde_json::{Value, json};
use std::sync::Arc;

use shared::{ChangeEvent, CreatedResponse, MessageResponse, ProcessId, ResultDraft, ResultId, ResultRecord, process_info};

use crate::error::{RelayError, RelayResult};
use crate::state::RelayState;
use crate::traits::ResultRepository;

type Shared<R> = State<Arc<RelayState<R>>>;

/// Surface malformed bodies as 400 like any other invalid result
fn draft_from(payload: Result<Json<ResultDraft>, JsonRejection>) -> RelayResult<ResultDraft> {
    payload
        .map(|Json(draft)| draft)
        .map_err(|rejection| RelayError::InvalidRequest {
            details: rejection.body_text(),
        })
}

/// GET /api
pub async fn list_results<R>(State(state): Shared<R>) -> RelayResult<Json<Vec<ResultRecord>>>
where
    R: ResultRepository,
{
    Ok(Json(state.repository.list().await?))
}

/// POST /api
pub async fn create_result<R>(
    State(state): Shared<R>,
    payload: Result<Json<ResultDraft>, JsonRejection>,
) -> RelayResult<(StatusCode, Json<CreatedResponse>)>
where
    R: ResultRepository,
{
    let draft = draft_from(payload)?;
    let _write = state.lock_writes().await;
    let record = state.repository.insert(draft).await?;
    process_info!(ProcessId::current(), "➕ Created result {} for {}", record.id, record.student_name);

    state.publish(ChangeEvent::New { result: record.clone() });

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            message: "Data created successfully.".to_string(),
            data: record,
        }),
    ))
}

/// PUT /api/:id
pub async fn update_result<R>(
    State(state): Shared<R>,
    Path(id): Path<String>,
    payload: Result<Json<ResultDraft>, JsonRejection>,
) -> RelayResult<Json<ResultRecord>>
where
    R: ResultRepository,
{
    let id = ResultId::new(id);
    let draft = draft_from(payload)?;
    let _write = state.lock_writes().await;
    let record = state
        .repository
        .replace(&id, draft)
        .await?
        .ok_or_else(|| RelayError::NotFound { id: id.to_string() })?;
    process_info!(ProcessId::current(), "✏️ Updated result {}", record.id);

    state.publish(ChangeEvent::Update { result: record.clone() });
    Ok(Json(record))
}

/// DELETE /api/:id
pub async fn delete_result<R>(State(state): Shared<R>, Path(id): Path<String>) -> RelayResult<Json<MessageResponse>>
where
    R: ResultRepository,
{
    let id = ResultId::new(id);
    let _write = state.lock_writes().await;
    if !state.repository.delete(&id).await? {
        return Err(RelayError::NotFound { id: id.to_string() });
    }
    process_info!(ProcessId::current(), "🗑️ Deleted result {}", id);

    state.publish(ChangeEvent::Delete { id });
    Ok(Json(MessageResponse::new("Result deleted successfully")))
}

/// GET /health
pub async fn health_check<R>(State(state): Shared<R>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "connected_clients": state.connection_count(),
    }))
}

/// Any unmatched route
pub async fn not_found() -> (StatusCode, Json<Value>) {
    (StatusCode::NOT_FOUND, Json(json!("This page does not exist")))
}
