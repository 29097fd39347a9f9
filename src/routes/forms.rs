use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::{Value, json};

use crate::error::AppError;
use crate::forms::{self, Published};
use crate::models::{FormRecord, FormSummary};
use crate::state::SharedState;

/// `POST /api/publish-form` with body `{ "formSchema": { "fields": [...] } }`.
pub async fn publish(
    State(state): State<SharedState>,
    body: Bytes,
) -> Result<Json<Published>, AppError> {
    // A body that is not JSON carries no usable schema either.
    let body: Value = serde_json::from_slice(&body).map_err(|e| {
        tracing::debug!("Rejecting publish body: {e}");
        AppError::InvalidSchema
    })?;

    let published = forms::publish(state.store.as_ref(), body.get("formSchema")).await?;
    Ok(Json(published))
}

pub async fn list(State(state): State<SharedState>) -> Result<Json<Value>, AppError> {
    let forms: Vec<FormSummary> = state
        .store
        .list()
        .await
        .map_err(AppError::storage("Failed to list forms"))?
        .iter()
        .map(FormRecord::summary)
        .collect();

    Ok(Json(json!({ "forms": forms })))
}

pub async fn get(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<FormRecord>, AppError> {
    let record = state
        .store
        .get(&id)
        .await
        .map_err(AppError::storage("Failed to load form"))?
        .ok_or_else(|| AppError::NotFound("Form not found".to_string()))?;
    Ok(Json(record))
}

pub async fn submit(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let data: Value = serde_json::from_slice(&body).map_err(|_| AppError::InvalidSubmission)?;
    let submission_id = forms::submit(state.store.as_ref(), &id, data).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "submissionId": submission_id })),
    ))
}
