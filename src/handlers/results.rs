use crate::{error::AppError, metrics, models::DiagnosisRecord, server::AppState};
use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use tracing::info;

#[derive(Debug, Serialize)]
pub struct SaveResultResponse {
    pub success: bool,
    pub id: String,
}

/// Handle POST /api/results
///
/// Persists a flattened diagnosis result. The form treats a failure here
/// as non-blocking: results are still shown to the user.
pub async fn save_result(
    State(state): State<AppState>,
    Json(record): Json<DiagnosisRecord>,
) -> Result<Json<SaveResultResponse>, AppError> {
    let id = state.store.insert(&record).await?;

    info!(
        "Saved diagnosis result {} for {} ({} services)",
        id,
        record.company_name,
        record.current_services.len()
    );
    metrics::record_result_saved();

    Ok(Json(SaveResultResponse { success: true, id }))
}

/// Handle GET /api/results/{id}
pub async fn get_result(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DiagnosisRecord>, AppError> {
    let record = state
        .store
        .fetch(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("diagnosis result {}", id)))?;

    Ok(Json(record))
}
