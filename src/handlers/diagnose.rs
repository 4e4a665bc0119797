use crate::{
    calculator::{self, LineOutcome},
    error::AppError,
    metrics,
    models::{CostSummary, DiagnosisForm},
    server::AppState,
    validation,
};
use axum::{extract::State, Json};
use serde::Serialize;
use tracing::warn;

/// A selected line that found no catalog price
///
/// Reported alongside the summary so callers can tell a lookup miss apart
/// from the user not using the category. Neither contributes any cost.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnpricedLine {
    pub category_name: String,
    pub service_name: String,
    pub plan_name: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnoseResponse {
    #[serde(flatten)]
    pub summary: CostSummary,
    pub unpriced: Vec<UnpricedLine>,
}

/// Handle POST /api/diagnose
///
/// Validates the submission and runs the cost calculation against the
/// catalog loaded at startup.
pub async fn diagnose(
    State(state): State<AppState>,
    Json(form): Json<DiagnosisForm>,
) -> Result<Json<DiagnoseResponse>, AppError> {
    validation::validate_form(&form).map_err(AppError::ValidationFailed)?;

    let outcome = calculator::calculate(
        &form,
        &state.catalog,
        &state.defaults,
        state.config.bundle.price_per_user_per_year,
    );

    let unpriced: Vec<UnpricedLine> = outcome
        .lines
        .iter()
        .filter_map(|line| match line {
            LineOutcome::Unpriced {
                category,
                service_name,
                plan_name,
            } => Some(UnpricedLine {
                category_name: category.display_name().to_string(),
                service_name: service_name.clone(),
                plan_name: plan_name.clone(),
            }),
            _ => None,
        })
        .collect();

    for line in &unpriced {
        warn!(
            "No catalog price for ({}, {}) in category {}",
            line.service_name, line.plan_name, line.category_name
        );
    }

    metrics::record_diagnosis(outcome.summary.selected_services.len(), unpriced.len());

    Ok(Json(DiagnoseResponse {
        summary: outcome.summary,
        unpriced,
    }))
}
