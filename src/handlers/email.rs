use crate::{
    calculator::{format_amount, is_cost_reduction},
    error::AppError,
    metrics,
    providers::email_webhook::{self, EmailNotification},
    server::AppState,
};
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::error;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendEmailRequest {
    pub email: String,
    pub name: String,
    pub company_name: String,
    pub current_cost: i64,
    pub gws_cost: i64,
    pub savings: i64,
}

#[derive(Debug, Serialize)]
pub struct SendEmailResponse {
    pub success: bool,
}

/// Handle POST /api/send-email
///
/// Forwards the diagnosis summary to the email webhook. Amounts are
/// formatted here so the webhook template can drop them straight into the
/// message body.
pub async fn send_email(
    State(state): State<AppState>,
    Json(request): Json<SendEmailRequest>,
) -> Result<Json<SendEmailResponse>, AppError> {
    let email_config = &state.config.email;
    if !email_config.enabled || email_config.webhook_url.is_empty() {
        error!("Email notification requested but no webhook is configured");
        return Err(AppError::ConfigError("メール送信設定エラー".to_string()));
    }

    let payload = EmailNotification {
        email: request.email,
        name: request.name,
        company_name: request.company_name,
        current_cost: format_amount(request.current_cost),
        gws_cost: format_amount(request.gws_cost),
        savings: format_amount(request.savings.abs()),
        is_savings: is_cost_reduction(request.savings),
    };

    let started = Instant::now();
    let result = email_webhook::send_notification(&state.http_client, email_config, &payload).await;
    metrics::record_upstream_duration("email_webhook", started.elapsed());

    if let Err(e) = result {
        metrics::record_email("failure");
        error!("Email notification failed: {}", e);
        return Err(e);
    }
    metrics::record_email("success");

    Ok(Json(SendEmailResponse { success: true }))
}
