use crate::{config::EmailConfig, error::AppError};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Payload forwarded to the email webhook
///
/// Amounts are pre-formatted strings (thousands-grouped, no currency
/// symbol); `savings` carries the absolute value with `is_savings`
/// indicating the direction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailNotification {
    pub email: String,
    pub name: String,
    pub company_name: String,
    pub current_cost: String,
    pub gws_cost: String,
    pub savings: String,
    pub is_savings: bool,
}

/// Forward the diagnosis summary to the configured webhook, which performs
/// the actual email delivery.
pub async fn send_notification(
    client: &Client,
    config: &EmailConfig,
    payload: &EmailNotification,
) -> Result<(), AppError> {
    let response = client
        .post(&config.webhook_url)
        .header("Content-Type", "application/json")
        .timeout(Duration::from_secs(config.timeout_seconds))
        .json(payload)
        .send()
        .await?;

    if !response.status().is_success() {
        let status = response.status();
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(AppError::UpstreamError {
            status,
            message: error_text,
        });
    }

    Ok(())
}
