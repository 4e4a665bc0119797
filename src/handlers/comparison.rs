use crate::{
    error::AppError,
    metrics,
    models::gemini::{GenerateContentRequest, GenerationConfig},
    models::SelectedService,
    providers,
    server::AppState,
};
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{error, info};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateComparisonRequest {
    #[serde(default)]
    pub selected_services: Vec<SelectedService>,
}

#[derive(Debug, Serialize)]
pub struct GenerateComparisonResponse {
    pub comparison: String,
}

/// Handle POST /api/generate-comparison
///
/// Sends the selected services to Gemini and returns the generated
/// feature-comparison table. The caller treats a failure here as a missing
/// comparison, never as a failed diagnosis.
pub async fn generate_comparison(
    State(state): State<AppState>,
    Json(request): Json<GenerateComparisonRequest>,
) -> Result<Json<GenerateComparisonResponse>, AppError> {
    if request.selected_services.is_empty() {
        return Err(AppError::BadRequest(
            "選択されたサービスがありません".to_string(),
        ));
    }

    let gemini = &state.config.gemini;
    if !gemini.enabled || gemini.api_key.is_empty() {
        error!("Comparison requested but Gemini is not configured");
        return Err(AppError::ConfigError("API設定エラー".to_string()));
    }

    let prompt = build_comparison_prompt(&request.selected_services, &state.config.bundle.product_name);
    let gemini_request = GenerateContentRequest::single_turn(
        prompt,
        GenerationConfig {
            temperature: Some(gemini.temperature),
            max_output_tokens: Some(gemini.max_output_tokens),
        },
    );

    let started = Instant::now();
    let response =
        providers::gemini::generate_content(&state.http_client, gemini, gemini_request).await;
    metrics::record_upstream_duration("gemini", started.elapsed());

    let response = match response {
        Ok(r) => r,
        Err(e) => {
            metrics::record_comparison("failure");
            error!("Comparison generation failed: {}", e);
            return Err(e);
        }
    };

    let comparison = response.first_candidate_text().to_string();
    if let Some(usage) = &response.usage_metadata {
        info!(
            "Comparison generated: {} prompt tokens, {} output tokens",
            usage.prompt_token_count, usage.candidates_token_count
        );
    }
    metrics::record_comparison("success");

    Ok(Json(GenerateComparisonResponse { comparison }))
}

/// Build the Japanese comparison prompt for the selected services.
pub fn build_comparison_prompt(selected_services: &[SelectedService], bundle_name: &str) -> String {
    let services_list = selected_services
        .iter()
        .map(|s| format!("- {}: {} ({})", s.category_name, s.service_name, s.plan_name))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "以下の現在利用しているサービスと、{bundle_name}の機能を比較する表を、簡潔に（5〜7行程度）生成してください。

現在利用しているサービス:
{services_list}

{bundle_name}の機能:
- Gmail (メール)
- Google Meet (ビデオ会議、最大500名)
- Google Chat (ビジネスチャット)
- Google Drive (ストレージ、2TB/ユーザー)
- Google Docs, Sheets, Slides (文書作成、表計算、プレゼンテーション)
- Google Calendar (カレンダー)
- Gemini for Google Workspace (生成AI)
- 高度なセキュリティと管理機能

比較の観点:
1. 機能の充実度
2. 統合性（サービス間の連携）
3. コストパフォーマンス
4. 生産性向上

**出力形式:**
Markdown形式の表で出力してください。見出しは「機能比較」とし、「現在のツール」「Google Workspace」「メリット」の3列で構成してください。"
    )
}
