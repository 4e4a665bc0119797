use crate::{
    config::GeminiConfig,
    error::AppError,
    models::gemini::{GenerateContentRequest, GenerateContentResponse},
};
use reqwest::Client;
use std::time::Duration;

/// Call Gemini Generate Content API
/// Note: Model name is part of the URL path
pub async fn generate_content(
    client: &Client,
    config: &GeminiConfig,
    request: GenerateContentRequest,
) -> Result<GenerateContentResponse, AppError> {
    // Gemini API format: /v1beta/models/{model}:generateContent
    let url = format!("{}/models/{}:generateContent", config.base_url, config.model);

    let response = client
        .post(&url)
        .header("Content-Type", "application/json")
        .timeout(Duration::from_secs(config.timeout_seconds))
        .query(&[("key", &config.api_key)])
        .json(&request)
        .send()
        .await?;

    // Check for HTTP errors
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

    let body = response.json::<GenerateContentResponse>().await?;
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::gemini::GenerationConfig;
    use httpmock::prelude::*;

    fn test_config(base_url: String) -> GeminiConfig {
        GeminiConfig {
            enabled: true,
            api_key: "test-key".to_string(),
            base_url,
            model: "gemini-2.0-flash-exp".to_string(),
            timeout_seconds: 5,
            temperature: 0.7,
            max_output_tokens: 1024,
        }
    }

    fn test_request() -> GenerateContentRequest {
        GenerateContentRequest::single_turn(
            "比較してください".to_string(),
            GenerationConfig {
                temperature: Some(0.7),
                max_output_tokens: Some(1024),
            },
        )
    }

    #[tokio::test]
    async fn test_generate_content_success() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/models/gemini-2.0-flash-exp:generateContent")
                    .query_param("key", "test-key")
                    .json_body_includes(r#"{"contents": [{"role": "user"}]}"#);
                then.status(200).json_body(serde_json::json!({
                    "candidates": [{
                        "content": {"role": "model", "parts": [{"text": "| 比較 |"}]},
                        "finishReason": "STOP"
                    }]
                }));
            })
            .await;

        let client = Client::new();
        let config = test_config(server.base_url());
        let response = generate_content(&client, &config, test_request())
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(response.first_candidate_text(), "| 比較 |");
    }

    #[tokio::test]
    async fn test_generate_content_upstream_failure() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST);
                then.status(429).body("quota exceeded");
            })
            .await;

        let client = Client::new();
        let config = test_config(server.base_url());
        let err = generate_content(&client, &config, test_request())
            .await
            .unwrap_err();

        match err {
            AppError::UpstreamError { status, message } => {
                assert_eq!(status.as_u16(), 429);
                assert!(message.contains("quota"));
            }
            other => panic!("unexpected error: {}", other),
        }
    }
}
