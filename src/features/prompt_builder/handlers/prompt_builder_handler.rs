use std::sync::Arc;

use axum::{extract::State, Json};

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::prompt_builder::dtos::{
    GeneratePromptDto, OptimizedPromptDto, PromptOptionsDto,
};
use crate::features::prompt_builder::models::PromptRequest;
use crate::features::prompt_builder::services::PromptBuilderService;
use crate::shared::types::ApiResponse;

/// Generate an optimized prompt
///
/// Validates the description, use case and format, composes the instruction
/// payload for the selected format and asks the language model for a Persian
/// prompt. Validation failures list every offending field.
#[utoipa::path(
    post,
    path = "/api/prompts/generate",
    request_body = GeneratePromptDto,
    responses(
        (status = 200, description = "Prompt generated successfully", body = ApiResponse<OptimizedPromptDto>),
        (status = 400, description = "Validation error or malformed JSON"),
        (status = 502, description = "Language model call failed")
    ),
    tag = "prompt-builder"
)]
pub async fn generate_prompt(
    State(service): State<Arc<PromptBuilderService>>,
    AppJson(dto): AppJson<GeneratePromptDto>,
) -> Result<Json<ApiResponse<OptimizedPromptDto>>> {
    let request = PromptRequest::try_from(dto)?;

    let response = service.generate(&request).await?;
    Ok(Json(ApiResponse::success(response.into())))
}

/// List the supported use cases and output formats with their labels
#[utoipa::path(
    get,
    path = "/api/prompts/options",
    responses(
        (status = 200, description = "Available options", body = ApiResponse<PromptOptionsDto>)
    ),
    tag = "prompt-builder"
)]
pub async fn list_options() -> Json<ApiResponse<PromptOptionsDto>> {
    Json(ApiResponse::success(PromptOptionsDto::all()))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{json, Value};

    use crate::shared::constants::GENERATION_FAILED_MESSAGE;
    use crate::shared::llm::InferenceError;
    use crate::shared::test_helpers::{prompt_router, StubGateway};

    const DESCRIPTION: &str = "متن تبلیغاتی برای مودم فیبرنوری";

    #[tokio::test]
    async fn test_generate_prompt_success() {
        let gateway = StubGateway::replying(r#"{"optimizedPrompt": "پرامپت بهینه"}"#);
        let server = TestServer::new(prompt_router(gateway.clone())).unwrap();

        let response = server
            .post("/api/prompts/generate")
            .json(&json!({
                "description": DESCRIPTION,
                "useCase": "Tolid-e-mohtava",
                "format": "Markdown"
            }))
            .await;

        response.assert_status_ok();
        response.assert_json(&json!({
            "success": true,
            "data": {"optimizedPrompt": "پرامپت بهینه"}
        }));
        assert_eq!(gateway.calls(), 1);
    }

    #[tokio::test]
    async fn test_generate_prompt_accepts_english_use_case() {
        let gateway = StubGateway::replying(r#"{"optimizedPrompt": "ok"}"#);
        let server = TestServer::new(prompt_router(gateway)).unwrap();

        let response = server
            .post("/api/prompts/generate")
            .json(&json!({
                "description": DESCRIPTION,
                "useCase": "ContentGeneration",
                "format": "XML"
            }))
            .await;

        response.assert_status_ok();
    }

    #[tokio::test]
    async fn test_generate_prompt_validation_names_fields() {
        let gateway = StubGateway::replying(r#"{"optimizedPrompt": "unused"}"#);
        let server = TestServer::new(prompt_router(gateway.clone())).unwrap();

        let response = server
            .post("/api/prompts/generate")
            .json(&json!({
                "description": "short",
                "useCase": "Poetry",
                "format": "YAML"
            }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["success"], json!(false));
        assert!(body.get("data").is_none());

        let errors: Vec<String> = serde_json::from_value(body["errors"].clone()).unwrap();
        assert_eq!(errors.len(), 3);
        assert!(errors.iter().any(|e| e.starts_with("description")));
        assert!(errors.iter().any(|e| e.starts_with("useCase:")));
        assert!(errors.iter().any(|e| e.starts_with("format")));
        assert_eq!(gateway.calls(), 0);
    }

    #[tokio::test]
    async fn test_generate_prompt_missing_fields_are_validation_errors() {
        let gateway = StubGateway::replying(r#"{"optimizedPrompt": "unused"}"#);
        let server = TestServer::new(prompt_router(gateway.clone())).unwrap();

        let response = server
            .post("/api/prompts/generate")
            .json(&json!({}))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["errors"].as_array().map(Vec::len), Some(3));
        assert_eq!(gateway.calls(), 0);
    }

    #[tokio::test]
    async fn test_generate_prompt_gateway_failure() {
        let gateway = StubGateway::failing(InferenceError::Timeout);
        let server = TestServer::new(prompt_router(gateway.clone())).unwrap();

        let response = server
            .post("/api/prompts/generate")
            .json(&json!({
                "description": DESCRIPTION,
                "useCase": "Tolid-e-mohtava",
                "format": "Markdown"
            }))
            .await;

        response.assert_status(StatusCode::BAD_GATEWAY);
        response.assert_json(&json!({
            "success": false,
            "error": GENERATION_FAILED_MESSAGE
        }));
        assert_eq!(gateway.calls(), 1);

        let sent = gateway.requests();
        assert!(sent[0].prompt.contains(DESCRIPTION));
        assert!(sent[0].prompt.contains("## "));
        assert!(sent[0].prompt.contains("\n- "));
    }

    #[tokio::test]
    async fn test_generate_prompt_malformed_json() {
        let gateway = StubGateway::replying(r#"{"optimizedPrompt": "unused"}"#);
        let server = TestServer::new(prompt_router(gateway.clone())).unwrap();

        let response = server
            .post("/api/prompts/generate")
            .text("{\"description\": ")
            .content_type("application/json")
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["success"], json!(false));
        assert!(body["error"].is_string());
        assert_eq!(gateway.calls(), 0);
    }

    #[tokio::test]
    async fn test_list_options() {
        let server = TestServer::new(prompt_router(StubGateway::new(vec![]))).unwrap();

        let response = server.get("/api/prompts/options").await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["success"], json!(true));
        assert_eq!(body["data"]["useCases"].as_array().map(Vec::len), Some(4));
        assert_eq!(body["data"]["formats"].as_array().map(Vec::len), Some(3));
        assert_eq!(body["data"]["formats"][0]["id"], json!("XML"));
    }
}
