use std::sync::Arc;

use schemars::JsonSchema;
use serde::Deserialize;

use crate::core::error::Result;
use crate::features::prompt_builder::models::{PromptRequest, PromptResponse};
use crate::features::prompt_builder::services::composer;
use crate::shared::llm::{
    parse_response, InferenceError, InferenceGateway, InferenceRequest, LlmResponse, RetryPolicy,
};
use crate::shared::prompts::render_response_format_prompt;

/// Structured reply expected from the model
#[derive(Debug, Deserialize, JsonSchema)]
pub struct OptimizedPromptReply {
    /// The optimized prompt, written in Persian
    #[serde(rename = "optimizedPrompt")]
    pub optimized_prompt: String,
}

impl LlmResponse for OptimizedPromptReply {
    fn check(&self) -> std::result::Result<(), String> {
        if self.optimized_prompt.trim().is_empty() {
            return Err("optimizedPrompt is empty".to_string());
        }
        Ok(())
    }
}

/// Turns validated requests into optimized prompts via the inference gateway
pub struct PromptBuilderService {
    gateway: Arc<dyn InferenceGateway>,
    retry: RetryPolicy,
}

impl PromptBuilderService {
    pub fn new(gateway: Arc<dyn InferenceGateway>, retry: RetryPolicy) -> Self {
        Self { gateway, retry }
    }

    pub async fn generate(&self, request: &PromptRequest) -> Result<PromptResponse> {
        let prompt = composer::compose(request)?;
        let system = render_response_format_prompt(&OptimizedPromptReply::json_schema_string())?;

        tracing::info!(
            "Generating optimized prompt: use_case={}, format={}, gateway={}",
            request.use_case(),
            request.format(),
            self.gateway.name()
        );

        let text = self
            .call_with_retry(&InferenceRequest { system, prompt })
            .await?;
        let reply: OptimizedPromptReply = parse_response(&text)?;

        Ok(PromptResponse {
            optimized_prompt: reply.optimized_prompt,
        })
    }

    async fn call_with_retry(
        &self,
        request: &InferenceRequest,
    ) -> std::result::Result<String, InferenceError> {
        let mut retry = 0;

        loop {
            match self.gateway.generate(request).await {
                Ok(text) => return Ok(text),
                Err(e) if e.is_retryable() && retry < self.retry.max_retries => {
                    let delay = self.retry.delay_for(retry);
                    retry += 1;
                    tracing::warn!(
                        "Inference attempt {}/{} failed: {}. Retrying in {:?}",
                        retry,
                        self.retry.max_attempts(),
                        e,
                        delay
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => {
                    tracing::error!("Inference failed after {} attempt(s): {}", retry + 1, e);
                    return Err(e);
                }
            }
        }
    }
}
