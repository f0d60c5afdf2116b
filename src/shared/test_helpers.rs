use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;

use crate::features::prompt_builder::{routes::routes, PromptBuilderService};
use crate::shared::llm::{InferenceError, InferenceGateway, InferenceRequest, RetryPolicy};

/// Gateway that replays queued results and records every request it sees.
///
/// Once the queue is drained, further calls fail with a non-retryable error.
#[derive(Default)]
pub struct StubGateway {
    replies: Mutex<VecDeque<Result<String, InferenceError>>>,
    requests: Mutex<Vec<InferenceRequest>>,
}

impl StubGateway {
    pub fn new(replies: Vec<Result<String, InferenceError>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn replying(text: &str) -> Arc<Self> {
        Self::new(vec![Ok(text.to_string())])
    }

    pub fn failing(error: InferenceError) -> Arc<Self> {
        Self::new(vec![Err(error)])
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<InferenceRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl InferenceGateway for StubGateway {
    fn name(&self) -> &str {
        "stub"
    }

    async fn generate(&self, request: &InferenceRequest) -> Result<String, InferenceError> {
        self.requests.lock().unwrap().push(request.clone());
        self.replies.lock().unwrap().pop_front().unwrap_or_else(|| {
            Err(InferenceError::InvalidResponse(
                "stub gateway has no replies left".to_string(),
            ))
        })
    }
}

/// Retry policy without backoff delays
pub fn instant_retry(max_retries: u32) -> RetryPolicy {
    RetryPolicy {
        max_retries,
        base_delay: std::time::Duration::ZERO,
        max_delay: std::time::Duration::ZERO,
    }
}

/// Prompt builder router wired to the given gateway
pub fn prompt_router(gateway: Arc<StubGateway>) -> Router {
    let service = Arc::new(PromptBuilderService::new(gateway, instant_retry(0)));
    routes(service)
}
