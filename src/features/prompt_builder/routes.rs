use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::prompt_builder::handlers;
use crate::features::prompt_builder::services::PromptBuilderService;

/// Create routes for the prompt builder feature
///
/// Note: This feature is public (no authentication required).
pub fn routes(service: Arc<PromptBuilderService>) -> Router {
    Router::new()
        .route("/api/prompts/generate", post(handlers::generate_prompt))
        .route("/api/prompts/options", get(handlers::list_options))
        .with_state(service)
}
