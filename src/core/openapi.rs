use utoipa::{Modify, OpenApi};

use crate::features::prompt_builder::{
    dtos as prompt_builder_dtos, handlers as prompt_builder_handlers,
    models as prompt_builder_models,
};
use crate::shared::types::ApiResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        // Prompt builder (public)
        prompt_builder_handlers::prompt_builder_handler::generate_prompt,
        prompt_builder_handlers::prompt_builder_handler::list_options,
    ),
    components(
        schemas(
            // Prompt builder
            prompt_builder_dtos::GeneratePromptDto,
            prompt_builder_dtos::OptimizedPromptDto,
            prompt_builder_dtos::PromptOptionDto,
            prompt_builder_dtos::PromptOptionsDto,
            prompt_builder_models::UseCase,
            prompt_builder_models::OutputFormat,
            // Envelopes
            ApiResponse<prompt_builder_dtos::OptimizedPromptDto>,
            ApiResponse<prompt_builder_dtos::PromptOptionsDto>,
        )
    ),
    tags(
        (name = "prompt-builder", description = "Optimized prompt generation for language models"),
    ),
    info(
        title = "Promptsaz API",
        version = "0.1.0",
        description = "API documentation for Promptsaz",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
