use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::prompt_builder::models::{OutputFormat, PromptResponse, UseCase};
use crate::shared::validation::{validate_description_length, validate_format, validate_use_case};

/// Request DTO for generating an optimized prompt
///
/// Missing fields deserialize to empty strings so that they are reported
/// as validation errors rather than JSON syntax errors.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GeneratePromptDto {
    /// Description of the desired content (10-500 characters)
    #[serde(default)]
    #[validate(custom(function = "validate_description_length"))]
    #[schema(example = "متن تبلیغاتی برای مودم فیبرنوری")]
    pub description: String,

    /// One of `Tolid-e-mohtava`, `Code-nevisi`, `Tahqiq-va-tahlil`, `Sefareshi`
    #[serde(default)]
    #[validate(custom(function = "validate_use_case"))]
    #[schema(example = "Tolid-e-mohtava")]
    pub use_case: String,

    /// One of `XML`, `Markdown`, `Mixed`
    #[serde(default)]
    #[validate(custom(function = "validate_format"))]
    #[schema(example = "Markdown")]
    pub format: String,
}

/// Response DTO carrying the generated prompt
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OptimizedPromptDto {
    pub optimized_prompt: String,
}

impl From<PromptResponse> for OptimizedPromptDto {
    fn from(response: PromptResponse) -> Self {
        Self {
            optimized_prompt: response.optimized_prompt,
        }
    }
}

/// A selectable option with its Persian label
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PromptOptionDto {
    pub id: String,
    pub label: String,
}

/// Use cases and formats accepted by the generate endpoint
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PromptOptionsDto {
    pub use_cases: Vec<PromptOptionDto>,
    pub formats: Vec<PromptOptionDto>,
}

impl PromptOptionsDto {
    pub fn all() -> Self {
        Self {
            use_cases: UseCase::ALL
                .iter()
                .map(|u| PromptOptionDto {
                    id: u.id().to_string(),
                    label: u.label().to_string(),
                })
                .collect(),
            formats: OutputFormat::ALL
                .iter()
                .map(|f| PromptOptionDto {
                    id: f.id().to_string(),
                    label: f.label().to_string(),
                })
                .collect(),
        }
    }
}
