use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use utoipa::ToSchema;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::features::prompt_builder::dtos::GeneratePromptDto;

/// Purpose of the requested content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ToSchema)]
pub enum UseCase {
    #[serde(rename = "Tolid-e-mohtava")]
    ContentGeneration,
    #[serde(rename = "Code-nevisi")]
    CodeWriting,
    #[serde(rename = "Tahqiq-va-tahlil")]
    ResearchAnalysis,
    #[serde(rename = "Sefareshi")]
    Custom,
}

impl UseCase {
    pub const ALL: [UseCase; 4] = [
        UseCase::ContentGeneration,
        UseCase::CodeWriting,
        UseCase::ResearchAnalysis,
        UseCase::Custom,
    ];

    /// Identifier sent over the wire
    pub fn id(&self) -> &'static str {
        match self {
            UseCase::ContentGeneration => "Tolid-e-mohtava",
            UseCase::CodeWriting => "Code-nevisi",
            UseCase::ResearchAnalysis => "Tahqiq-va-tahlil",
            UseCase::Custom => "Sefareshi",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            UseCase::ContentGeneration => "تولید محتوا",
            UseCase::CodeWriting => "کدنویسی",
            UseCase::ResearchAnalysis => "تحقیق و تحلیل",
            UseCase::Custom => "سفارشی",
        }
    }

    /// Extra guidance for the prompt engineer, specific to the use case
    pub fn hint(&self) -> &'static str {
        match self {
            UseCase::ContentGeneration => {
                "The prompt should pin down the target audience, tone of voice, length and a clear call to action."
            }
            UseCase::CodeWriting => {
                "The prompt should name the programming language, the inputs and outputs, constraints, and ask for explained, runnable code."
            }
            UseCase::ResearchAnalysis => {
                "The prompt should define the research question, the sources or data to analyze, the analysis method and how findings are reported."
            }
            UseCase::Custom => {
                "Infer the goal from the description and add any role, context and constraints the model will need."
            }
        }
    }
}

impl fmt::Display for UseCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for UseCase {
    type Err = String;

    /// Accepts the wire identifiers and the English variant names
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Tolid-e-mohtava" | "ContentGeneration" => Ok(UseCase::ContentGeneration),
            "Code-nevisi" | "CodeWriting" => Ok(UseCase::CodeWriting),
            "Tahqiq-va-tahlil" | "ResearchAnalysis" => Ok(UseCase::ResearchAnalysis),
            "Sefareshi" | "Custom" => Ok(UseCase::Custom),
            other => Err(format!("Unknown use case: {}", other)),
        }
    }
}

/// Structural style of the desired output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ToSchema)]
pub enum OutputFormat {
    #[serde(rename = "XML")]
    Xml,
    Markdown,
    Mixed,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 3] = [
        OutputFormat::Xml,
        OutputFormat::Markdown,
        OutputFormat::Mixed,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            OutputFormat::Xml => "XML",
            OutputFormat::Markdown => "Markdown",
            OutputFormat::Mixed => "Mixed",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OutputFormat::Xml => "XML",
            OutputFormat::Markdown => "Markdown",
            OutputFormat::Mixed => "ترکیبی (Mixed)",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "XML" => Ok(OutputFormat::Xml),
            "Markdown" => Ok(OutputFormat::Markdown),
            "Mixed" => Ok(OutputFormat::Mixed),
            other => Err(format!("Unknown format: {}", other)),
        }
    }
}

/// A validated submission. Only constructible through validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptRequest {
    description: String,
    use_case: UseCase,
    format: OutputFormat,
}

impl PromptRequest {
    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn use_case(&self) -> UseCase {
        self.use_case
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }
}

impl TryFrom<GeneratePromptDto> for PromptRequest {
    type Error = ValidationErrors;

    fn try_from(dto: GeneratePromptDto) -> Result<Self, Self::Error> {
        dto.validate()?;

        let use_case = dto
            .use_case
            .parse()
            .map_err(|e: String| single_error("use_case", e))?;
        let format = dto
            .format
            .parse()
            .map_err(|e: String| single_error("format", e))?;

        Ok(Self {
            description: dto.description,
            use_case,
            format,
        })
    }
}

fn single_error(field: &'static str, message: String) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    errors.add(field, ValidationError::new(field).with_message(Cow::Owned(message)));
    errors
}

/// The model's reply, reduced to what the caller needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptResponse {
    pub optimized_prompt: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto(description: &str, use_case: &str, format: &str) -> GeneratePromptDto {
        GeneratePromptDto {
            description: description.to_string(),
            use_case: use_case.to_string(),
            format: format.to_string(),
        }
    }

    #[test]
    fn test_use_case_round_trips_through_id() {
        for use_case in UseCase::ALL {
            assert_eq!(use_case.id().parse::<UseCase>(), Ok(use_case));
        }
    }

    #[test]
    fn test_use_case_accepts_english_aliases() {
        assert_eq!("ContentGeneration".parse::<UseCase>(), Ok(UseCase::ContentGeneration));
        assert_eq!("CodeWriting".parse::<UseCase>(), Ok(UseCase::CodeWriting));
        assert_eq!("ResearchAnalysis".parse::<UseCase>(), Ok(UseCase::ResearchAnalysis));
        assert_eq!("Custom".parse::<UseCase>(), Ok(UseCase::Custom));
    }

    #[test]
    fn test_format_serializes_to_wire_id() {
        for format in OutputFormat::ALL {
            let json = serde_json::to_value(format).unwrap();
            assert_eq!(json, serde_json::Value::String(format.id().to_string()));
        }
    }

    #[test]
    fn test_try_from_valid_dto() {
        let request = PromptRequest::try_from(dto(
            "متن تبلیغاتی برای مودم فیبرنوری",
            "ContentGeneration",
            "Markdown",
        ))
        .unwrap();

        assert_eq!(request.description(), "متن تبلیغاتی برای مودم فیبرنوری");
        assert_eq!(request.use_case(), UseCase::ContentGeneration);
        assert_eq!(request.format(), OutputFormat::Markdown);
    }

    #[test]
    fn test_try_from_names_every_offending_field() {
        let errors = PromptRequest::try_from(dto("short", "Poetry", "JSON")).unwrap_err();
        let fields = errors.field_errors();

        assert!(fields.contains_key("description"));
        assert!(fields.contains_key("use_case"));
        assert!(fields.contains_key("format"));
    }

    #[test]
    fn test_try_from_rejects_only_bad_format() {
        let errors =
            PromptRequest::try_from(dto("a perfectly fine description", "Code-nevisi", "YAML"))
                .unwrap_err();
        let fields = errors.field_errors();

        assert_eq!(fields.len(), 1);
        assert!(fields.contains_key("format"));
    }
}
