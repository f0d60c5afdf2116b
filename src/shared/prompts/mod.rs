//! Prompt template management module.
//!
//! Templates live in `templates/prompts/`, use Jinja2 syntax and are compiled
//! into the binary. See [`engine`] for loading and overrides.
//!
//! # Usage
//!
//! ```ignore
//! use minijinja::context;
//! use crate::shared::prompts::render_template;
//!
//! let prompt = render_template(
//!     "optimized_prompt/markdown.jinja",
//!     context! { description => "...", use_case => "Sefareshi" },
//! )?;
//! ```

pub mod engine;

pub use engine::{init_templates, render_template, TemplateError};

use minijinja::context;

/// Render the system instruction that pins the model to a JSON reply.
///
/// # Arguments
/// * `json_schema` - JSON schema string for the expected output
pub fn render_response_format_prompt(json_schema: &str) -> Result<String, TemplateError> {
    render_template(
        "optimized_prompt/response_format.jinja",
        context! { json_schema => json_schema },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_format_embeds_schema() {
        let rendered = render_response_format_prompt(r#"{"type": "object"}"#).unwrap();

        assert!(rendered.contains(r#"{"type": "object"}"#));
        assert!(rendered.contains("optimizedPrompt"));
        assert!(rendered.contains("Respond ONLY with the JSON object"));
    }
}
