use minijinja::context;

use crate::features::prompt_builder::models::{OutputFormat, PromptRequest};
use crate::shared::prompts::{render_template, TemplateError};

/// Template used for each output format
pub fn template_for(format: OutputFormat) -> &'static str {
    match format {
        OutputFormat::Xml => "optimized_prompt/xml.jinja",
        OutputFormat::Markdown => "optimized_prompt/markdown.jinja",
        OutputFormat::Mixed => "optimized_prompt/mixed.jinja",
    }
}

/// Build the instruction payload sent to the language model.
///
/// Pure: the same request always yields the same payload. The only error is a
/// template that fails to render, which means the built-in templates are broken.
pub fn compose(request: &PromptRequest) -> Result<String, TemplateError> {
    let use_case = request.use_case();
    let format = request.format();

    render_template(
        template_for(format),
        context! {
            description => request.description(),
            use_case => use_case.id(),
            use_case_label => use_case.label(),
            use_case_hint => use_case.hint(),
            format => format.id(),
        },
    )
}
