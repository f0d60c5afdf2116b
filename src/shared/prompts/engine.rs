//! Template engine for prompt management using Jinja2 syntax.
//!
//! Built-in templates are compiled into the binary from `templates/prompts/`,
//! so rendering does not depend on the working directory. An optional
//! override directory can replace any of them at startup.

use minijinja::{AutoEscape, Environment, Value};
use std::path::Path;
use std::sync::OnceLock;
use thiserror::Error;

/// Global template environment
static TEMPLATE_ENV: OnceLock<Environment<'static>> = OnceLock::new();

/// Templates shipped with the binary, keyed by path relative to `templates/prompts/`
const BUILTIN_TEMPLATES: &[(&str, &str)] = &[
    (
        "optimized_prompt/base.jinja",
        include_str!("../../../templates/prompts/optimized_prompt/base.jinja"),
    ),
    (
        "optimized_prompt/xml.jinja",
        include_str!("../../../templates/prompts/optimized_prompt/xml.jinja"),
    ),
    (
        "optimized_prompt/markdown.jinja",
        include_str!("../../../templates/prompts/optimized_prompt/markdown.jinja"),
    ),
    (
        "optimized_prompt/mixed.jinja",
        include_str!("../../../templates/prompts/optimized_prompt/mixed.jinja"),
    ),
    (
        "optimized_prompt/response_format.jinja",
        include_str!("../../../templates/prompts/optimized_prompt/response_format.jinja"),
    ),
];

/// Errors that can occur during template operations
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Template '{0}' not found")]
    NotFound(String),

    #[error("Failed to render template: {0}")]
    RenderError(String),
}

/// Build the environment from the built-in templates, then apply overrides.
fn build_environment(override_dir: Option<&Path>) -> Environment<'static> {
    let mut env = Environment::new();
    // Prompts are plain text; descriptions must be embedded verbatim
    env.set_auto_escape_callback(|_| AutoEscape::None);

    for &(name, source) in BUILTIN_TEMPLATES {
        if let Err(e) = env.add_template(name, source) {
            tracing::error!("Failed to load built-in template {}: {}", name, e);
        }
    }

    if let Some(dir) = override_dir {
        if dir.exists() {
            load_templates_recursive(&mut env, dir, dir);
        } else {
            tracing::warn!(
                "Prompt template override directory {} does not exist, using built-in templates",
                dir.display()
            );
        }
    }

    env
}

/// Recursively load all .jinja templates from a directory
fn load_templates_recursive(env: &mut Environment<'static>, base_path: &Path, current_path: &Path) {
    if let Ok(entries) = std::fs::read_dir(current_path) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                load_templates_recursive(env, base_path, &path);
            } else if path.extension().is_some_and(|ext| ext == "jinja") {
                if let Ok(relative) = path.strip_prefix(base_path) {
                    let template_name = relative.to_string_lossy().replace('\\', "/");
                    if let Ok(content) = std::fs::read_to_string(&path) {
                        // Templates live for the whole process
                        let static_name: &'static str =
                            Box::leak(template_name.clone().into_boxed_str());
                        let static_content: &'static str = Box::leak(content.into_boxed_str());
                        if let Err(e) = env.add_template(static_name, static_content) {
                            tracing::warn!("Failed to load template {}: {}", template_name, e);
                        } else {
                            tracing::info!("Loaded template override: {}", template_name);
                        }
                    }
                }
            }
        }
    }
}

/// Initialize the global environment, applying overrides from `override_dir`.
///
/// Must be called before the first render to take effect. Returns `false`
/// if the environment was already initialized.
pub fn init_templates(override_dir: Option<&Path>) -> bool {
    let mut initialized = false;
    TEMPLATE_ENV.get_or_init(|| {
        initialized = true;
        build_environment(override_dir)
    });
    initialized
}

/// Get the global template environment
fn get_environment() -> &'static Environment<'static> {
    TEMPLATE_ENV.get_or_init(|| build_environment(None))
}

/// Render a template with the given context.
///
/// # Example
/// ```ignore
/// use minijinja::context;
/// use crate::shared::prompts::render_template;
///
/// let prompt = render_template(
///     "optimized_prompt/response_format.jinja",
///     context! { json_schema => "{}" },
/// )?;
/// ```
pub fn render_template(template_name: &str, ctx: Value) -> Result<String, TemplateError> {
    let template = get_environment()
        .get_template(template_name)
        .map_err(|_| TemplateError::NotFound(template_name.to_string()))?;

    template
        .render(ctx)
        .map_err(|e| TemplateError::RenderError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use minijinja::context;

    #[test]
    fn test_render_missing_template() {
        let result = render_template("nonexistent.jinja", context! {});
        assert!(matches!(result, Err(TemplateError::NotFound(_))));
    }

    #[test]
    fn test_builtin_templates_are_registered() {
        let env = get_environment();
        for &(name, _) in BUILTIN_TEMPLATES {
            assert!(env.get_template(name).is_ok(), "missing {}", name);
        }
        assert!(env.get_template("definitely_not_a_real_template.jinja").is_err());
    }

    #[test]
    fn test_override_directory_replaces_builtin() {
        let dir = std::env::temp_dir().join(format!("prompt-overrides-{}", std::process::id()));
        let nested = dir.join("optimized_prompt");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(
            nested.join("response_format.jinja"),
            "custom {{ json_schema }}",
        )
        .unwrap();

        let env = build_environment(Some(&dir));
        let rendered = env
            .get_template("optimized_prompt/response_format.jinja")
            .unwrap()
            .render(context! { json_schema => "{}" })
            .unwrap();
        assert_eq!(rendered, "custom {}");

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
