use schemars::gen::SchemaGenerator;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;

/// Trait for structured replies expected from a language model
///
/// The JSON schema is embedded in the system prompt; parsed replies are then
/// checked with [`LlmResponse::check`] before they are handed to callers.
pub trait LlmResponse: DeserializeOwned + JsonSchema {
    /// Reject replies that parse but carry no usable content
    fn check(&self) -> Result<(), String>;

    /// Generate JSON schema string for use in LLM prompts
    fn json_schema_string() -> String {
        let mut gen = SchemaGenerator::default();
        let schema = gen.root_schema_for::<Self>();
        serde_json::to_string_pretty(&schema).unwrap_or_else(|_| "{}".to_string())
    }
}
