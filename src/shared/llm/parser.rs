use lazy_static::lazy_static;
use regex::Regex;

use super::{InferenceError, LlmResponse};

lazy_static! {
    /// Regex for trailing commas before } or ]
    static ref TRAILING_COMMA_RE: Regex = Regex::new(r",(\s*[}\]])").unwrap();

    /// Regex for JavaScript string concatenation ("str1" + "str2")
    static ref JS_STRING_CONCAT_RE: Regex = Regex::new(r#""\s*\+\s*""#).unwrap();
}

/// Extract JSON string from text (handles multiple formats)
///
/// Tries in order:
/// 1. JSON in markdown code block: ```json ... ```
/// 2. Generic markdown code block: ``` ... ```
/// 3. Plain JSON starting with {
/// 4. JSON embedded anywhere in text (find { to })
pub fn extract_json_string(text: &str) -> Result<String, String> {
    if text.contains("```json") {
        return text
            .split("```json")
            .nth(1)
            .and_then(|s| s.split("```").next())
            .map(|s| s.trim().to_string())
            .ok_or_else(|| "Failed to extract JSON from markdown code block".to_string());
    }

    if let Some(start) = text.find("```") {
        let block_start = start + 3;
        // Skip optional language identifier on the same line
        if let Some(newline_offset) = text[block_start..].find('\n') {
            let json_start = block_start + newline_offset + 1;
            if let Some(end_offset) = text[json_start..].find("```") {
                return Ok(text[json_start..json_start + end_offset].trim().to_string());
            }
        }
    }

    let trimmed = text.trim();
    if trimmed.starts_with('{') {
        return Ok(trimmed.to_string());
    }

    let start = text
        .find('{')
        .ok_or_else(|| "No JSON object found in response".to_string())?;
    let end = text
        .rfind('}')
        .ok_or_else(|| "Incomplete JSON object in response".to_string())?;

    if start < end {
        Ok(text[start..=end].to_string())
    } else {
        Err("Invalid JSON boundaries in response".to_string())
    }
}

/// Fix trailing commas in JSON (common LLM mistake)
///
/// Example: `{"name": "John",}` -> `{"name": "John"}`
pub fn fix_trailing_commas(json_str: &str) -> String {
    TRAILING_COMMA_RE.replace_all(json_str, "$1").to_string()
}

/// Merge `"str1" + "str2"` into `"str1str2"`
pub fn fix_js_string_concatenation(json_str: &str) -> String {
    JS_STRING_CONCAT_RE.replace_all(json_str, "").to_string()
}

/// Repair JSON with llm_json, guarding against panics in the repair code
fn repair_json(json_str: &str) -> Option<String> {
    let options = llm_json::RepairOptions::default();
    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        llm_json::repair_json(json_str, &options)
    }));

    match result {
        Ok(Ok(repaired)) => Some(repaired),
        Ok(Err(e)) => {
            tracing::debug!("JSON repair failed: {:?}", e);
            None
        }
        Err(_) => {
            tracing::warn!("JSON repair panicked");
            None
        }
    }
}

/// Deserialize `T` from raw model output, trying progressively lenient strategies
///
/// 1. Direct parse of the whole reply
/// 2. Extract the JSON string (markdown/plain/embedded) and parse it
/// 3. Parse after quick fixes (string concatenation, trailing commas)
/// 4. Parse after llm_json repair
fn try_parse<T>(text: &str) -> Result<T, String>
where
    T: LlmResponse,
{
    // A well-formed reply may carry code fences inside its string values
    if let Ok(parsed) = serde_json::from_str::<T>(text.trim()) {
        return Ok(parsed);
    }

    let json_str = extract_json_string(text)?;

    if let Ok(parsed) = serde_json::from_str::<T>(&json_str) {
        return Ok(parsed);
    }

    let fixed = fix_trailing_commas(&fix_js_string_concatenation(&json_str));
    if let Ok(parsed) = serde_json::from_str::<T>(&fixed) {
        tracing::debug!("JSON parsed after quick fixes");
        return Ok(parsed);
    }

    if let Some(repaired) = repair_json(&json_str) {
        if let Ok(parsed) = serde_json::from_str::<T>(&repaired) {
            tracing::debug!("JSON parsed after llm_json repair");
            return Ok(parsed);
        }
    }

    Err(format!(
        "Failed to parse JSON after all repair attempts. Original: {}",
        json_str.chars().take(200).collect::<String>()
    ))
}

/// Parse a model reply into `T`.
///
/// Fails with [`InferenceError::InvalidResponse`] when no strategy yields a
/// value, or when the value does not pass [`LlmResponse::check`].
pub fn parse_response<T>(text: &str) -> Result<T, InferenceError>
where
    T: LlmResponse,
{
    let parsed = try_parse::<T>(text).map_err(InferenceError::InvalidResponse)?;
    parsed.check().map_err(InferenceError::InvalidResponse)?;
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use schemars::JsonSchema;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, JsonSchema)]
    struct TitleReply {
        title: String,
    }

    impl LlmResponse for TitleReply {
        fn check(&self) -> Result<(), String> {
            if self.title.trim().is_empty() {
                return Err("title is empty".to_string());
            }
            Ok(())
        }
    }

    #[test]
    fn test_extract_json_string_with_json_code_block() {
        let response = "Here you go:\n\n```json\n{\"title\": \"عنوان\"}\n```\n\nDone.";

        let json = extract_json_string(response).unwrap();
        assert_eq!(json, "{\"title\": \"عنوان\"}");
    }

    #[test]
    fn test_extract_json_string_with_generic_code_block() {
        let response = "```\n{\"title\": \"Test\"}\n```";

        let json = extract_json_string(response).unwrap();
        assert_eq!(json, "{\"title\": \"Test\"}");
    }

    #[test]
    fn test_extract_json_string_embedded() {
        let response = "Sure! {\"title\": \"Test\"} Hope that helps.";

        let json = extract_json_string(response).unwrap();
        assert_eq!(json, r#"{"title": "Test"}"#);
    }

    #[test]
    fn test_extract_json_string_no_json() {
        assert!(extract_json_string("No JSON here at all!").is_err());
        assert!(extract_json_string("} backwards {").is_err());
    }

    #[test]
    fn test_fix_trailing_commas() {
        assert_eq!(
            fix_trailing_commas(r#"{"obj": {"nested": true,},}"#),
            r#"{"obj": {"nested": true}}"#
        );
        assert_eq!(
            fix_trailing_commas(r#"{"items": [1, 2, 3,]}"#),
            r#"{"items": [1, 2, 3]}"#
        );
    }

    #[test]
    fn test_fix_js_string_concatenation() {
        assert_eq!(
            fix_js_string_concatenation(r#"{"msg": "a" + "b"   +   "c"}"#),
            r#"{"msg": "abc"}"#
        );
    }

    #[test]
    fn test_parse_response_plain() {
        let reply: TitleReply = parse_response(r#"{"title": "پرامپت"}"#).unwrap();
        assert_eq!(reply.title, "پرامپت");
    }

    #[test]
    fn test_parse_response_after_quick_fixes() {
        let reply: TitleReply = parse_response(r#"{"title": "Part1" + "Part2",}"#).unwrap();
        assert_eq!(reply.title, "Part1Part2");
    }

    #[test]
    fn test_parse_response_keeps_fence_inside_value() {
        let text = r#"{"title": "خروجی را به صورت ```json\n{\"name\": \"x\"}\n``` برگردان"}"#;

        let reply: TitleReply = parse_response(text).unwrap();
        assert_eq!(
            reply.title,
            "خروجی را به صورت ```json\n{\"name\": \"x\"}\n``` برگردان"
        );
    }

    #[test]
    fn test_parse_response_not_json() {
        let result = parse_response::<TitleReply>("This is not JSON at all");
        assert!(matches!(result, Err(InferenceError::InvalidResponse(_))));
    }

    #[test]
    fn test_parse_response_wrong_shape() {
        let result = parse_response::<TitleReply>(r#"{"answer": 42}"#);
        assert!(matches!(result, Err(InferenceError::InvalidResponse(_))));
    }

    #[test]
    fn test_parse_response_rejects_failed_check() {
        let result = parse_response::<TitleReply>(r#"{"title": "   "}"#);
        match result {
            Err(InferenceError::InvalidResponse(msg)) => assert_eq!(msg, "title is empty"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_json_schema_string_generation() {
        let schema = TitleReply::json_schema_string();
        assert!(schema.contains("\"title\""));
        assert!(schema.contains("\"required\""));
    }
}
