//! Structured JSON responses over the plain-text call surface.
//!
//! None of the registered providers gets native schema enforcement here;
//! instead the schema is serialized into the prompt as an instruction, and
//! the reply is stripped of fences and surrounding prose, parsed, and
//! validated against the schema before it reaches the caller.

use crate::error::{Error, Result};
use crate::llm::providers::Provider;

/// Append a JSON-output instruction carrying the serialized schema.
pub fn json_prompt(prompt: &str, schema: &serde_json::Value) -> String {
    let rendered = serde_json::to_string_pretty(schema).unwrap_or_else(|_| schema.to_string());
    format!(
        "{prompt}\n\nPlease respond with a valid JSON object matching this schema: {rendered}\n\
         Respond with only the JSON object, no additional text."
    )
}

/// Locate the JSON payload inside a model reply.
///
/// Handles leading `<think>` blocks, markdown code fences, and prose around
/// the payload. Returns the balanced object or array slice, or `None` when
/// the reply contains no opening brace or bracket.
pub fn extract_json(text: &str) -> Option<&str> {
    let mut candidate = text.trim();

    // Reasoning models sometimes emit their scratchpad first.
    if let Some(end) = candidate.find("</think>") {
        candidate = candidate[end + "</think>".len()..].trim();
    }

    // Prefer a fenced block when present.
    if let Some(fence) = candidate.find("```") {
        let after = &candidate[fence + 3..];
        let after = after.strip_prefix("json").unwrap_or(after);
        if let Some(end) = after.find("```") {
            candidate = after[..end].trim();
        }
    }

    let start = candidate.find(['{', '['])?;
    let candidate = &candidate[start..];

    // Scan to the matching close, skipping braces inside string literals.
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    for (i, ch) in candidate.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' if in_string => escaped = true,
            '"' => in_string = !in_string,
            '{' | '[' if !in_string => depth += 1,
            '}' | ']' if !in_string => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(&candidate[..i + ch.len_utf8()]);
                }
            }
            _ => {}
        }
    }
    Some(candidate)
}

/// Parse a reply's JSON payload and validate it against the schema.
pub(crate) fn parse_validated(
    provider: Provider,
    reply: &str,
    schema: &serde_json::Value,
) -> Result<serde_json::Value> {
    let json_text = extract_json(reply).ok_or_else(|| {
        Error::provider(
            provider,
            format!("no JSON found in response: {}", snippet(reply)),
        )
    })?;
    let value: serde_json::Value = serde_json::from_str(json_text).map_err(|e| {
        Error::provider(
            provider,
            format!(
                "failed to parse JSON from response: {e}; response text: {}",
                snippet(reply)
            ),
        )
    })?;

    let validator = jsonschema::validator_for(schema)
        .map_err(|e| Error::Configuration(format!("invalid response schema: {e}")))?;
    if let Err(violation) = validator.validate(&value) {
        return Err(Error::provider(
            provider,
            format!("response does not match the requested schema: {violation}"),
        ));
    }
    Ok(value)
}

fn snippet(text: &str) -> String {
    text.chars().take(200).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "dish": {"type": "string"},
                "pieces": {"type": "integer"},
            },
            "required": ["dish", "pieces"],
        })
    }

    #[test]
    fn json_prompt_embeds_schema_and_instruction() {
        let enhanced = json_prompt("Pick a dish.", &schema());
        assert!(enhanced.starts_with("Pick a dish."));
        assert!(enhanced.contains("valid JSON object matching this schema"));
        assert!(enhanced.contains("\"pieces\""));
    }

    #[test]
    fn extract_handles_fences_prose_and_reasoning_tags() {
        assert_eq!(
            extract_json("```json\n{\"a\": 1}\n```"),
            Some("{\"a\": 1}")
        );
        assert_eq!(
            extract_json("Sure, here it is: {\"a\": {\"b\": 2}} hope that helps"),
            Some("{\"a\": {\"b\": 2}}")
        );
        assert_eq!(
            extract_json("<think>braces like { here }</think>[1, 2, 3]"),
            Some("[1, 2, 3]")
        );
        assert_eq!(extract_json("no payload here"), None);
    }

    #[test]
    fn extract_ignores_braces_inside_string_literals() {
        assert_eq!(
            extract_json(r#"{"note": "closing } inside"} trailing"#),
            Some(r#"{"note": "closing } inside"}"#)
        );
    }

    #[test]
    fn validated_parse_accepts_matching_payloads() {
        let value = parse_validated(
            Provider::Together,
            "```json\n{\"dish\": \"har gow\", \"pieces\": 4}\n```",
            &schema(),
        )
        .unwrap();
        assert_eq!(value["dish"], "har gow");
    }

    #[test]
    fn validated_parse_rejects_schema_violations() {
        let err = parse_validated(
            Provider::Together,
            r#"{"dish": 7, "pieces": "many"}"#,
            &schema(),
        )
        .unwrap_err();
        match err {
            Error::Provider { message, .. } => assert!(message.contains("schema")),
            other => panic!("expected Provider error, got {other}"),
        }
    }
}
