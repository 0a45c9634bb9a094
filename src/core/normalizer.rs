use crate::domain::model::ReviewOutcome;
use serde_json::Value;

pub const NO_VALID_RESULT: &str = "未能获取有效评审结果";
pub const UNKNOWN_ERROR: &str = "未知错误";
pub const DEFAULT_BLOCK_REASON: &str = "内容安全性审查";

/// Map a raw `generateContent` body onto a single outcome.
///
/// First match wins: parse failure, first candidate text, `error` object,
/// `promptFeedback`, then a generic API error. Fields of an unexpected type
/// are skipped rather than failing the decode; only a candidate whose
/// `content` lacks `parts` or `text` counts as malformed.
pub fn normalize(raw_body: &str) -> ReviewOutcome {
    let response: Value = match serde_json::from_str(raw_body) {
        Ok(response) => response,
        Err(e) => return parse_error(e.to_string()),
    };

    match first_candidate_text(&response) {
        Ok(Some(text)) => return ReviewOutcome::Success { text },
        Ok(None) => {}
        Err(message) => return parse_error(message),
    }

    if let Some(error) = response.get("error") {
        let details = error
            .get("message")
            .and_then(field_text)
            .unwrap_or_else(|| UNKNOWN_ERROR.to_string());
        return ReviewOutcome::ApiError {
            message: format!("{} - {}", NO_VALID_RESULT, details),
        };
    }

    if let Some(feedback) = response.get("promptFeedback") {
        return ReviewOutcome::Blocked {
            reason: feedback
                .get("blockReason")
                .and_then(field_text)
                .unwrap_or_else(|| DEFAULT_BLOCK_REASON.to_string()),
        };
    }

    ReviewOutcome::ApiError {
        message: NO_VALID_RESULT.to_string(),
    }
}

fn parse_error(message: String) -> ReviewOutcome {
    tracing::warn!("Failed to decode generateContent response: {}", message);
    ReviewOutcome::ParseError { message }
}

/// `Ok(None)` when there is no usable candidate and the next check applies.
fn first_candidate_text(response: &Value) -> Result<Option<String>, String> {
    let Some(candidate) = response
        .get("candidates")
        .and_then(Value::as_array)
        .and_then(|candidates| candidates.first())
    else {
        return Ok(None);
    };

    let Some(content) = candidate.get("content").filter(|c| !c.is_null()) else {
        return Ok(None);
    };

    let parts = content
        .get("parts")
        .and_then(Value::as_array)
        .ok_or_else(|| "candidate content has no parts array".to_string())?;

    match parts.first() {
        None => Ok(None),
        Some(part) => part
            .get("text")
            .and_then(Value::as_str)
            .map(|text| Some(text.to_string()))
            .ok_or_else(|| "first candidate part has no text".to_string()),
    }
}

/// Strings as-is, other scalars in their JSON form; `null` counts as absent.
fn field_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}
