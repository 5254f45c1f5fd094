use http::StatusCode;

/// Extract the most useful error text from a failed upstream response
///
/// Probes, in order: a structured `error.message` field, a structured
/// `error` field, a structured `message` field, the raw response body,
/// then the HTTP status phrase.
pub fn error_text(status: StatusCode, body: &str) -> String {
    if let Ok(json) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(message) = json
            .get("error")
            .and_then(|e| e.get("message"))
            .and_then(serde_json::Value::as_str)
        {
            return message.to_owned();
        }

        if let Some(error) = json.get("error").and_then(serde_json::Value::as_str) {
            return error.to_owned();
        }

        if let Some(message) = json.get("message").and_then(serde_json::Value::as_str) {
            return message.to_owned();
        }
    }

    let trimmed = body.trim();
    if !trimmed.is_empty() {
        return trimmed.to_owned();
    }

    status.canonical_reason().unwrap_or("upstream request failed").to_owned()
}
