use serde::{Deserialize, Serialize};

/// Standard response wrapper: `{ success?, message?, data?, errors? }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: Option<bool>,
    pub message: Option<String>,
    pub data: Option<T>,
    pub errors: Option<serde_json::Value>,
}

impl<T> ApiEnvelope<T> {
    pub fn into_data(self) -> Option<T> {
        self.data
    }

    /// Human-readable failure text: `message` first, then `errors`.
    pub fn error_message(&self) -> Option<String> {
        if let Some(message) = self.message.as_deref()
            && !message.trim().is_empty()
        {
            return Some(message.to_string());
        }
        self.errors.as_ref().and_then(flatten_errors)
    }
}

/// Extract a failure message from an arbitrary error body.
pub fn error_message_from_body(body: &serde_json::Value) -> Option<String> {
    if let Some(message) = body.get("message").and_then(|m| m.as_str())
        && !message.trim().is_empty()
    {
        return Some(message.to_string());
    }
    body.get("errors").and_then(flatten_errors)
}

fn flatten_errors(errors: &serde_json::Value) -> Option<String> {
    use serde_json::Value;

    let text = match errors {
        Value::Null => return None,
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join("; "),
        Value::Object(fields) => fields
            .iter()
            .map(|(field, msg)| match msg {
                Value::String(s) => format!("{}: {}", field, s),
                other => format!("{}: {}", field, other),
            })
            .collect::<Vec<_>>()
            .join("; "),
        other => other.to_string(),
    };

    if text.is_empty() { None } else { Some(text) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelope_with_data() {
        let envelope: ApiEnvelope<u64> =
            serde_json::from_value(json!({"success": true, "data": 4})).unwrap();
        assert_eq!(envelope.into_data(), Some(4));
    }

    #[test]
    fn test_message_takes_precedence() {
        let body = json!({"message": "Email already exists", "errors": {"email": "taken"}});
        assert_eq!(
            error_message_from_body(&body).as_deref(),
            Some("Email already exists")
        );
    }

    #[test]
    fn test_errors_object_flattened() {
        let body = json!({"errors": {"email": "invalid", "phoneNumber": "required"}});
        assert_eq!(
            error_message_from_body(&body).as_deref(),
            Some("email: invalid; phoneNumber: required")
        );
        assert_eq!(error_message_from_body(&json!({})), None);
    }
}
