use serde::Deserialize;

/// Failure of a backend call, normalized at the client boundary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// Transport failure: connect refused, DNS, timeout, broken body stream.
    #[error("network error: {message}")]
    Network { message: String },
    /// Non-success status with whatever the body carried.
    #[error("http status {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Http {
        status: u16,
        message: Option<String>,
        details: Vec<String>,
    },
    /// Body was not the JSON shape this endpoint promises.
    #[error("malformed response: {message}")]
    Malformed { message: String },
    /// Missing token locally, or the server rejected it.
    #[error("unauthorized: {message}")]
    Unauthorized { message: String },
}

impl ApiError {
    pub(crate) fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed {
            message: message.into(),
        }
    }

    pub(crate) fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    /// Server-provided message when there is one, otherwise `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Http {
                message: Some(message),
                ..
            } => message.clone(),
            ApiError::Unauthorized { message } => message.clone(),
            _ => fallback.to_string(),
        }
    }

    /// Per-field validation messages returned by the server, if any.
    pub fn details(&self) -> &[String] {
        match self {
            ApiError::Http { details, .. } => details,
            _ => &[],
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
    details: Option<serde_json::Value>,
}

/// Builds the error for a non-success status from the raw body.
pub(crate) fn error_from_status(status: u16, body: &[u8]) -> ApiError {
    let parsed: ErrorBody = serde_json::from_slice(body).unwrap_or_default();
    let message = parsed
        .message
        .or(parsed.error)
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty());
    let details = match parsed.details {
        Some(serde_json::Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                serde_json::Value::String(text) => Some(text),
                serde_json::Value::Object(map) => map
                    .get("message")
                    .and_then(|m| m.as_str())
                    .map(ToOwned::to_owned),
                _ => None,
            })
            .collect(),
        Some(serde_json::Value::String(text)) => vec![text],
        _ => Vec::new(),
    };

    if status == 401 || status == 403 {
        return ApiError::unauthorized(message.unwrap_or_else(|| "Session expired".to_string()));
    }
    ApiError::Http {
        status,
        message,
        details,
    }
}

pub(crate) fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_decode() {
        return ApiError::malformed(err.to_string());
    }
    ApiError::network(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_is_preferred_over_error() {
        let err = error_from_status(400, br#"{"error":"bad","message":"Title taken"}"#);
        assert_eq!(err.user_message("fallback"), "Title taken");

        let err = error_from_status(500, br#"{"error":"Database down"}"#);
        assert_eq!(err.user_message("fallback"), "Database down");
    }

    #[test]
    fn details_accept_strings_and_objects() {
        let err = error_from_status(
            422,
            br#"{"message":"Validation failed","details":["Slug taken",{"message":"Title too long"}]}"#,
        );
        assert_eq!(err.details(), ["Slug taken", "Title too long"]);
    }

    #[test]
    fn non_json_body_falls_back() {
        let err = error_from_status(502, b"<html>Bad gateway</html>");
        assert_eq!(
            err,
            ApiError::Http {
                status: 502,
                message: None,
                details: Vec::new(),
            }
        );
        assert_eq!(err.user_message("Failed to load magazine"), "Failed to load magazine");
    }

    #[test]
    fn rejected_token_is_unauthorized() {
        let err = error_from_status(401, b"");
        assert!(err.is_unauthorized());
        assert_eq!(err.user_message("x"), "Session expired");
    }
}
