//! Failure taxonomy shared by every transport and orchestrator.
use serde_json::Value;
use thiserror::Error;

/// Categorized failure of a single request to the game API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("not signed in or credential rejected")]
    Unauthorized,
    #[error("not found: {0}")]
    NotFound(String),
    /// Business-rule rejection; the message is shown to the player verbatim.
    #[error("{0}")]
    Unprocessable(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("unexpected response ({status}): {body}")]
    Unexpected { status: u16, body: String },
    #[error("could not decode response: {0}")]
    Decode(String),
}

impl ApiError {
    #[must_use]
    pub const fn is_business_rule(&self) -> bool {
        matches!(self, Self::Unprocessable(_))
    }

    #[must_use]
    pub const fn is_auth(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Failures the player can retry without changing anything.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Network(_) | Self::Unexpected { .. } | Self::Decode(_)
        )
    }

    /// Text suitable for an on-screen notice.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Unprocessable(msg) => msg.clone(),
            Self::Unauthorized => "Please sign in again.".to_string(),
            Self::NotFound(_) => "That game could not be found.".to_string(),
            Self::Network(_) => "Could not reach the game server.".to_string(),
            Self::Unexpected { .. } | Self::Decode(_) => {
                "The game server returned an unexpected response.".to_string()
            }
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

/// Map a non-2xx status and its raw body to an [`ApiError`].
#[must_use]
pub fn classify_failure(status: u16, body: &str) -> ApiError {
    let message = error_message(body);
    match status {
        401 | 403 => ApiError::Unauthorized,
        404 => ApiError::NotFound(message.unwrap_or_else(|| "resource".to_string())),
        400..=499 => message.map_or_else(
            || ApiError::Unexpected {
                status,
                body: truncate(body),
            },
            ApiError::Unprocessable,
        ),
        _ => ApiError::Unexpected {
            status,
            body: truncate(body),
        },
    }
}

/// Extract a displayable message from an error body.
///
/// Accepts `{"error": "..."}`, `{"detail": "..."}` and field-error maps such as
/// `{"choice_id": ["A valid integer is required."]}`.
#[must_use]
pub fn error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    let obj = value.as_object()?;
    for key in ["error", "detail"] {
        if let Some(text) = obj.get(key).and_then(Value::as_str) {
            return Some(text.to_string());
        }
    }
    obj.iter().find_map(|(field, val)| {
        let first = match val {
            Value::Array(items) => items.first().and_then(Value::as_str),
            Value::String(text) => Some(text.as_str()),
            _ => None,
        }?;
        Some(format!("{field}: {first}"))
    })
}

fn truncate(body: &str) -> String {
    const LIMIT: usize = 200;
    if body.len() <= LIMIT {
        return body.to_string();
    }
    let mut end = LIMIT;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}…", &body[..end])
}

/// Failure of an orchestrated player action.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("another action is still in flight")]
    Busy,
    #[error("no active game session")]
    NoSession,
    #[error("no scenario card on screen")]
    NoCard,
    #[error("{0}")]
    InvalidInput(String),
    #[error("cannot {event} while {from}")]
    InvalidTransition { from: String, event: String },
    #[error("response arrived after the game context changed")]
    Stale,
}

impl ClientError {
    #[must_use]
    pub const fn api(&self) -> Option<&ApiError> {
        match self {
            Self::Api(err) => Some(err),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_map_to_categories() {
        assert_eq!(classify_failure(401, ""), ApiError::Unauthorized);
        assert_eq!(classify_failure(403, "{}"), ApiError::Unauthorized);
        assert_eq!(
            classify_failure(404, r#"{"error": "Session not found."}"#),
            ApiError::NotFound("Session not found.".to_string())
        );
        assert_eq!(
            classify_failure(400, r#"{"error": "Insufficient funds."}"#),
            ApiError::Unprocessable("Insufficient funds.".to_string())
        );
        assert!(matches!(
            classify_failure(500, r#"{"error": "Internal Server Error"}"#),
            ApiError::Unexpected { status: 500, .. }
        ));
        assert!(matches!(
            classify_failure(400, "<html>bad gateway</html>"),
            ApiError::Unexpected { status: 400, .. }
        ));
    }

    #[test]
    fn field_errors_flatten_to_one_message() {
        let body = r#"{"choice_id": ["A valid integer is required."]}"#;
        assert_eq!(
            error_message(body),
            Some("choice_id: A valid integer is required.".to_string())
        );
        assert_eq!(
            error_message(r#"{"detail": "Authentication credentials were not provided."}"#),
            Some("Authentication credentials were not provided.".to_string())
        );
        assert_eq!(error_message("[1, 2]"), None);
    }

    #[test]
    fn long_bodies_are_truncated_on_char_boundary() {
        let body = "₹".repeat(150);
        let ApiError::Unexpected { body: kept, .. } = classify_failure(502, &body) else {
            panic!("expected unexpected");
        };
        assert!(kept.ends_with('…'));
        assert!(kept.len() < body.len());
    }

    #[test]
    fn predicates_follow_policy() {
        assert!(ApiError::Unprocessable("x".into()).is_business_rule());
        assert!(ApiError::Network("timeout".into()).is_retryable());
        assert!(!ApiError::Unauthorized.is_retryable());
        assert!(ApiError::NotFound("s".into()).is_not_found());
        assert_eq!(
            ApiError::Unprocessable("No lifelines remaining!".into()).user_message(),
            "No lifelines remaining!"
        );
    }
}
