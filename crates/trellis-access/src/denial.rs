use serde_json::json;
use std::time::Duration;
use trellis_core::{ConstraintKind, Error};

/// A structured refusal, ready to be returned by an HTTP layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Denial {
    status: u16,
    body: serde_json::Value,
}

impl Denial {
    fn new(status: u16, code: &str, message: impl Into<String>) -> Denial {
        Denial {
            status,
            body: json!({ "error": { "code": code, "message": message.into() } }),
        }
    }

    /// Malformed request
    pub fn bad_request(message: impl Into<String>) -> Denial {
        Denial::new(400, "BAD_REQUEST", message)
    }

    /// No session
    pub fn unauthorized() -> Denial {
        Denial::new(401, "UNAUTHORIZED", "authentication required")
    }

    pub fn forbidden(message: impl Into<String>) -> Denial {
        Denial::new(403, "FORBIDDEN", message)
    }

    /// The one response for both a missing record and a record the
    /// principal may not see. Both paths go through here so the bodies are
    /// byte-identical.
    pub fn not_found() -> Denial {
        Denial::new(404, "NOT_FOUND", "record not found")
    }

    pub fn conflict(message: impl Into<String>) -> Denial {
        Denial::new(409, "CONFLICT", message)
    }

    pub fn rate_limited(retry_after: Duration) -> Denial {
        let mut denial = Denial::new(429, "RATE_LIMITED", "rate limit exceeded");
        denial.body["error"]["retryAfter"] = json!(retry_after.as_secs());
        denial
    }

    /// Maps an error raised while serving a request to the response for it.
    pub fn from_error(err: &Error) -> Denial {
        if let Some(retry_after) = err.retry_after() {
            return Denial::rate_limited(retry_after);
        }

        if err.is_permission_denied() {
            return Denial::forbidden(err.to_string());
        }

        match err.constraint_kind() {
            Some(ConstraintKind::Unique) => Denial::conflict(err.to_string()),
            Some(ConstraintKind::NotNull | ConstraintKind::Check) => {
                Denial::bad_request(err.to_string())
            }
            Some(ConstraintKind::ForeignKey) => Denial::conflict(err.to_string()),
            None if err.is_schema_validation() => Denial::bad_request(err.to_string()),
            None => Denial::new(500, "INTERNAL", "internal error"),
        }
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn body(&self) -> &serde_json::Value {
        &self.body
    }

    pub fn message(&self) -> &str {
        self.body["error"]["message"].as_str().unwrap_or_default()
    }

    /// Whether this is the masked not-found response.
    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }

    /// The serialized body.
    pub fn to_json(&self) -> String {
        self.body.to_string()
    }

    /// Prefixes the message with where in a request the denial arose.
    /// Not-found denials are returned unchanged.
    pub(crate) fn within(mut self, context: impl std::fmt::Display) -> Denial {
        if self.is_not_found() {
            return self;
        }

        let message = format!("{context}: {}", self.message());
        self.body["error"]["message"] = json!(message);
        self
    }

    pub fn into_error(self) -> Error {
        match self.status {
            429 => Error::rate_limited(Duration::from_secs(
                self.body["error"]["retryAfter"].as_u64().unwrap_or_default(),
            )),
            _ => Error::permission_denied(self.message()),
        }
    }
}

impl std::fmt::Display for Denial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.status, self.message())
    }
}

impl std::error::Error for Denial {}
