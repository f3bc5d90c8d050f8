use serde::{Deserialize, Serialize};

/// Response shape the invoking host expects: `{"statusCode": .., "body": ..}`.
///
/// Produced exactly once per invocation. A `200` means every update request
/// was accepted by the control plane; any `500` means zero or more services
/// were updated before the failure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InvocationResult {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: String,
}

impl InvocationResult {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status_code: 200,
            body: body.into(),
        }
    }

    pub fn server_error(body: impl Into<String>) -> Self {
        Self {
            status_code: 500,
            body: body.into(),
        }
    }
}

/// Failure reported by the control-plane seam for a single update request.
///
/// The kind selects the response wording; the message carries the underlying
/// error text verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateError {
    pub kind: UpdateErrorKind,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateErrorKind {
    /// The control plane itself rejected the request (unknown service,
    /// unknown cluster, throttling).
    Api,
    /// Any other failure: dispatch, timeout, response decoding.
    Unexpected,
}

impl UpdateError {
    pub fn api(message: impl Into<String>) -> Self {
        Self {
            kind: UpdateErrorKind::Api,
            message: message.into(),
        }
    }

    pub fn unexpected(message: impl Into<String>) -> Self {
        Self {
            kind: UpdateErrorKind::Unexpected,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for UpdateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for UpdateError {}
