use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The `{"error": {...}}` envelope Google APIs return on failure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    /// The error body.
    pub error: ErrorBody,
}

/// Body of an [`ErrorResponse`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ErrorBody {
    /// HTTP status code repeated in the body.
    #[serde(default)]
    pub code: Option<u16>,

    /// Human-readable message.
    #[serde(default)]
    pub message: Option<String>,

    /// Canonical status name, e.g. `RESOURCE_EXHAUSTED`.
    #[serde(default)]
    pub status: Option<String>,

    /// Typed detail objects, e.g. `google.rpc.RetryInfo`.
    #[serde(default)]
    pub details: Vec<Value>,
}

impl ErrorBody {
    /// Compact JSON of `details`, or `None` when there are none.
    pub fn details_json(&self) -> Option<String> {
        if self.details.is_empty() {
            None
        } else {
            serde_json::to_string(&self.details).ok()
        }
    }
}
