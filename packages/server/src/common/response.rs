use serde::{Deserialize, Serialize};

/// JSON wrapper used for every response except a successful read.
///
/// Serializes as `{"status": "success"|"error", "message": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Envelope {
    Success { message: String },
    Error { message: String },
}

impl Envelope {
    pub fn success(message: impl Into<String>) -> Self {
        Self::Success {
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }
}
