//! One-shot notices attached to responses

use serde::{Deserialize, Serialize};

/// A success or error notice meant to be shown once and discarded
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    #[serde(default)]
    pub success: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: Some(message.into()),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: None,
            error: Some(message.into()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.success.is_none() && self.error.is_none()
    }
}
