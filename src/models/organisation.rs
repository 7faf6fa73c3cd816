//! Organisation model.

use serde::{Deserialize, Serialize};

/// An organisation on the Pluvo platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Organisation {
    /// Server-assigned identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    /// Organisation name.
    pub name: String,
}

impl Organisation {
    /// Create a new, unstored organisation with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
        }
    }
}
