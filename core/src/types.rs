//! Payload DTOs sent by the client.

use serde::{Deserialize, Serialize};

/// The two-field payload used for JSON and form-encoded requests.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RequestBody {
    pub id: String,
    pub name: String,
}

impl RequestBody {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}
