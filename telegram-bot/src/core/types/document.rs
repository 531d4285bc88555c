//! File attachment reference.

use serde::{Deserialize, Serialize};

/// A document attached to a message. Only the reference is kept; bytes are fetched on demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub file_id: String,
    pub file_name: Option<String>,
    pub mime_type: Option<String>,
    pub file_size: u32,
}
