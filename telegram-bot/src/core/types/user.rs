//! User identity type for core messages.

use serde::{Deserialize, Serialize};

/// User identity (id, handle, names, automated-account flag).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub is_bot: bool,
}

impl User {
    /// Best-effort display name for logs: `@handle (First)`, the first name, or `unknown`.
    pub fn display_name(&self) -> String {
        match (&self.username, &self.first_name) {
            (Some(username), Some(first)) => format!("@{} ({})", username, first),
            (Some(username), None) => format!("@{}", username),
            (None, Some(first)) => first.clone(),
            (None, None) => "unknown".to_string(),
        }
    }
}
