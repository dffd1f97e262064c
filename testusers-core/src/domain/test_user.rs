//! Test user domain model

use serde::{Deserialize, Serialize};

/// A platform-managed ephemeral account
///
/// Values are decoded from creation or listing responses and never mutated
/// locally. After the remote account is deleted the value is simply stale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestUser {
    pub id: String,
    /// Present only when the user was created with the app installed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub login_url: Option<String>,
    /// Only returned by the creation call
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Only returned by the creation call
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl TestUser {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            access_token: None,
            login_url: None,
            email: None,
            password: None,
        }
    }

    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    pub fn has_access_token(&self) -> bool {
        self.access_token.is_some()
    }
}
