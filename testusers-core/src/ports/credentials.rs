//! Application credentials
//!
//! Test users always belong to an application. Everything needed to address
//! and authenticate as that application is carried in `AppCredentials` and
//! handed to services explicitly, so several apps can be driven side by side.

use crate::domain::result::{Error, Result};

#[derive(Clone, PartialEq, Eq)]
pub struct AppCredentials {
    pub app_id: String,
    pub app_secret: Option<String>,
    /// Explicit app access token; takes precedence over `app_id|app_secret`
    pub access_token: Option<String>,
}

impl AppCredentials {
    pub fn new(app_id: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            app_secret: None,
            access_token: None,
        }
    }

    pub fn with_secret(mut self, secret: impl Into<String>) -> Self {
        self.app_secret = Some(secret.into());
        self
    }

    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Path of the application's test-user collection
    pub fn test_users_path(&self) -> String {
        format!("/{}/accounts/test-users", self.app_id)
    }

    /// App access token used for app-level calls
    pub fn app_token(&self) -> Result<String> {
        if let Some(token) = self.access_token.as_deref().filter(|t| !t.is_empty()) {
            return Ok(token.to_string());
        }

        match self.app_secret.as_deref().filter(|s| !s.is_empty()) {
            Some(secret) => Ok(format!("{}|{}", self.app_id, secret)),
            None => Err(Error::config(format!(
                "no app access token or app secret configured for app {}",
                self.app_id
            ))),
        }
    }
}

impl std::fmt::Debug for AppCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppCredentials")
            .field("app_id", &self.app_id)
            .field("app_secret", &self.app_secret.as_ref().map(|_| "<redacted>"))
            .field("access_token", &self.access_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
