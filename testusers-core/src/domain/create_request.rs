//! Test user provisioning requests

use super::request::Param;
use super::result::{Error, Result};

/// Whether a new test user has the app installed
///
/// `PlatformDefault` sends neither `installed` nor `permissions`, leaving the
/// platform's own default in effect. That default is believed to behave like
/// `Installed` with no permissions, but the platform does not document it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Installation {
    NotInstalled,
    Installed { permissions: Vec<String> },
    #[default]
    PlatformDefault,
}

/// How a new test user should be provisioned
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateTestUserRequest {
    pub installation: Installation,
    pub name: Option<String>,
    pub locale: Option<String>,
}

impl CreateTestUserRequest {
    /// Request with the app installed and the given permissions granted
    pub fn installed<I, S>(permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            installation: Installation::Installed {
                permissions: permissions.into_iter().map(Into::into).collect(),
            },
            ..Default::default()
        }
    }

    pub fn not_installed() -> Self {
        Self {
            installation: Installation::NotInstalled,
            ..Default::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    /// Encode as creation parameters
    pub fn to_params(&self) -> Vec<Param> {
        let mut params = Vec::new();

        match &self.installation {
            Installation::NotInstalled => {
                params.push(Param::bool("installed", false));
            }
            Installation::Installed { permissions } => {
                params.push(Param::bool("installed", true));
                if !permissions.is_empty() {
                    params.push(Param::list("permissions", permissions.iter().cloned()));
                }
            }
            Installation::PlatformDefault => {}
        }

        if let Some(name) = &self.name {
            params.push(Param::text("name", name.clone()));
        }
        if let Some(locale) = &self.locale {
            params.push(Param::text("locale", locale.clone()));
        }

        params
    }
}

/// Changes to apply to an existing test user
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateTestUser {
    pub name: Option<String>,
    pub password: Option<String>,
}

impl UpdateTestUser {
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Encode as update parameters; at least one field must be set
    pub fn to_params(&self) -> Result<Vec<Param>> {
        let mut params = Vec::new();
        if let Some(name) = &self.name {
            params.push(Param::text("name", name.clone()));
        }
        if let Some(password) = &self.password {
            params.push(Param::text("password", password.clone()));
        }

        if params.is_empty() {
            return Err(Error::validation(
                "a test user update needs a new name or a new password",
            ));
        }
        Ok(params)
    }
}
