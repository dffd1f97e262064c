//! testusers core - provisioning and wiring up social-graph test users
//!
//! This crate follows a hexagonal layout:
//!
//! - **domain**: Core values (TestUser, CreateTestUserRequest, AccessToken, errors)
//! - **ports**: Interfaces to the outside world (GraphApi, AppCredentials)
//! - **services**: Orchestration (test user lifecycle, friend connections, paging)
//! - **adapters**: Concrete implementations (reqwest Graph API client)

pub mod adapters;
pub mod config;
pub mod decode;
pub mod domain;
pub mod ports;
pub mod services;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};

use adapters::graph::GraphClient;
use config::Config;
use services::*;

// Re-export commonly used types at crate root
pub use domain::result::{Argument, Error, FriendPhase, Result as CoreResult};
pub use domain::{
    AccessToken, CreateTestUserRequest, Installation, TestUser, UpdateTestUser, FABRICATED_EXPIRY,
};
pub use ports::{AppCredentials, GraphApi};

/// Main context for test user operations
///
/// Holds the configuration, the application's credentials and the services,
/// all sharing one Graph API transport. Nothing here is global, so several
/// contexts (for different apps or fake transports) can live side by side.
pub struct TestUsersContext {
    pub config: Config,
    pub credentials: AppCredentials,
    pub test_user_service: TestUserService,
    pub friend_service: FriendService,
}

impl TestUsersContext {
    /// Create a context from the settings in `dir`, talking to the real Graph API
    pub fn new(dir: &Path) -> Result<Self> {
        let config = Config::load(dir)?;
        let client = GraphClient::from_config(&config).context("Failed to create Graph API client")?;
        Self::with_api(config, Arc::new(client))
    }

    /// Create a context around any Graph API transport
    pub fn with_api(config: Config, api: Arc<dyn GraphApi>) -> Result<Self> {
        let credentials = config.credentials()?;

        let test_user_service = TestUserService::new(Arc::clone(&api), credentials.clone())
            .with_page_size(config.page_size);
        let friend_service = FriendService::new(api);

        Ok(Self {
            config,
            credentials,
            test_user_service,
            friend_service,
        })
    }

    /// App access token for app-level calls
    pub fn app_token(&self) -> CoreResult<String> {
        self.credentials.app_token()
    }

    pub fn create_test_user(&self, request: &CreateTestUserRequest) -> CoreResult<TestUser> {
        self.test_user_service.create(request, &self.app_token()?)
    }

    pub fn get_test_users(&self) -> CoreResult<Paged<TestUser>> {
        Ok(self.test_user_service.list(&self.app_token()?))
    }

    pub fn find_test_user(&self, user_id: &str) -> CoreResult<Option<TestUser>> {
        self.test_user_service.find(user_id, &self.app_token()?)
    }

    pub fn remove_test_user(&self, user: &TestUser) -> CoreResult<bool> {
        self.test_user_service.remove(user, &self.app_token()?)
    }

    pub fn disassociate_test_user(&self, user: &TestUser) -> CoreResult<bool> {
        self.test_user_service.disassociate(user, &self.app_token()?)
    }

    pub fn update_test_user(&self, user: &TestUser, changes: &UpdateTestUser) -> CoreResult<bool> {
        self.test_user_service.update(user, changes, &self.app_token()?)
    }

    pub fn make_friend_connection(&self, first: &TestUser, second: &TestUser) -> CoreResult<()> {
        self.friend_service.connect(first, second)
    }

    /// See [`AccessToken::from_test_user`]; the expiry is fabricated.
    pub fn to_access_token(&self, user: &TestUser) -> Option<AccessToken> {
        AccessToken::from_test_user(user)
    }
}
