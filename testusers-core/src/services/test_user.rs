//! Test user service - create, list, update and delete test users
//!
//! Every operation is a single request/decode round trip scoped under the
//! owning application. Boolean outcomes come back as `Ok(false)`, never as
//! errors: a user that could not be removed is a normal result.

use std::sync::Arc;

use tracing::{debug, info};

use crate::decode;
use crate::domain::result::Result;
use crate::domain::{CreateTestUserRequest, GraphRequest, Param, TestUser, UpdateTestUser};
use crate::ports::{AppCredentials, GraphApi};
use crate::services::Paged;

/// Test user service
pub struct TestUserService {
    api: Arc<dyn GraphApi>,
    app: AppCredentials,
    page_size: Option<u32>,
}

impl TestUserService {
    pub fn new(api: Arc<dyn GraphApi>, app: AppCredentials) -> Self {
        Self {
            api,
            app,
            page_size: None,
        }
    }

    /// Request pages of `size` users when listing
    pub fn with_page_size(mut self, size: Option<u32>) -> Self {
        self.page_size = size.filter(|s| *s > 0);
        self
    }

    pub fn app(&self) -> &AppCredentials {
        &self.app
    }

    /// Provision a new test user
    ///
    /// Fails with a transport error, or a decode error when the platform does
    /// not answer with a user object.
    pub fn create(&self, request: &CreateTestUserRequest, app_token: &str) -> Result<TestUser> {
        let call = GraphRequest::post(self.app.test_users_path())
            .with_params(request.to_params())
            .with_token(app_token);

        let body = self.api.execute(&call)?;
        let user: TestUser = decode::entity(&body)?;

        info!(app_id = %self.app.app_id, user_id = %user.id, "created test user");
        Ok(user)
    }

    /// List the application's test users, one page at a time
    pub fn list(&self, app_token: &str) -> Paged<TestUser> {
        let mut call = GraphRequest::get(self.app.test_users_path()).with_token(app_token);
        if let Some(size) = self.page_size {
            call.set_param(Param::text("limit", size.to_string()));
        }
        Paged::new(Arc::clone(&self.api), call)
    }

    /// Find a test user by id by walking the listing
    pub fn find(&self, user_id: &str, app_token: &str) -> Result<Option<TestUser>> {
        for user in self.list(app_token) {
            let user = user?;
            if user.id == user_id {
                return Ok(Some(user));
            }
        }
        debug!(user_id, "test user not found in listing");
        Ok(None)
    }

    /// Delete the test user's account
    pub fn remove(&self, user: &TestUser, app_token: &str) -> Result<bool> {
        let call = GraphRequest::delete(format!("/{}", user.id)).with_token(app_token);
        let removed = decode::success_flag(&self.api.execute(&call)?);

        if removed {
            info!(user_id = %user.id, "removed test user");
        } else {
            debug!(user_id = %user.id, "test user was not removed");
        }
        Ok(removed)
    }

    /// Detach the test user from the application without deleting the account
    pub fn disassociate(&self, user: &TestUser, app_token: &str) -> Result<bool> {
        let call = GraphRequest::delete(self.app.test_users_path())
            .with_param(Param::text("uid", user.id.clone()))
            .with_token(app_token);
        let detached = decode::success_flag(&self.api.execute(&call)?);

        if detached {
            info!(app_id = %self.app.app_id, user_id = %user.id, "disassociated test user");
        } else {
            debug!(user_id = %user.id, "test user was not disassociated");
        }
        Ok(detached)
    }

    /// Change a test user's name and/or password
    pub fn update(&self, user: &TestUser, changes: &UpdateTestUser, app_token: &str) -> Result<bool> {
        let call = GraphRequest::post(format!("/{}", user.id))
            .with_params(changes.to_params()?)
            .with_token(app_token);
        let updated = decode::success_flag(&self.api.execute(&call)?);

        if updated {
            info!(user_id = %user.id, "updated test user");
        }
        Ok(updated)
    }
}
