//! Friend service - two-step friend connection between test users
//!
//! A connection is a request sent by the first user followed by an accept
//! sent by the second, each authenticated with that user's own token. Both
//! steps always run once the token checks pass; their outcomes are only
//! inspected afterwards. A failed accept leaves a pending request behind and
//! cleaning it up is the caller's job.

use std::sync::Arc;

use tracing::{info, warn};

use crate::decode;
use crate::domain::result::{Argument, Error, FriendPhase, Result};
use crate::domain::{GraphRequest, TestUser};
use crate::ports::GraphApi;

/// Friend service
pub struct FriendService {
    api: Arc<dyn GraphApi>,
}

impl FriendService {
    pub fn new(api: Arc<dyn GraphApi>) -> Self {
        Self { api }
    }

    /// Make `first` and `second` friends
    ///
    /// # Errors
    /// * `Error::MissingAccessToken` - either user has no token; nothing is sent
    /// * `Error::Friendship` - the request or the accept step reported failure
    /// * transport errors from either step, unchanged
    pub fn connect(&self, first: &TestUser, second: &TestUser) -> Result<()> {
        let first_token = first.access_token().ok_or_else(|| Error::MissingAccessToken {
            argument: Argument::First,
            user_id: first.id.clone(),
        })?;
        let second_token = second.access_token().ok_or_else(|| Error::MissingAccessToken {
            argument: Argument::Second,
            user_id: second.id.clone(),
        })?;

        let requested = self.befriend(first, first_token, second)?;
        let accepted = self.befriend(second, second_token, first)?;

        if !requested {
            warn!(from = %first.id, to = %second.id, "friend request was not made");
            return Err(Error::Friendship {
                phase: FriendPhase::Request,
                from: first.id.clone(),
                to: second.id.clone(),
            });
        }
        if !accepted {
            warn!(from = %second.id, to = %first.id, "friend request was not accepted");
            return Err(Error::Friendship {
                phase: FriendPhase::Accept,
                from: second.id.clone(),
                to: first.id.clone(),
            });
        }

        info!(first = %first.id, second = %second.id, "connected test users as friends");
        Ok(())
    }

    fn befriend(&self, from: &TestUser, token: &str, to: &TestUser) -> Result<bool> {
        let call = GraphRequest::post(format!("/{}/friends/{}", from.id, to.id)).with_token(token);
        Ok(decode::success_flag(&self.api.execute(&call)?))
    }
}
