//! Access tokens derived from test users

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::test_user::TestUser;

/// Expiry stamped on every token derived from a test user.
///
/// This is NOT the platform's real token lifetime. Test users come back from
/// the platform without an expiry, so derived tokens are treated as never
/// expiring. Anything that needs the actual expiry must ask the platform
/// for it separately.
pub const FABRICATED_EXPIRY: DateTime<Utc> = DateTime::<Utc>::MAX_UTC;

/// A time-bounded credential for acting as a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken {
    pub user_id: String,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl AccessToken {
    pub fn new(user_id: impl Into<String>, token: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            user_id: user_id.into(),
            token: token.into(),
            expires_at,
        }
    }

    /// Derive a token from a test user, or `None` if the user has no token.
    ///
    /// The expiry is always [`FABRICATED_EXPIRY`].
    pub fn from_test_user(user: &TestUser) -> Option<Self> {
        user.access_token()
            .map(|token| Self::new(user.id.clone(), token, FABRICATED_EXPIRY))
    }

    /// Whether the expiry was fabricated rather than reported by the platform
    pub fn has_fabricated_expiry(&self) -> bool {
        self.expires_at == FABRICATED_EXPIRY
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}
