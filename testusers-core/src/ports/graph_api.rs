//! Graph API transport port
//!
//! Defines the interface for issuing a single authenticated call against the
//! platform and getting the raw response body back.

use crate::domain::result::Result;
use crate::domain::GraphRequest;

/// Graph API transport trait
///
/// One blocking call per invocation. Implementations own their connection
/// handling, timeouts and status-code policy; callers never retry.
pub trait GraphApi: Send + Sync {
    /// Execute a request and return the raw response body
    ///
    /// # Errors
    /// * `Error::Transport` - the call never produced a response
    /// * `Error::Api` - the platform answered with a non-success status
    fn execute(&self, request: &GraphRequest) -> Result<String>;
}
