//! Core domain entities
//!
//! Pure data structures with validation logic - no I/O or external dependencies.

mod access_token;
mod create_request;
pub mod request;
pub mod result;
mod test_user;

pub use access_token::{AccessToken, FABRICATED_EXPIRY};
pub use create_request::{CreateTestUserRequest, Installation, UpdateTestUser};
pub use request::{GraphRequest, Method, Param, ParamValue};
pub use test_user::TestUser;
