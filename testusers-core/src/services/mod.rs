//! Service layer - business logic orchestration
//!
//! Services coordinate domain logic and port interactions. Each service
//! focuses on a specific use case.

mod friend;
mod paging;
mod test_user;

pub use friend::FriendService;
pub use paging::Paged;
pub use test_user::TestUserService;
