//! Port definitions (hexagonal architecture)
//!
//! Ports define the interfaces for external dependencies. The core domain
//! depends only on these, not on concrete implementations.

mod credentials;
mod graph_api;

pub use credentials::AppCredentials;
pub use graph_api::GraphApi;
