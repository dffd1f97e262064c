//! Adapter implementations
//!
//! Adapters implement the port traits with concrete technologies:
//! - Blocking reqwest client for the GraphApi port
//! - In-process mock Graph API server for testing

pub mod graph;

#[cfg(test)]
pub mod graph_mock;
