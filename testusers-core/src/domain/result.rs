//! Result and error types for the core library

use std::fmt;

use thiserror::Error;

/// Which argument of a two-user operation an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Argument {
    First,
    Second,
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Argument::First => write!(f, "first"),
            Argument::Second => write!(f, "second"),
        }
    }
}

/// Phase of the friend-connection handshake
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FriendPhase {
    /// The first user sends the friend request
    Request,
    /// The second user accepts the pending request
    Accept,
}

impl fmt::Display for FriendPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FriendPhase::Request => write!(f, "could not make friend request"),
            FriendPhase::Accept => write!(f, "could not accept friend request"),
        }
    }
}

/// Core library error type
#[derive(Error, Debug)]
pub enum Error {
    /// Connection, timeout or other failure before a response arrived
    #[error("Transport error: {0}")]
    Transport(String),

    /// The platform answered with a non-success status
    ///
    /// `message` is exactly what the platform sent; its error type and
    /// code travel alongside when present.
    #[error("Graph API error (HTTP {status}): {message}")]
    Api {
        status: u16,
        message: String,
        kind: Option<String>,
        code: Option<i64>,
    },

    #[error("Decode error: {0}")]
    Decode(String),

    #[error(
        "The {argument} test user ({user_id}) has no access token; \
         it must be created with the app installed to take part in a friend connection"
    )]
    MissingAccessToken { argument: Argument, user_id: String },

    #[error("Friend connection failed: {phase} ({from} -> {to})")]
    Friendship {
        phase: FriendPhase,
        from: String,
        to: String,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a transport error
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Create a decode error
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// True for errors raised by the platform or the network rather than locally
    pub fn is_remote(&self) -> bool {
        matches!(self, Error::Transport(_) | Error::Api { .. })
    }
}

/// Core library result type
pub type Result<T> = std::result::Result<T, Error>;
