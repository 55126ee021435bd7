//! Error types for spotmix.
//!
//! Every fallible operation in the library returns [`Res`], which wraps the
//! top-level [`Error`]. The handshake and the playlist writer have their own
//! enums so callers can react to the exact failure (e.g. keep writing the
//! remaining chunks after one chunk failed).

use thiserror::Error;

/// Failures of the OAuth authorization-code handshake.
///
/// All of them are terminal for the run; nothing is retried.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("cannot bind callback listener on {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("authorization denied: {0}")]
    Denied(String),

    #[error("interrupted while waiting for authorization")]
    Interrupted,

    #[error("callback listener stopped before an authorization code arrived")]
    ListenerClosed,

    #[error("token exchange failed: {0}")]
    TokenExchange(String),

    #[error("invalid authorization url: {0}")]
    InvalidUrl(String),

    #[error("request to authorization server failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Failures while creating the destination playlist or appending to it.
#[derive(Error, Debug)]
pub enum WriteError {
    #[error("failed to create playlist: {0}")]
    Create(String),

    /// `index` is the zero-based position of the failed chunk.
    #[error("failed to add chunk {index} ({size} tracks): {reason}")]
    Chunk {
        index: usize,
        size: usize,
        reason: String,
    },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Auth(#[from] AuthError),

    /// A name typed by the user does not match anything in the listed set.
    #[error("{kind} not found: {name}")]
    NotFound { kind: &'static str, name: String },

    /// The API answered with a shape we cannot use.
    #[error("unexpected API response: {0}")]
    Data(String),

    #[error(transparent)]
    Write(#[from] WriteError),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn not_found(kind: &'static str, name: impl Into<String>) -> Self {
        Error::NotFound {
            kind,
            name: name.into(),
        }
    }

    pub fn data(msg: impl Into<String>) -> Self {
        Error::Data(msg.into())
    }
}

/// Result alias used throughout the crate.
pub type Res<T> = std::result::Result<T, Error>;
