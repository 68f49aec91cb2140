//! Client error types
//!
//! Errors are layered the same way the code is: the remote boundary produces
//! [`TransportError`] and [`DecodeError::Body`] for bodies that are not JSON,
//! the typed gateway adds the remaining [`DecodeError`]s, and the view-models
//! add local validation and selection failures on top.

use libris_model::MediaId;
use thiserror::Error;

/// Errors surfaced by view-model and session commands.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Input rejected locally, before any remote call
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The remote channel failed
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// The service answered with something that is not a valid payload
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Attempt to select an item the service reports as not borrowable
    #[error("Item {0} is not borrowable")]
    NotSelectable(MediaId),

    /// Selection targeted an id that is not in the current full listing
    #[error("Item {0} is not part of the current listing")]
    NotInListing(MediaId),

    /// Operation needs an authenticated session
    #[error("Not authenticated")]
    NotAuthenticated,
}

impl From<GatewayError> for ClientError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::Transport(err) => ClientError::Transport(err),
            GatewayError::Decode(err) => ClientError::Decode(err),
        }
    }
}

/// Client-side syntactic validation failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("user id must be a positive whole number, got {0:?}")]
    InvalidUserId(String),

    /// Well-formed id above the 32-bit account ids the service issues
    #[error("user id {0} is above the largest supported id {max}", max = u32::MAX)]
    UserIdOutOfRange(String),

    #[error("checkout batch is empty")]
    EmptyBatch,
}

/// Remote channel failures
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    RequestFailed(String),

    #[error("request timed out")]
    Timeout,

    #[error("server returned {status}: {message}")]
    Status { status: u16, message: String },

    /// The service ran the command and reported an error for it
    #[error("`{command}` failed: {message}")]
    Rejected { command: String, message: String },
}

/// Malformed response payloads
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Response body was not JSON at all
    #[error("`{command}` response body is not valid JSON: {source}")]
    Body {
        command: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("malformed `{command}` payload: {source}")]
    Payload {
        command: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("unexpected `{command}` payload, expected {expected}")]
    Shape {
        command: &'static str,
        expected: &'static str,
    },
}

/// Errors from the typed gateway
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Result type alias for gateway operations
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Result type alias for client commands
pub type ClientResult<T> = Result<T, ClientError>;
