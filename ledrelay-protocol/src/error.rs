//! Protocol error types

use thiserror::Error;

/// Errors from decoding a datagram payload.
#[derive(Error, Debug)]
pub enum ProtocolError {
    /// The payload has no `:` delimiter at all. Unrecognized tokens on
    /// either side of the delimiter are not errors; see
    /// [`crate::command::LedColor`] and [`crate::command::SwitchState`].
    #[error("malformed message (no ':' delimiter): {0:?}")]
    MalformedMessage(String),
}
