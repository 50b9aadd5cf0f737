//! # Error Types
//!
//! Error handling for the packet envelope layer.
//!
//! Every failure this crate can produce is a recoverable value: a malformed
//! or truncated stream, an unregistered type tag, an operation on a
//! discarded packet, or a payload that deciphered mechanically but failed a
//! kind's validity check. None of them abort the process; the session layer
//! decides whether to drop the message or the connection.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Primary error type for all envelope operations.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProtocolError {
    #[error("unexpected end of stream: needed {needed} more byte(s), {remaining} available")]
    UnexpectedEof { needed: usize, remaining: usize },

    #[error("string of {0} bytes exceeds 16-bit length prefix")]
    StringTooLong(usize),

    #[error("invalid UTF-8 in string field")]
    InvalidUtf8,

    #[error("unknown packet type tag 0x{0:02X}")]
    UnknownType(u8),

    #[error("packet type tag 0x{0:02X} registered twice")]
    DuplicateType(u8),

    #[error("operation on a discarded packet")]
    Discarded,

    #[error("decoder left {0} trailing byte(s) unconsumed")]
    TrailingBytes(usize),

    #[error("packet failed validation: {0}")]
    Validation(String),

    #[error("packet too large: {0} bytes")]
    OversizedPacket(usize),
}

/// Type alias for Results using ProtocolError
pub type Result<T> = std::result::Result<T, ProtocolError>;
