//! # Protocol Constants
//!
//! Size limits shared by the encode and decode paths.
//!
//! Messages at this layer are small, discrete state updates; the transport
//! frames one message per buffer. The limits here bound allocations before
//! any payload bytes are interpreted.

/// Max allowed size for a single encoded message (64 KiB).
pub const MAX_PACKET_SIZE: usize = 64 * 1024;

/// Max byte length of a length-prefixed string (16-bit prefix).
pub const MAX_STRING_BYTES: usize = u16::MAX as usize;
