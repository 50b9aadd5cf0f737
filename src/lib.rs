//! # sync-wire
//!
//! Binary packet envelope core for multiplayer state synchronization.
//!
//! This crate defines the wire contract shared by every message kind a
//! synchronization session exchanges: a one-byte type tag, a plain segment
//! that stays readable without a key, and a secondary segment that is
//! optionally run through a symmetric stream cipher. The transport that
//! frames and ships those bytes lives elsewhere; this layer is a pure,
//! synchronous data transform.
//!
//! ## Components
//! - **Wire primitives**: checked big-endian scalar and string codecs
//! - **Packet envelope**: the two-phase encode/decode contract with
//!   discard/availability bookkeeping
//! - **Registry**: maps type tags to concrete message constructors
//! - **Built-in kinds**: the player-state messages a session exchanges
//!
//! ## Example
//! ```
//! use sync_wire::protocol::kinds::Move;
//! use sync_wire::{Packet, WireReader};
//!
//! # fn main() -> sync_wire::Result<()> {
//! let mut outbound = Packet::new(Move { x: 120, y: 45 });
//! let bytes = outbound.to_bytes(Some("session-secret"))?;
//!
//! let mut reader = WireReader::from(&bytes[1..]); // tag consumed by registry
//! let mut inbound = Packet::new(Move::default());
//! inbound.from_stream(&mut reader, Some("session-secret"))?;
//! assert_eq!(inbound.body(), &Move { x: 120, y: 45 });
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod protocol;
pub mod utils;

pub use crate::core::fields::{write_fields, FieldValue};
pub use crate::core::packet::{AnyPacket, Packet, PacketBody, PacketKind};
pub use crate::core::wire::{WireReader, WireWriter};
pub use crate::error::{ProtocolError, Result};
pub use crate::protocol::registry::PacketRegistry;
