//! # Core Envelope Components
//!
//! Wire primitives, the variadic field writer, and the packet envelope.
//!
//! This module provides the foundation of the protocol: checked binary
//! primitives, and the two-phase encode/decode contract every message kind
//! implements.
//!
//! ## Wire Format
//! ```text
//! [Type(1)] [Plain segment(N)] [Secondary segment(M), ciphered iff keyed]
//! ```
//!
//! There is no per-segment length field; each kind's fixed field layout
//! implies the segment boundary, so a kind's decode hook must consume
//! exactly the bytes its encode hook produced.

pub mod fields;
pub mod packet;
pub mod wire;
