//! # Protocol Layer
//!
//! Tag-to-kind dispatch and the built-in message kinds.

pub mod kinds;
pub mod registry;
