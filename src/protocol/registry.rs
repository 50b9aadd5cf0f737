//! # Packet Registry
//!
//! Maps the leading type-tag byte of an inbound buffer to a concrete
//! message constructor, then hands the remaining bytes to the envelope's
//! decode path.
//!
//! The registry is populated once at session setup and read-only after
//! that, so it can be shared by reference across decoding threads.

use crate::config::MAX_PACKET_SIZE;
use crate::core::packet::{AnyPacket, Packet, PacketBody, PacketKind};
use crate::core::wire::WireReader;
use crate::error::{ProtocolError, Result};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use tracing::{trace, warn};

type Constructor = fn() -> Box<dyn PacketBody>;

fn construct<K: PacketKind + 'static>() -> Box<dyn PacketBody> {
    Box::new(K::default())
}

/// Type-tag dispatch table.
#[derive(Default)]
pub struct PacketRegistry {
    constructors: HashMap<u8, Constructor>,
}

impl PacketRegistry {
    pub fn new() -> Self {
        Self {
            constructors: HashMap::new(),
        }
    }

    /// Registers kind `K` under its tag.
    ///
    /// # Errors
    /// [`ProtocolError::DuplicateType`] if the tag is already taken.
    pub fn register<K: PacketKind + 'static>(&mut self) -> Result<()> {
        match self.constructors.entry(K::TYPE) {
            Entry::Occupied(_) => Err(ProtocolError::DuplicateType(K::TYPE)),
            Entry::Vacant(slot) => {
                slot.insert(construct::<K>);
                Ok(())
            }
        }
    }

    /// Reads the leading tag byte from `reader`, constructs the matching
    /// kind, and decodes the rest of the buffer into it.
    pub fn decode(&self, reader: &mut WireReader, key: Option<&str>) -> Result<AnyPacket> {
        let tag = reader.get_u8()?;
        let constructor = self.constructors.get(&tag).ok_or_else(|| {
            warn!(tag, "unknown packet type tag");
            ProtocolError::UnknownType(tag)
        })?;

        let mut packet = Packet::new(constructor());
        packet.from_stream(reader, key)?;
        trace!(tag, encrypted = packet.encrypted(), "decoded packet");
        Ok(packet)
    }

    /// Convenience wrapper decoding one message from a byte slice.
    pub fn decode_bytes(&self, bytes: &[u8], key: Option<&str>) -> Result<AnyPacket> {
        if bytes.len() > MAX_PACKET_SIZE {
            return Err(ProtocolError::OversizedPacket(bytes.len()));
        }
        let mut reader = WireReader::from(bytes);
        self.decode(&mut reader, key)
    }

    pub fn contains(&self, tag: u8) -> bool {
        self.constructors.contains_key(&tag)
    }

    pub fn len(&self) -> usize {
        self.constructors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constructors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::protocol::kinds::{default_registry, Leave, Move};

    #[test]
    fn decode_routes_by_tag() {
        let registry = default_registry().unwrap();
        let bytes = Packet::new(Move { x: 3, y: 4 }).to_bytes(None).unwrap();

        let packet = registry.decode_bytes(&bytes, None).unwrap();
        assert_eq!(packet.packet_type(), Move::TYPE);
        let body = packet.body().as_any().downcast_ref::<Move>().unwrap();
        assert_eq!((body.x, body.y), (3, 4));
    }

    #[test]
    fn unknown_tag_is_an_error() {
        let registry = default_registry().unwrap();
        assert_eq!(
            registry.decode_bytes(&[0xEE], None).unwrap_err(),
            ProtocolError::UnknownType(0xEE)
        );
    }

    #[test]
    fn empty_buffer_is_an_error() {
        let registry = default_registry().unwrap();
        assert!(matches!(
            registry.decode_bytes(&[], None),
            Err(ProtocolError::UnexpectedEof { .. })
        ));
    }

    #[test]
    fn duplicate_registration_is_rejected() {
        let mut registry = PacketRegistry::new();
        registry.register::<Leave>().unwrap();
        assert_eq!(
            registry.register::<Leave>().unwrap_err(),
            ProtocolError::DuplicateType(Leave::TYPE)
        );
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn oversized_buffer_is_rejected_before_decoding() {
        let registry = default_registry().unwrap();
        let huge = vec![0u8; MAX_PACKET_SIZE + 1];
        assert_eq!(
            registry.decode_bytes(&huge, None).unwrap_err(),
            ProtocolError::OversizedPacket(MAX_PACKET_SIZE + 1)
        );
    }
}
