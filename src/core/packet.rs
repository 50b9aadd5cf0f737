//! # Packet Envelope
//!
//! The encode/decode contract shared by every message kind.
//!
//! A message's payload is split across two hooks: primary fields are always
//! written in the clear (routing and sequencing data the receiver must read
//! before it has a key), secondary fields are run through a stream cipher
//! when the caller supplies a key. A kind that needs no plaintext-visible
//! fields leaves the primary hooks empty; a kind that needs no
//! confidentiality leaves the secondary hooks empty, making encryption a
//! no-op regardless of key presence.
//!
//! The envelope also tracks availability: a packet whose effect has been
//! superseded (a stale position update, a message for a player that left)
//! is discarded, and any further encode/decode attempt on it fails with
//! [`ProtocolError::Discarded`].

use crate::config::MAX_PACKET_SIZE;
use crate::core::wire::{WireReader, WireWriter};
use crate::error::{ProtocolError, Result};
use crate::utils::crypto::SegmentCipher;
use bytes::Bytes;
use std::any::Any;
use std::fmt;
use tracing::trace;

/// Per-kind serialization hooks. Object-safe; the registry works with
/// `Box<dyn PacketBody>`.
pub trait PacketBody: fmt::Debug + Send {
    /// Type tag identifying this kind within the registry. Stable for the
    /// lifetime of the instance.
    fn packet_type(&self) -> u8;

    /// Encodes the fields that stay readable without a key.
    fn encode_primary(&self, writer: &mut WireWriter) -> Result<()> {
        let _ = writer;
        Ok(())
    }

    /// Encodes the fields the sender may choose to encrypt.
    fn encode_secondary(&self, writer: &mut WireWriter) -> Result<()> {
        let _ = writer;
        Ok(())
    }

    /// Decodes the plain segment. Must consume exactly the bytes
    /// `encode_primary` produced.
    fn decode_primary(&mut self, reader: &mut WireReader) -> Result<()> {
        let _ = reader;
        Ok(())
    }

    /// Decodes the (already deciphered) secondary segment. Must consume
    /// exactly the bytes `encode_secondary` produced.
    fn decode_secondary(&mut self, reader: &mut WireReader) -> Result<()> {
        let _ = reader;
        Ok(())
    }

    /// Kind-specific validity check, run after a full decode. This is what
    /// turns a wrong-key decipher into a decode failure instead of silently
    /// accepted garbage.
    fn validate(&self) -> Result<()> {
        Ok(())
    }

    /// Downcast support for consumers holding `Box<dyn PacketBody>`.
    fn as_any(&self) -> &dyn Any;
}

impl PacketBody for Box<dyn PacketBody> {
    fn packet_type(&self) -> u8 {
        (**self).packet_type()
    }

    fn encode_primary(&self, writer: &mut WireWriter) -> Result<()> {
        (**self).encode_primary(writer)
    }

    fn encode_secondary(&self, writer: &mut WireWriter) -> Result<()> {
        (**self).encode_secondary(writer)
    }

    fn decode_primary(&mut self, reader: &mut WireReader) -> Result<()> {
        (**self).decode_primary(reader)
    }

    fn decode_secondary(&mut self, reader: &mut WireReader) -> Result<()> {
        (**self).decode_secondary(reader)
    }

    fn validate(&self) -> Result<()> {
        (**self).validate()
    }

    fn as_any(&self) -> &dyn Any {
        (**self).as_any()
    }
}

/// Statically-known message kind: a body with a fixed tag and a neutral
/// starting value the registry can construct before decoding into it.
pub trait PacketKind: PacketBody + Default {
    const TYPE: u8;
}

/// A typed message plus its envelope bookkeeping.
#[derive(Debug, Clone)]
pub struct Packet<B> {
    body: B,
    crypt: String,
    available: bool,
}

/// Dynamically-typed packet, as produced by the registry.
pub type AnyPacket = Packet<Box<dyn PacketBody>>;

impl<B: PacketBody> Packet<B> {
    pub fn new(body: B) -> Self {
        Self {
            body,
            crypt: String::new(),
            available: true,
        }
    }

    pub fn packet_type(&self) -> u8 {
        self.body.packet_type()
    }

    /// True iff the last encode or decode of this instance applied the
    /// cipher. Reflects an outcome, not a request.
    pub fn encrypted(&self) -> bool {
        !self.crypt.is_empty()
    }

    /// Marks the packet as superseded. Idempotent. Field values stay
    /// inspectable for diagnostics, but encode/decode refuse to run.
    pub fn discard(&mut self) {
        self.available = false;
    }

    pub fn is_available(&self) -> bool {
        self.available
    }

    pub fn body(&self) -> &B {
        &self.body
    }

    pub fn body_mut(&mut self) -> &mut B {
        &mut self.body
    }

    pub fn into_body(self) -> B {
        self.body
    }

    /// Encodes the packet: type tag, plain segment, then the secondary
    /// segment, ciphered iff a non-empty key is supplied and the segment is
    /// non-empty. Deterministic given the same key and field values; the
    /// body is not mutated.
    ///
    /// # Errors
    /// [`ProtocolError::Discarded`] if the packet was discarded, or any
    /// error raised by the kind's encode hooks.
    pub fn to_bytes(&mut self, key: Option<&str>) -> Result<Bytes> {
        if !self.available {
            return Err(ProtocolError::Discarded);
        }

        let mut writer = WireWriter::with_capacity(64);
        writer.put_u8(self.body.packet_type());
        self.body.encode_primary(&mut writer)?;

        let mut secondary = WireWriter::new();
        self.body.encode_secondary(&mut secondary)?;
        let mut secondary = secondary.into_vec();

        self.crypt.clear();
        if let Some(key) = active_key(key) {
            if !secondary.is_empty() {
                SegmentCipher::new(key).apply(&mut secondary);
                self.crypt.push_str(SegmentCipher::MARKER);
            }
        }
        writer.put_raw(&secondary);

        if writer.len() > MAX_PACKET_SIZE {
            return Err(ProtocolError::OversizedPacket(writer.len()));
        }

        trace!(
            tag = self.body.packet_type(),
            len = writer.len(),
            encrypted = self.encrypted(),
            "encoded packet"
        );
        Ok(writer.freeze())
    }

    /// Fills the body's fields from `reader`. The type tag has already been
    /// consumed by the caller; this method never reads or checks it.
    ///
    /// The plain segment is decoded first, then everything left in the
    /// buffer is taken as the secondary segment, deciphered iff a non-empty
    /// key is supplied, decoded, and checked: the kind must consume the
    /// segment exactly, and its [`PacketBody::validate`] must accept the
    /// result.
    ///
    /// # Errors
    /// Any decode failure leaves the error flagged; fields may be partially
    /// written but the instance must not be treated as decoded.
    pub fn from_stream(&mut self, reader: &mut WireReader, key: Option<&str>) -> Result<()> {
        if !self.available {
            return Err(ProtocolError::Discarded);
        }

        self.body.decode_primary(reader)?;

        let mut secondary = reader.take_remaining().to_vec();
        self.crypt.clear();
        if !secondary.is_empty() {
            if let Some(key) = active_key(key) {
                SegmentCipher::new(key).apply(&mut secondary);
                self.crypt.push_str(SegmentCipher::MARKER);
            }
        }

        let mut secondary = WireReader::from(secondary);
        self.body.decode_secondary(&mut secondary)?;
        if !secondary.is_empty() {
            return Err(ProtocolError::TrailingBytes(secondary.remaining()));
        }

        self.body.validate()
    }
}

/// A key is only active when present and non-empty; the transport hands an
/// empty string through before the session is keyed.
fn active_key(key: Option<&str>) -> Option<&str> {
    key.filter(|k| !k.is_empty())
}
