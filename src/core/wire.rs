//! # Wire Primitives
//!
//! Checked encoders and decoders for the fixed-width scalars and
//! length-prefixed strings every message kind is built from.
//!
//! All multi-byte scalars use network byte order. Strings carry a 16-bit
//! byte-length prefix followed by raw UTF-8. Every read verifies that the
//! buffer holds enough bytes before touching it; a short buffer yields
//! [`ProtocolError::UnexpectedEof`], never a partial value and never a
//! panic.

use crate::config::MAX_STRING_BYTES;
use crate::error::{ProtocolError, Result};
use bytes::{Buf, BufMut, Bytes, BytesMut};

/// Growable byte sink for encoding one message.
#[derive(Debug, Default)]
pub struct WireWriter {
    buf: BytesMut,
}

impl WireWriter {
    pub fn new() -> Self {
        Self {
            buf: BytesMut::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: BytesMut::with_capacity(capacity),
        }
    }

    pub fn put_u8(&mut self, val: u8) {
        self.buf.put_u8(val);
    }

    pub fn put_i8(&mut self, val: i8) {
        self.buf.put_i8(val);
    }

    pub fn put_u16(&mut self, val: u16) {
        self.buf.put_u16(val);
    }

    pub fn put_i16(&mut self, val: i16) {
        self.buf.put_i16(val);
    }

    pub fn put_u32(&mut self, val: u32) {
        self.buf.put_u32(val);
    }

    pub fn put_i32(&mut self, val: i32) {
        self.buf.put_i32(val);
    }

    /// Booleans travel as a single 0/1 byte.
    pub fn put_bool(&mut self, val: bool) {
        self.buf.put_u8(u8::from(val));
    }

    /// Writes a 16-bit byte-length prefix followed by the raw UTF-8 bytes.
    ///
    /// # Errors
    /// Returns [`ProtocolError::StringTooLong`] if the string does not fit
    /// the prefix.
    pub fn put_string16(&mut self, val: &str) -> Result<()> {
        if val.len() > MAX_STRING_BYTES {
            return Err(ProtocolError::StringTooLong(val.len()));
        }
        self.buf.put_u16(val.len() as u16);
        self.buf.put_slice(val.as_bytes());
        Ok(())
    }

    /// Appends pre-encoded bytes verbatim.
    pub fn put_raw(&mut self, bytes: &[u8]) {
        self.buf.put_slice(bytes);
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn freeze(self) -> Bytes {
        self.buf.freeze()
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.buf.to_vec()
    }
}

/// Consuming cursor over one received message.
#[derive(Debug)]
pub struct WireReader {
    buf: Bytes,
}

impl WireReader {
    pub fn new(buf: Bytes) -> Self {
        Self { buf }
    }

    fn need(&self, needed: usize) -> Result<()> {
        let remaining = self.buf.remaining();
        if remaining < needed {
            return Err(ProtocolError::UnexpectedEof {
                needed: needed - remaining,
                remaining,
            });
        }
        Ok(())
    }

    pub fn get_u8(&mut self) -> Result<u8> {
        self.need(1)?;
        Ok(self.buf.get_u8())
    }

    pub fn get_i8(&mut self) -> Result<i8> {
        self.need(1)?;
        Ok(self.buf.get_i8())
    }

    pub fn get_u16(&mut self) -> Result<u16> {
        self.need(2)?;
        Ok(self.buf.get_u16())
    }

    pub fn get_i16(&mut self) -> Result<i16> {
        self.need(2)?;
        Ok(self.buf.get_i16())
    }

    pub fn get_u32(&mut self) -> Result<u32> {
        self.need(4)?;
        Ok(self.buf.get_u32())
    }

    pub fn get_i32(&mut self) -> Result<i32> {
        self.need(4)?;
        Ok(self.buf.get_i32())
    }

    /// Reads one byte and requires it to be 0 or 1. Anything else means the
    /// stream is corrupt (or was deciphered with the wrong key).
    pub fn get_bool(&mut self) -> Result<bool> {
        match self.get_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(ProtocolError::Validation(format!(
                "boolean byte must be 0 or 1, got 0x{other:02X}"
            ))),
        }
    }

    /// Reads a 16-bit length prefix, then exactly that many bytes of UTF-8.
    pub fn get_string16(&mut self) -> Result<String> {
        let len = self.get_u16()? as usize;
        self.need(len)?;
        let raw = self.buf.split_to(len);
        String::from_utf8(raw.to_vec()).map_err(|_| ProtocolError::InvalidUtf8)
    }

    /// Detaches everything left in the buffer.
    pub fn take_remaining(&mut self) -> Bytes {
        self.buf.split_off(0)
    }

    pub fn remaining(&self) -> usize {
        self.buf.remaining()
    }

    pub fn is_empty(&self) -> bool {
        !self.buf.has_remaining()
    }
}

impl<'a> From<&'a [u8]> for WireReader {
    fn from(slice: &'a [u8]) -> Self {
        Self::new(Bytes::copy_from_slice(slice))
    }
}

impl From<Vec<u8>> for WireReader {
    fn from(vec: Vec<u8>) -> Self {
        Self::new(Bytes::from(vec))
    }
}
