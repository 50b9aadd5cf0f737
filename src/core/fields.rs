//! # Variadic Field Writer
//!
//! Writes a heterogeneous, ordered list of typed values in one call.
//!
//! Encode hooks that emit several fields in a row use [`write_fields`]
//! instead of chaining individual `put_*` calls; the tagged union keeps the
//! type dispatch explicit and exhaustive. The helper performs no framing
//! and no encryption; both belong to the envelope.

use crate::core::wire::WireWriter;
use crate::error::Result;

/// One typed value destined for the wire.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    U8(u8),
    I8(i8),
    U16(u16),
    I16(i16),
    U32(u32),
    I32(i32),
    Bool(bool),
    Str(&'a str),
}

/// Writes `fields` left to right, dispatching each value to the primitive
/// encoder matching its type. Output order equals argument order.
pub fn write_fields(writer: &mut WireWriter, fields: &[FieldValue<'_>]) -> Result<()> {
    for field in fields {
        match *field {
            FieldValue::U8(v) => writer.put_u8(v),
            FieldValue::I8(v) => writer.put_i8(v),
            FieldValue::U16(v) => writer.put_u16(v),
            FieldValue::I16(v) => writer.put_i16(v),
            FieldValue::U32(v) => writer.put_u32(v),
            FieldValue::I32(v) => writer.put_i32(v),
            FieldValue::Bool(v) => writer.put_bool(v),
            FieldValue::Str(v) => writer.put_string16(v)?,
        }
    }
    Ok(())
}

impl<'a> From<u8> for FieldValue<'a> {
    fn from(v: u8) -> Self {
        FieldValue::U8(v)
    }
}

impl<'a> From<i8> for FieldValue<'a> {
    fn from(v: i8) -> Self {
        FieldValue::I8(v)
    }
}

impl<'a> From<u16> for FieldValue<'a> {
    fn from(v: u16) -> Self {
        FieldValue::U16(v)
    }
}

impl<'a> From<i16> for FieldValue<'a> {
    fn from(v: i16) -> Self {
        FieldValue::I16(v)
    }
}

impl<'a> From<u32> for FieldValue<'a> {
    fn from(v: u32) -> Self {
        FieldValue::U32(v)
    }
}

impl<'a> From<i32> for FieldValue<'a> {
    fn from(v: i32) -> Self {
        FieldValue::I32(v)
    }
}

impl<'a> From<bool> for FieldValue<'a> {
    fn from(v: bool) -> Self {
        FieldValue::Bool(v)
    }
}

impl<'a> From<&'a str> for FieldValue<'a> {
    fn from(v: &'a str) -> Self {
        FieldValue::Str(v)
    }
}
