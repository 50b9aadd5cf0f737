//! # Built-in Message Kinds
//!
//! The player-state messages a synchronization session exchanges. Each kind
//! owns one fixed field layout, split between the plain segment (routing
//! data the server reads before the session is keyed) and the secondary
//! segment (player-visible content a sender may encrypt).
//!
//! Applications with their own vocabulary register their own kinds instead;
//! nothing below is special to the envelope.

use crate::core::fields::write_fields;
use crate::core::packet::{PacketBody, PacketKind};
use crate::core::wire::{WireReader, WireWriter};
use crate::error::{ProtocolError, Result};
use crate::protocol::registry::PacketRegistry;
use std::any::Any;

/// Exclusive upper bound for map coordinates. Maps are tile grids well
/// under this size, so any coordinate at or past it means a corrupt or
/// wrongly-deciphered payload.
pub const MAP_POS_LIMIT: u16 = 500;

/// Sprite sheets hold eight character slots.
pub const SPRITE_INDEX_LIMIT: i16 = 8;

/// A player entered the room.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Join {
    pub id: u16,
    pub name: String,
}

impl PacketBody for Join {
    fn packet_type(&self) -> u8 {
        Self::TYPE
    }

    fn encode_primary(&self, writer: &mut WireWriter) -> Result<()> {
        writer.put_u16(self.id);
        Ok(())
    }

    fn encode_secondary(&self, writer: &mut WireWriter) -> Result<()> {
        writer.put_string16(&self.name)
    }

    fn decode_primary(&mut self, reader: &mut WireReader) -> Result<()> {
        self.id = reader.get_u16()?;
        Ok(())
    }

    fn decode_secondary(&mut self, reader: &mut WireReader) -> Result<()> {
        self.name = reader.get_string16()?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(ProtocolError::Validation(
                "player name must not be empty".into(),
            ));
        }
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl PacketKind for Join {
    const TYPE: u8 = 0x01;
}

/// A player left the room. Carries routing data only, so encryption is a
/// no-op for this kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Leave {
    pub id: u16,
}

impl PacketBody for Leave {
    fn packet_type(&self) -> u8 {
        Self::TYPE
    }

    fn encode_primary(&self, writer: &mut WireWriter) -> Result<()> {
        writer.put_u16(self.id);
        Ok(())
    }

    fn decode_primary(&mut self, reader: &mut WireReader) -> Result<()> {
        self.id = reader.get_u16()?;
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl PacketKind for Leave {
    const TYPE: u8 = 0x02;
}

/// A position update for the sending player. The x coordinate stays plain
/// so relays can sort updates without the session key; y rides in the
/// secondary segment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Move {
    pub x: u16,
    pub y: u16,
}

impl PacketBody for Move {
    fn packet_type(&self) -> u8 {
        Self::TYPE
    }

    fn encode_primary(&self, writer: &mut WireWriter) -> Result<()> {
        writer.put_u16(self.x);
        Ok(())
    }

    fn encode_secondary(&self, writer: &mut WireWriter) -> Result<()> {
        writer.put_u16(self.y);
        Ok(())
    }

    fn decode_primary(&mut self, reader: &mut WireReader) -> Result<()> {
        self.x = reader.get_u16()?;
        Ok(())
    }

    fn decode_secondary(&mut self, reader: &mut WireReader) -> Result<()> {
        self.y = reader.get_u16()?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.x >= MAP_POS_LIMIT || self.y >= MAP_POS_LIMIT {
            return Err(ProtocolError::Validation(format!(
                "move target ({}, {}) outside map bounds",
                self.x, self.y
            )));
        }
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl PacketKind for Move {
    const TYPE: u8 = 0x03;
}

/// Who can see a chat line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum ChatScope {
    #[default]
    Room = 0,
    Global = 1,
    Party = 2,
}

impl ChatScope {
    pub fn as_byte(self) -> u8 {
        self as u8
    }

    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(ChatScope::Room),
            1 => Some(ChatScope::Global),
            2 => Some(ChatScope::Party),
            _ => None,
        }
    }
}

/// A chat line. Sender and scope stay plain for routing; the text is
/// encryptable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Chat {
    pub sender: u16,
    pub scope: ChatScope,
    pub message: String,
}

impl PacketBody for Chat {
    fn packet_type(&self) -> u8 {
        Self::TYPE
    }

    fn encode_primary(&self, writer: &mut WireWriter) -> Result<()> {
        write_fields(writer, &[self.sender.into(), self.scope.as_byte().into()])
    }

    fn encode_secondary(&self, writer: &mut WireWriter) -> Result<()> {
        writer.put_string16(&self.message)
    }

    fn decode_primary(&mut self, reader: &mut WireReader) -> Result<()> {
        self.sender = reader.get_u16()?;
        let scope = reader.get_u8()?;
        self.scope = ChatScope::from_byte(scope).ok_or_else(|| {
            ProtocolError::Validation(format!("unknown chat scope 0x{scope:02X}"))
        })?;
        Ok(())
    }

    fn decode_secondary(&mut self, reader: &mut WireReader) -> Result<()> {
        self.message = reader.get_string16()?;
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl PacketKind for Chat {
    const TYPE: u8 = 0x04;
}

/// The sending player switched character graphics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sprite {
    pub id: u16,
    pub sheet: String,
    /// Slot within the sheet; -1 selects the sheet default.
    pub index: i16,
}

impl PacketBody for Sprite {
    fn packet_type(&self) -> u8 {
        Self::TYPE
    }

    fn encode_primary(&self, writer: &mut WireWriter) -> Result<()> {
        writer.put_u16(self.id);
        Ok(())
    }

    fn encode_secondary(&self, writer: &mut WireWriter) -> Result<()> {
        write_fields(writer, &[self.sheet.as_str().into(), self.index.into()])
    }

    fn decode_primary(&mut self, reader: &mut WireReader) -> Result<()> {
        self.id = reader.get_u16()?;
        Ok(())
    }

    fn decode_secondary(&mut self, reader: &mut WireReader) -> Result<()> {
        self.sheet = reader.get_string16()?;
        self.index = reader.get_i16()?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.index < -1 || self.index >= SPRITE_INDEX_LIMIT {
            return Err(ProtocolError::Validation(format!(
                "sprite index {} out of range",
                self.index
            )));
        }
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl PacketKind for Sprite {
    const TYPE: u8 = 0x05;
}

/// The sending player switched UI skins. Fully encryptable: every field
/// rides in the secondary segment and the plain segment is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SystemGraphic {
    pub id: u16,
    pub name: String,
}

impl PacketBody for SystemGraphic {
    fn packet_type(&self) -> u8 {
        Self::TYPE
    }

    fn encode_secondary(&self, writer: &mut WireWriter) -> Result<()> {
        writer.put_u16(self.id);
        writer.put_string16(&self.name)
    }

    fn decode_secondary(&mut self, reader: &mut WireReader) -> Result<()> {
        self.id = reader.get_u16()?;
        self.name = reader.get_string16()?;
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl PacketKind for SystemGraphic {
    const TYPE: u8 = 0x06;
}

/// Registry wired with every kind above.
pub fn default_registry() -> Result<PacketRegistry> {
    let mut registry = PacketRegistry::new();
    registry.register::<Join>()?;
    registry.register::<Leave>()?;
    registry.register::<Move>()?;
    registry.register::<Chat>()?;
    registry.register::<Sprite>()?;
    registry.register::<SystemGraphic>()?;
    Ok(registry)
}
