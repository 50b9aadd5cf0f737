//! Edge-case tests: truncation, corruption, lifecycle violations, and
//! registry failure modes.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use sync_wire::protocol::kinds::{default_registry, Chat, ChatScope, Join, Leave, Move, Sprite};
use sync_wire::{Packet, PacketKind, PacketRegistry, ProtocolError, WireReader};

// ============================================================================
// TRUNCATED STREAMS
// ============================================================================

#[test]
fn every_prefix_of_every_kind_fails_to_decode() {
    let registry = default_registry().expect("registry builds");
    let encodings = [
        Packet::new(Join {
            id: 4,
            name: "Sam".to_string(),
        })
        .to_bytes(Some("abc"))
        .expect("encode"),
        Packet::new(Leave { id: 4 }).to_bytes(None).expect("encode"),
        Packet::new(Move { x: 10, y: 20 })
            .to_bytes(Some("abc"))
            .expect("encode"),
        Packet::new(Chat {
            sender: 4,
            scope: ChatScope::Room,
            message: "hello".to_string(),
        })
        .to_bytes(None)
        .expect("encode"),
        Packet::new(Sprite {
            id: 4,
            sheet: "Actor2".to_string(),
            index: 1,
        })
        .to_bytes(Some("abc"))
        .expect("encode"),
    ];

    for bytes in &encodings {
        for cut in 1..bytes.len() {
            assert!(
                registry.decode_bytes(&bytes[..cut], Some("abc")).is_err(),
                "prefix of {cut}/{} bytes decoded successfully (tag 0x{:02X})",
                bytes.len(),
                bytes[0]
            );
        }
    }
}

#[test]
fn truncation_inside_a_string_is_flagged_as_eof() {
    let bytes = Packet::new(Join {
        id: 1,
        name: "Morgan".to_string(),
    })
    .to_bytes(None)
    .expect("encode");

    let registry = default_registry().expect("registry builds");
    // Cut two bytes out of the name payload.
    let result = registry.decode_bytes(&bytes[..bytes.len() - 2], None);
    assert!(matches!(result, Err(ProtocolError::UnexpectedEof { .. })));
}

// ============================================================================
// CORRUPTION AND KEY MISMATCH
// ============================================================================

#[test]
fn tampered_ciphertext_fails_validation() {
    let bytes = Packet::new(Move { x: 120, y: 45 })
        .to_bytes(Some("abc"))
        .expect("encode");

    // Flip the high byte of the ciphered y. The stream cipher passes the
    // flip straight through, so the deciphered y lands far outside the map.
    let mut tampered = bytes.to_vec();
    tampered[3] ^= 0xFF;

    let registry = default_registry().expect("registry builds");
    assert!(matches!(
        registry.decode_bytes(&tampered, Some("abc")),
        Err(ProtocolError::Validation(_))
    ));
}

#[test]
fn wrong_key_on_string_payload_is_a_decode_failure() {
    let bytes = Packet::new(Chat {
        sender: 9,
        scope: ChatScope::Global,
        message: "hello".to_string(),
    })
    .to_bytes(Some("abc"))
    .expect("encode");

    let registry = default_registry().expect("registry builds");
    assert!(registry.decode_bytes(&bytes, Some("wrong")).is_err());
}

#[test]
fn missing_key_on_encrypted_payload_is_a_decode_failure() {
    let bytes = Packet::new(Move { x: 120, y: 45 })
        .to_bytes(Some("abc"))
        .expect("encode");

    let registry = default_registry().expect("registry builds");
    assert!(registry.decode_bytes(&bytes, None).is_err());
}

#[test]
fn corrupt_chat_scope_is_rejected_in_the_plain_segment() {
    let bytes = Packet::new(Chat {
        sender: 9,
        scope: ChatScope::Party,
        message: "x".to_string(),
    })
    .to_bytes(None)
    .expect("encode");

    // Scope byte sits right after tag + sender.
    let mut corrupt = bytes.to_vec();
    corrupt[3] = 9;

    let registry = default_registry().expect("registry builds");
    assert!(matches!(
        registry.decode_bytes(&corrupt, None),
        Err(ProtocolError::Validation(_))
    ));
}

// ============================================================================
// DISCARD LIFECYCLE
// ============================================================================

#[test]
fn discarded_packet_cannot_be_sent() {
    let mut packet = Packet::new(Move { x: 1, y: 1 });
    packet.discard();
    packet.discard(); // idempotent

    assert!(!packet.is_available());
    assert_eq!(
        packet.to_bytes(None).expect_err("encode must fail"),
        ProtocolError::Discarded
    );
}

#[test]
fn discarded_packet_cannot_be_filled_from_a_stream() {
    let bytes = Packet::new(Move { x: 1, y: 1 })
        .to_bytes(None)
        .expect("encode");

    let mut stale = Packet::new(Move::default());
    stale.discard();

    let mut reader = WireReader::from(&bytes[1..]);
    assert_eq!(
        stale
            .from_stream(&mut reader, None)
            .expect_err("decode must fail"),
        ProtocolError::Discarded
    );
}

// ============================================================================
// REGISTRY FAILURE MODES
// ============================================================================

#[test]
fn unknown_tag_names_the_offender() {
    let registry = default_registry().expect("registry builds");
    assert_eq!(
        registry.decode_bytes(&[0xAA, 0x00, 0x01], None).unwrap_err(),
        ProtocolError::UnknownType(0xAA)
    );
}

#[test]
fn empty_registry_knows_nothing() {
    let registry = PacketRegistry::new();
    assert!(registry.is_empty());
    assert_eq!(
        registry.decode_bytes(&[Move::TYPE, 0, 1, 0, 1], None).unwrap_err(),
        ProtocolError::UnknownType(Move::TYPE)
    );
}

#[test]
fn duplicate_tags_are_rejected_at_registration() {
    let mut registry = default_registry().expect("registry builds");
    assert_eq!(
        registry.register::<Move>().unwrap_err(),
        ProtocolError::DuplicateType(Move::TYPE)
    );
}

// ============================================================================
// SIZE LIMITS
// ============================================================================

#[test]
fn oversized_string_fails_at_encode() {
    let mut packet = Packet::new(Chat {
        sender: 1,
        scope: ChatScope::Room,
        message: "a".repeat(70_000),
    });
    assert_eq!(
        packet.to_bytes(None).unwrap_err(),
        ProtocolError::StringTooLong(70_000)
    );
}

#[test]
fn oversized_packet_fails_at_encode() {
    // Fits the string prefix but pushes the whole message past the packet cap.
    let mut packet = Packet::new(Chat {
        sender: 1,
        scope: ChatScope::Room,
        message: "a".repeat(u16::MAX as usize),
    });
    assert!(matches!(
        packet.to_bytes(None),
        Err(ProtocolError::OversizedPacket(_))
    ));
}
