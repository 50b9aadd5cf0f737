//! # Secondary-Segment Cipher
//!
//! Symmetric stream cipher applied to a packet's secondary segment.
//!
//! The session layer owns key management and hands the same opaque string
//! to both ends; this module derives a ChaCha20 key and nonce from it with
//! domain-separated SHA-256. The transform is its own inverse, length
//! preserving, and fully deterministic, so encoding the same fields with
//! the same key always yields the same bytes.
//!
//! Deciphering with the wrong key succeeds mechanically and produces
//! garbage; the kind-level validity checks are responsible for flagging
//! that as a decode failure. This layer provides obfuscation of the
//! secondary segment, not authenticated encryption; sessions needing
//! integrity protection wrap the transport instead.

use chacha20::cipher::{KeyIvInit, StreamCipher};
use chacha20::ChaCha20;
use sha2::{Digest, Sha256};

/// Keystream generator bound to one opaque session key.
pub struct SegmentCipher {
    inner: ChaCha20,
}

impl SegmentCipher {
    /// Sentinel recorded in a packet's crypt marker when the cipher ran.
    pub const MARKER: &'static str = "chacha20";

    pub fn new(key: &str) -> Self {
        let key_bytes: [u8; 32] = Sha256::new()
            .chain_update(b"pkt-key:")
            .chain_update(key.as_bytes())
            .finalize()
            .into();

        let nonce_bytes: [u8; 32] = Sha256::new()
            .chain_update(b"pkt-nonce:")
            .chain_update(key.as_bytes())
            .finalize()
            .into();
        let mut nonce = [0u8; 12];
        nonce.copy_from_slice(&nonce_bytes[..12]);

        Self {
            inner: ChaCha20::new(&key_bytes.into(), &nonce.into()),
        }
    }

    /// XORs the keystream into `data` in place. The same call encrypts and
    /// decrypts.
    pub fn apply(&mut self, data: &mut [u8]) {
        self.inner.apply_keystream(data);
    }
}
