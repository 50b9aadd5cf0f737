#![no_main]

use libfuzzer_sys::fuzz_target;
use sync_wire::protocol::kinds::default_registry;

fuzz_target!(|data: &[u8]| {
    let Ok(registry) = default_registry() else {
        return;
    };

    // First byte doubles as a key selector so both decode paths get fuzzed.
    let key = match data.first() {
        Some(b) if b % 2 == 0 => Some("fuzz-key"),
        _ => None,
    };

    let _ = registry.decode_bytes(data, key);
});
