#![no_main]
use libfuzzer_sys::fuzz_target;

/// Fuzz the JSON denormalizer over raw input.
///
/// Structural errors are expected; panics are not.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = sbom_codec::from_json_str(s);
    }
});
