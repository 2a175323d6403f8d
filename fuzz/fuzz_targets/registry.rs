#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Committed modules are user-editable; parsing one must fail cleanly, never panic
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = fixturegen::check::parse_registry(s);
    }
});
