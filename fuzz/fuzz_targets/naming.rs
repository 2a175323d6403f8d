#![no_main]

use fixturegen::NameStyle;
use fixturegen_core::to_test_case_name;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Convert bytes to UTF-8 string (ignore invalid UTF-8)
    if let Ok(s) = std::str::from_utf8(data) {
        for style in [NameStyle::Camel, NameStyle::Snake] {
            let name = to_test_case_name(s, style);
            assert!(syn::parse_str::<syn::Ident>(name.as_str()).is_ok(), "{name}");
        }
    }
});
