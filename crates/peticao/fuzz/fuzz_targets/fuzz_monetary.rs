//! Fuzz target for currency parsing and formatting.

#![no_main]

use libfuzzer_sys::fuzz_target;
use peticao::{format_currency, parse_monetary};

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        if let Some(value) = parse_monetary(input) {
            let _ = format_currency(value);
        }
    }
});
