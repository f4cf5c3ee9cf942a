//! Fuzz target for FieldExtractor.
//!
//! The extractor must never panic and must always return every field.

#![no_main]

use libfuzzer_sys::fuzz_target;
use peticao::FieldExtractor;

fuzz_target!(|data: &[u8]| {
    if data.len() > 20_000 {
        return;
    }

    let text = String::from_utf8_lossy(data);
    let fields = FieldExtractor::new().extract(&text);
    assert_eq!(fields.len(), 8);
});
