//! Fuzz target for DOCX template reading.
//!
//! Arbitrary bytes must produce paragraphs or an error, never a panic.

#![no_main]

use libfuzzer_sys::fuzz_target;
use peticao::providers::DocxTemplate;

fuzz_target!(|data: &[u8]| {
    let _ = DocxTemplate.paragraphs_from_bytes(data);
});
