//! Fuzz target for label file decoding.
//!
//! This fuzzer feeds arbitrary byte sequences to the label decoder,
//! checking for panics, overflows, or other undefined behavior.
//!
//! Run with:
//!   cargo +nightly fuzz run label_file_parse

#![no_main]

use std::io::Cursor;

use libfuzzer_sys::fuzz_target;
use mnistidx::idx::read_label_set;

fuzz_target!(|data: &[u8]| {
    // The header count is untrusted, but every read is bounded by the
    // input length, so no size cap is needed here.
    let _ = read_label_set(Cursor::new(data));
});
