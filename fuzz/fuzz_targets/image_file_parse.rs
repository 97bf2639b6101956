//! Fuzz target for image file decoding.
//!
//! This fuzzer feeds arbitrary byte sequences to the image decoder,
//! including headers with huge dimensions and item counts.
//!
//! Run with:
//!   cargo +nightly fuzz run image_file_parse

#![no_main]

use std::io::Cursor;

use libfuzzer_sys::fuzz_target;
use mnistidx::idx::{ImageReader, RecordKind};

fuzz_target!(|data: &[u8]| {
    // Cap input size to avoid OOM on very large inputs.
    if data.len() > 1024 * 1024 {
        return;
    }

    let mut reader = ImageReader::new(Cursor::new(data));
    if reader.validate_header().is_err() {
        return;
    }

    // Header dimensions are untrusted: skip images larger than the input
    // itself, since allocating them would only exercise the allocator.
    let (width, height) = reader.dimensions();
    let image_len = u64::from(width) * u64::from(height);
    if image_len > (data.len() as u64).saturating_sub(RecordKind::Images.header_len()) {
        return;
    }

    for index in 0..reader.num_images().min(64) {
        if reader.read_image(index).is_err() {
            break;
        }
    }
});
