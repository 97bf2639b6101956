#![allow(dead_code)]

use proptest::prelude::*;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(64);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

/// Arbitrary label payloads, including values outside the digit range.
pub fn arb_labels(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..=max_len)
}

/// An image file layout plus a matching pixel payload.
#[derive(Clone, Debug)]
pub struct ImageFileSpec {
    pub count: u32,
    pub rows: u32,
    pub cols: u32,
    pub pixels: Vec<u8>,
}

impl ImageFileSpec {
    pub fn image_len(&self) -> usize {
        (self.rows * self.cols) as usize
    }
}

pub fn arb_image_file(max_count: u32, max_side: u32) -> impl Strategy<Value = ImageFileSpec> {
    (0..=max_count, 1..=max_side, 1..=max_side).prop_flat_map(|(count, rows, cols)| {
        let len = (count * rows * cols) as usize;
        prop::collection::vec(any::<u8>(), len).prop_map(move |pixels| ImageFileSpec {
            count,
            rows,
            cols,
            pixels,
        })
    })
}
