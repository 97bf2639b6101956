#![allow(dead_code)]

use std::fs;
use std::io::{self, Read};
use std::path::Path;

pub const LABEL_MAGIC: i32 = 0x0000_0801;
pub const IMAGE_MAGIC: i32 = 0x0000_0803;

pub fn label_file_bytes(labels: &[u8]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(8 + labels.len());
    bytes.extend_from_slice(&LABEL_MAGIC.to_be_bytes());
    bytes.extend_from_slice(&(labels.len() as u32).to_be_bytes());
    bytes.extend_from_slice(labels);
    bytes
}

/// `pixels` holds every image back to back, `rows * cols` bytes each.
pub fn image_file_bytes(count: u32, rows: u32, cols: u32, pixels: &[u8]) -> Vec<u8> {
    assert_eq!(pixels.len(), (count * rows * cols) as usize, "pixel payload size");

    let mut bytes = Vec::with_capacity(16 + pixels.len());
    bytes.extend_from_slice(&IMAGE_MAGIC.to_be_bytes());
    bytes.extend_from_slice(&count.to_be_bytes());
    bytes.extend_from_slice(&rows.to_be_bytes());
    bytes.extend_from_slice(&cols.to_be_bytes());
    bytes.extend_from_slice(pixels);
    bytes
}

pub fn write_file(path: &Path, bytes: &[u8]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dir");
    }
    fs::write(path, bytes).expect("write idx file");
}

/// A reader that hides `Seek`, like a pipe or socket.
pub struct Unseekable<'a>(pub &'a [u8]);

impl Read for Unseekable<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        // Hand out at most 3 bytes per call to exercise short reads
        let n = buf.len().min(3);
        self.0.read(&mut buf[..n])
    }
}
