//! Decoders for the IDX container format.
//!
//! An IDX file starts with a 4-byte big-endian magic number identifying its
//! record kind, followed by big-endian `u32` dimension fields and a flat
//! payload. Two record kinds are supported:
//!
//! - label files (one byte per item)
//! - image files (`rows * cols` intensity bytes per item, row-major)
//!
//! Both decoders follow the same pattern: validate the header once, then
//! seek to an item's offset and read it by index. Decoding needs random
//! access, so sequential-only sources go through [`seekify`] first.
//!
//! # Example
//!
//! ```
//! use std::io::Cursor;
//! use mnistidx::idx::{LabelReader, Label};
//!
//! let bytes = vec![0, 0, 8, 1, 0, 0, 0, 2, 7, 3];
//! let mut reader = LabelReader::new(Cursor::new(bytes));
//! reader.validate_header().unwrap();
//!
//! assert_eq!(reader.num_labels(), 2);
//! assert_eq!(reader.read_label(1).unwrap(), Label::new(3));
//! ```

pub mod color;
mod header;
mod images;
mod labels;
mod state;
mod stream;

// Re-export core types for convenient access
pub use header::{validate_magic_number, RecordKind};
pub use images::{read_image_set, read_image_set_from_stream, Image, ImageReader, ImageSet};
pub use labels::{read_label_set, read_label_set_from_stream, Label, LabelReader, LabelSet};
pub use stream::{seekify, ReadSeek};
