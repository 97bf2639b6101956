//! Magic-number validation and header field parsing.

use std::fmt;
use std::io::{self, Read};

use serde::Serialize;

use crate::error::MnistIdxError;

/// The two kinds of record an IDX file can hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    /// One unsigned byte per item.
    Labels,
    /// `rows * cols` intensity bytes per item.
    Images,
}

impl RecordKind {
    /// The magic number a file of this kind starts with.
    pub fn magic(&self) -> i32 {
        match self {
            RecordKind::Labels => 0x0000_0801,
            RecordKind::Images => 0x0000_0803,
        }
    }

    /// Total header size in bytes, magic number included.
    pub fn header_len(&self) -> u64 {
        match self {
            RecordKind::Labels => 8,
            RecordKind::Images => 16,
        }
    }

    /// Human-readable name for the record kind.
    pub fn name(&self) -> &'static str {
        match self {
            RecordKind::Labels => "label",
            RecordKind::Images => "image",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Reads a big-endian `i32` at the current position and checks it against
/// the magic number for `kind`.
///
/// # Errors
/// - [`MnistIdxError::InvalidMagicNumber`] if four bytes were read but differ
///   from the expected constant.
/// - [`MnistIdxError::Io`] if fewer than four bytes are available.
pub fn validate_magic_number<R: Read>(reader: &mut R, kind: RecordKind) -> Result<(), MnistIdxError> {
    let mut buf = [0u8; 4];
    reader.read_exact(&mut buf)?;

    let found = i32::from_be_bytes(buf);
    if found != kind.magic() {
        return Err(MnistIdxError::InvalidMagicNumber {
            kind,
            expected: kind.magic(),
            found,
        });
    }
    Ok(())
}

/// Reads one big-endian `u32` header field.
pub(crate) fn read_u32_be<R: Read>(reader: &mut R) -> io::Result<u32> {
    let mut buf = [0u8; 4];
    reader.read_exact(&mut buf)?;
    Ok(u32::from_be_bytes(buf))
}
