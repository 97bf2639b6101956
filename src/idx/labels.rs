//! Label file decoding.
//!
//! Layout (big-endian):
//!
//! | Offset | Size    | Field        |
//! |--------|---------|--------------|
//! | 0      | 4       | magic number |
//! | 4      | 4       | item count   |
//! | 8      | count   | label bytes  |

use std::fmt;
use std::io::{self, Cursor, Read, Seek, SeekFrom};

use serde::Serialize;

use super::header::{read_u32_be, validate_magic_number, RecordKind};
use super::state::HeaderState;
use super::stream::seekify;
use crate::error::MnistIdxError;

/// A single stored label byte.
///
/// Digit datasets only use `0..=9`, but any byte value is accepted.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct Label(pub u8);

impl Label {
    /// Creates a new Label.
    #[inline]
    pub fn new(value: u8) -> Self {
        Self(value)
    }

    /// Returns the underlying byte.
    #[inline]
    pub fn as_u8(&self) -> u8 {
        self.0
    }
}

impl fmt::Debug for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Label({})", self.0)
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<u8> for Label {
    fn from(value: u8) -> Self {
        Self(value)
    }
}

/// All labels of a file, in file order.
pub type LabelSet = Vec<Label>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct LabelHeader {
    num_labels: u32,
}

/// Random-access reader over a label file.
///
/// Call [`validate_header`](Self::validate_header) before any other accessor;
/// the accessors panic otherwise. The reader owns the stream cursor, so a
/// single instance must not be shared between concurrent readers.
#[derive(Debug)]
pub struct LabelReader<R> {
    source: R,
    state: HeaderState<LabelHeader>,
}

impl<R> LabelReader<R> {
    /// Wraps a seekable source. Nothing is read until the header is validated.
    pub fn new(source: R) -> Self {
        Self {
            source,
            state: HeaderState::Unvalidated,
        }
    }

    /// Returns true once the header has been validated.
    pub fn is_validated(&self) -> bool {
        self.state.is_validated()
    }

    /// Number of labels declared in the header.
    ///
    /// # Panics
    /// Panics if the header has not been validated.
    #[track_caller]
    pub fn num_labels(&self) -> usize {
        self.state.get().num_labels as usize
    }

    /// Borrows the underlying source.
    pub fn get_ref(&self) -> &R {
        &self.source
    }

    /// Mutably borrows the underlying source. Moving its cursor does not
    /// affect later reads, which always seek first.
    pub fn get_mut(&mut self) -> &mut R {
        &mut self.source
    }

    /// Unwraps the reader, returning the source.
    pub fn into_inner(self) -> R {
        self.source
    }
}

impl LabelReader<Cursor<Vec<u8>>> {
    /// Buffers a sequential-only source and wraps it.
    pub fn from_stream<S: Read>(stream: S) -> Result<Self, MnistIdxError> {
        Ok(Self::new(seekify(stream)?))
    }
}

impl<R: Read + Seek> LabelReader<R> {
    /// Parses the header. Calling it again after success is a no-op.
    ///
    /// On failure the reader stays unvalidated and may be retried.
    pub fn validate_header(&mut self) -> Result<(), MnistIdxError> {
        if self.state.is_validated() {
            return Ok(());
        }

        self.source.seek(SeekFrom::Start(0))?;
        validate_magic_number(&mut self.source, RecordKind::Labels)?;
        let num_labels = read_u32_be(&mut self.source)?;

        log::debug!("validated label header: {} labels", num_labels);
        self.state = HeaderState::Validated(LabelHeader { num_labels });
        Ok(())
    }

    /// Reads the label at `index`.
    ///
    /// `index` is not checked against the header count; reading past the end
    /// of the stream yields an I/O error.
    ///
    /// # Panics
    /// Panics if the header has not been validated.
    #[track_caller]
    pub fn read_label(&mut self, index: usize) -> Result<Label, MnistIdxError> {
        self.state.get();

        let offset = (index as u64)
            .checked_add(RecordKind::Labels.header_len())
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("offset of label {} overflows u64", index),
                )
            })?;
        self.source.seek(SeekFrom::Start(offset))?;

        let mut buf = [0u8; 1];
        self.source.read_exact(&mut buf)?;
        Ok(Label(buf[0]))
    }

    /// Validates the header if needed and reads every label in order.
    pub fn decode_all(&mut self) -> Result<LabelSet, MnistIdxError> {
        self.validate_header()?;
        (0..self.num_labels())
            .map(|index| self.read_label(index))
            .collect()
    }
}

/// Decodes a complete label file from a seekable source.
pub fn read_label_set<R: Read + Seek>(source: R) -> Result<LabelSet, MnistIdxError> {
    LabelReader::new(source).decode_all()
}

/// Decodes a complete label file from any reader, buffering it first.
pub fn read_label_set_from_stream<R: Read>(stream: R) -> Result<LabelSet, MnistIdxError> {
    LabelReader::from_stream(stream)?.decode_all()
}
