//! Image file decoding.
//!
//! Layout (big-endian):
//!
//! | Offset | Size                 | Field                 |
//! |--------|----------------------|-----------------------|
//! | 0      | 4                    | magic number          |
//! | 4      | 4                    | item count            |
//! | 8      | 4                    | row count (height)    |
//! | 12     | 4                    | column count (width)  |
//! | 16     | rows * cols * count  | intensity bytes       |
//!
//! Pixels are stored image-major, then row-major, one byte each.

use std::io::{self, Cursor, Read, Seek, SeekFrom};

use image::{DynamicImage, ImageBuffer, Rgba};

use super::color::{to_color, to_intensity};
use super::header::{read_u32_be, validate_magic_number, RecordKind};
use super::state::HeaderState;
use super::stream::seekify;
use crate::error::MnistIdxError;

/// A decoded grayscale image.
///
/// Each byte is a stored intensity, not yet color-mapped; use
/// [`color_at`](Self::color_at) or [`to_rgba16`](Self::to_rgba16) to render.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Image {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Image {
    /// Builds an image from a row-major intensity buffer.
    ///
    /// Returns `None` if `data.len() != width * height`.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Option<Self> {
        let expected = u64::from(width) * u64::from(height);
        if data.len() as u64 != expected {
            return None;
        }
        Some(Self {
            width,
            height,
            data,
        })
    }

    /// Converts an arbitrary image into stored intensities.
    pub fn from_dynamic_image(image: &DynamicImage) -> Self {
        let rgba = image.to_rgba16();
        let data = rgba.pixels().map(|pixel| to_intensity(*pixel)).collect();
        Self {
            width: rgba.width(),
            height: rgba.height(),
            data,
        }
    }

    /// Column count.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Row count.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns `(width, height)`.
    pub fn bounds(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// The raw intensity buffer, row-major.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consumes the image, returning its intensity buffer.
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Stored intensity at column `x`, row `y`.
    ///
    /// # Panics
    /// Panics if the offset `y * width + x` is outside the buffer.
    #[inline]
    pub fn pixel_at(&self, x: u32, y: u32) -> u8 {
        self.data[y as usize * self.width as usize + x as usize]
    }

    /// Color of the pixel at column `x`, row `y`.
    #[inline]
    pub fn color_at(&self, x: u32, y: u32) -> Rgba<u16> {
        to_color(self.pixel_at(x, y))
    }

    /// Renders every pixel into a 16-bit RGBA buffer.
    pub fn to_rgba16(&self) -> ImageBuffer<Rgba<u16>, Vec<u16>> {
        ImageBuffer::from_fn(self.width, self.height, |x, y| self.color_at(x, y))
    }
}

/// All images of a file, in file order.
pub type ImageSet = Vec<Image>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct ImageHeader {
    num_images: u32,
    rows: u32,
    cols: u32,
}

impl ImageHeader {
    fn image_len(&self) -> u64 {
        u64::from(self.rows) * u64::from(self.cols)
    }
}

/// Random-access reader over an image file.
///
/// Call [`validate_header`](Self::validate_header) before any other accessor;
/// the accessors panic otherwise. The reader owns the stream cursor, so a
/// single instance must not be shared between concurrent readers.
#[derive(Debug)]
pub struct ImageReader<R> {
    source: R,
    state: HeaderState<ImageHeader>,
}

impl<R> ImageReader<R> {
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

    /// Number of images declared in the header.
    ///
    /// # Panics
    /// Panics if the header has not been validated.
    #[track_caller]
    pub fn num_images(&self) -> usize {
        self.state.get().num_images as usize
    }

    /// `(width, height)` shared by every image in the file.
    ///
    /// # Panics
    /// Panics if the header has not been validated.
    #[track_caller]
    pub fn dimensions(&self) -> (u32, u32) {
        let header = self.state.get();
        (header.cols, header.rows)
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

impl ImageReader<Cursor<Vec<u8>>> {
    /// Buffers a sequential-only source and wraps it.
    pub fn from_stream<S: Read>(stream: S) -> Result<Self, MnistIdxError> {
        Ok(Self::new(seekify(stream)?))
    }
}

impl<R: Read + Seek> ImageReader<R> {
    /// Parses the header. Calling it again after success is a no-op.
    ///
    /// On failure the reader stays unvalidated and may be retried.
    pub fn validate_header(&mut self) -> Result<(), MnistIdxError> {
        if self.state.is_validated() {
            return Ok(());
        }

        self.source.seek(SeekFrom::Start(0))?;
        validate_magic_number(&mut self.source, RecordKind::Images)?;
        let num_images = read_u32_be(&mut self.source)?;
        let rows = read_u32_be(&mut self.source)?;
        let cols = read_u32_be(&mut self.source)?;

        log::debug!(
            "validated image header: {} images of {}x{}",
            num_images,
            cols,
            rows
        );
        self.state = HeaderState::Validated(ImageHeader {
            num_images,
            rows,
            cols,
        });
        Ok(())
    }

    /// Reads the image at `index`.
    ///
    /// `index` is not checked against the header count; reading past the end
    /// of the stream yields an I/O error. A short read is an error, never a
    /// partially filled image.
    ///
    /// # Panics
    /// Panics if the header has not been validated.
    #[track_caller]
    pub fn read_image(&mut self, index: usize) -> Result<Image, MnistIdxError> {
        let header = *self.state.get();
        let image_len = header.image_len();

        let offset = (index as u64)
            .checked_mul(image_len)
            .and_then(|off| off.checked_add(RecordKind::Images.header_len()))
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("offset of image {} overflows u64", index),
                )
            })?;
        let buf_len = usize::try_from(image_len).map_err(|_| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("image size {} does not fit in memory", image_len),
            )
        })?;

        self.source.seek(SeekFrom::Start(offset))?;
        let mut data = vec![0u8; buf_len];
        self.source.read_exact(&mut data)?;

        Ok(Image {
            width: header.cols,
            height: header.rows,
            data,
        })
    }

    /// Validates the header if needed and reads every image in order.
    pub fn decode_all(&mut self) -> Result<ImageSet, MnistIdxError> {
        self.validate_header()?;
        (0..self.num_images())
            .map(|index| self.read_image(index))
            .collect()
    }
}

/// Decodes a complete image file from a seekable source.
pub fn read_image_set<R: Read + Seek>(source: R) -> Result<ImageSet, MnistIdxError> {
    ImageReader::new(source).decode_all()
}

/// Decodes a complete image file from any reader, buffering it first.
pub fn read_image_set_from_stream<R: Read>(stream: R) -> Result<ImageSet, MnistIdxError> {
    ImageReader::from_stream(stream)?.decode_all()
}
