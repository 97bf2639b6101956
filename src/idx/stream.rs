//! Random-access adapters over byte sources.

use std::io::{self, Cursor, Read, Seek};

/// A byte source that supports both sequential reads and absolute seeks.
///
/// Every `Read + Seek` type satisfies this automatically, so files and
/// cursors can be handed to the decoders as they are.
pub trait ReadSeek: Read + Seek {}

impl<T: Read + Seek + ?Sized> ReadSeek for T {}

/// Upgrades a sequential-only reader to a seekable one.
///
/// The reader is drained to exhaustion into an owned buffer. Sources that
/// already implement [`Seek`] do not need this and can be used directly.
///
/// # Errors
/// Returns the underlying I/O error if the source fails before EOF; no
/// partially filled buffer is ever returned.
pub fn seekify<R: Read>(mut reader: R) -> io::Result<Cursor<Vec<u8>>> {
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf)?;
    log::debug!("buffered {} bytes from sequential source", buf.len());
    Ok(Cursor::new(buf))
}
