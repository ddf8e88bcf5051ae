use std::io;

use bytes::Bytes;

/// A bounds-checked cursor over an immutable byte buffer.
///
/// This is an [`io::Cursor`] over a [`Bytes`] object, which enables zero copy
/// extraction of sub-slices.
pub type BytesCursor = io::Cursor<Bytes>;

/// Zero-copy read helpers for a [`BytesCursor`].
///
/// Every read either succeeds and advances the position, or fails with
/// [`io::ErrorKind::UnexpectedEof`] and leaves the position untouched. The
/// cursor never reads past the end of the buffer.
pub trait BytesCursorExt {
    /// Bytes left between the current position and the end of the buffer.
    fn remaining(&self) -> usize;

    /// Extracts the next `size` bytes from the cursor.
    ///
    /// This is O(1) and does not copy: the returned [`Bytes`] shares storage
    /// with the underlying buffer. Fails if fewer than `size` bytes remain.
    fn extract_bytes(&mut self, size: usize) -> io::Result<Bytes>;

    /// Extracts everything left in the cursor, empty when nothing remains.
    fn extract_remaining(&mut self) -> Bytes;
}

impl BytesCursorExt for BytesCursor {
    fn remaining(&self) -> usize {
        self.get_ref().len().saturating_sub(self.position() as usize)
    }

    fn extract_bytes(&mut self, size: usize) -> io::Result<Bytes> {
        if size == 0 {
            return Ok(Bytes::new());
        }

        if size > self.remaining() {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "not enough bytes",
            ));
        }

        let start = self.position() as usize;
        let slice = self.get_ref().slice(start..start + size);
        self.set_position((start + size) as u64);

        Ok(slice)
    }

    fn extract_remaining(&mut self) -> Bytes {
        self.extract_bytes(self.remaining()).unwrap_or_default()
    }
}
