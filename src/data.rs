//! Bounds-checked big-endian font data buffers.
//!
//! [`ReadableFontData`] is a borrowed, copyable view over table bytes.
//! [`WritableFontData`] owns a fixed-length, zero-initialised byte buffer.
//!
//! # Endianness
//! Every multi-byte primitive is big-endian, as in all sfnt tables.
//!
//! # Bounds
//! Every access is checked against the buffer length before any byte is
//! touched.  A failed access returns [`DataError::OutOfBounds`] and leaves
//! the buffer unchanged.

use byteorder::{BigEndian, ByteOrder};
use thiserror::Error;

// ── Error type ───────────────────────────────────────────────────────────────

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DataError {
    #[error("Access of {len} bytes at offset {offset} is outside data of length {size}")]
    OutOfBounds { offset: usize, len: usize, size: usize },
}

fn checked_range(offset: usize, len: usize, size: usize) -> Result<std::ops::Range<usize>, DataError> {
    match offset.checked_add(len) {
        Some(end) if end <= size => Ok(offset..end),
        _ => Err(DataError::OutOfBounds { offset, len, size }),
    }
}

// ── Readable ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadableFontData<'a> {
    bytes: &'a [u8],
}

impl<'a> ReadableFontData<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// Borrow exactly `len` bytes starting at `offset`.
    pub fn bytes_at(&self, offset: usize, len: usize) -> Result<&'a [u8], DataError> {
        let range = checked_range(offset, len, self.bytes.len())?;
        Ok(&self.bytes[range])
    }

    pub fn read_u8(&self, offset: usize) -> Result<u8, DataError> {
        Ok(self.bytes_at(offset, 1)?[0])
    }

    /// Unsigned 16-bit value (`USHORT`, `uint16`).
    pub fn read_u16(&self, offset: usize) -> Result<u16, DataError> {
        Ok(BigEndian::read_u16(self.bytes_at(offset, 2)?))
    }

    pub fn read_i16(&self, offset: usize) -> Result<i16, DataError> {
        Ok(BigEndian::read_i16(self.bytes_at(offset, 2)?))
    }

    pub fn read_u32(&self, offset: usize) -> Result<u32, DataError> {
        Ok(BigEndian::read_u32(self.bytes_at(offset, 4)?))
    }

    pub fn read_i32(&self, offset: usize) -> Result<i32, DataError> {
        Ok(BigEndian::read_i32(self.bytes_at(offset, 4)?))
    }

    /// Four raw tag bytes, e.g. `b"latn"`.
    pub fn read_tag(&self, offset: usize) -> Result<[u8; 4], DataError> {
        let mut tag = [0u8; 4];
        tag.copy_from_slice(self.bytes_at(offset, 4)?);
        Ok(tag)
    }
}

impl<'a> From<&'a [u8]> for ReadableFontData<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Self::new(bytes)
    }
}

// ── Writable ─────────────────────────────────────────────────────────────────

/// Fixed-length output buffer.  Writes never grow it; the caller sizes it
/// up front (see `RecordList::limit`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WritableFontData {
    bytes: Vec<u8>,
}

impl WritableFontData {
    /// A zero-filled buffer of `len` bytes.
    pub fn with_len(len: usize) -> Self {
        Self { bytes: vec![0u8; len] }
    }

    pub fn from_vec(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Read view over the current content.
    pub fn as_readable(&self) -> ReadableFontData<'_> {
        ReadableFontData::new(&self.bytes)
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.bytes
    }

    fn slot(&mut self, offset: usize, len: usize) -> Result<&mut [u8], DataError> {
        let range = checked_range(offset, len, self.bytes.len())?;
        Ok(&mut self.bytes[range])
    }

    pub fn write_u8(&mut self, offset: usize, value: u8) -> Result<usize, DataError> {
        self.slot(offset, 1)?[0] = value;
        Ok(1)
    }

    pub fn write_u16(&mut self, offset: usize, value: u16) -> Result<usize, DataError> {
        BigEndian::write_u16(self.slot(offset, 2)?, value);
        Ok(2)
    }

    pub fn write_i16(&mut self, offset: usize, value: i16) -> Result<usize, DataError> {
        BigEndian::write_i16(self.slot(offset, 2)?, value);
        Ok(2)
    }

    pub fn write_u32(&mut self, offset: usize, value: u32) -> Result<usize, DataError> {
        BigEndian::write_u32(self.slot(offset, 4)?, value);
        Ok(4)
    }

    pub fn write_i32(&mut self, offset: usize, value: i32) -> Result<usize, DataError> {
        BigEndian::write_i32(self.slot(offset, 4)?, value);
        Ok(4)
    }

    pub fn write_tag(&mut self, offset: usize, tag: &[u8; 4]) -> Result<usize, DataError> {
        self.slot(offset, 4)?.copy_from_slice(tag);
        Ok(4)
    }
}
