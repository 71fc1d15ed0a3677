//! The record capability shared by every fixed-size record kind.

use crate::data::{DataError, ReadableFontData, WritableFontData};

/// A fixed-size encoded unit inside a counted record list.
///
/// Implementors decode from and encode to an exact `RECORD_SIZE`-byte span.
/// Equality is value equality and drives `RecordList::contains`.
pub trait Record: Clone + PartialEq + Sized {
    /// Encoded size in bytes.  Every record of a kind has the same size.
    const RECORD_SIZE: usize;

    /// Decode one record starting at `offset`.
    fn read_at(data: &ReadableFontData<'_>, offset: usize) -> Result<Self, DataError>;

    /// Encode this record at `offset` and return the number of bytes written.
    fn write_to(&self, data: &mut WritableFontData, offset: usize) -> Result<usize, DataError>;
}
