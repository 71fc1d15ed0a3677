//! Counted lists of fixed-size records with lazy reads and copy-on-write edits.
//!
//! # Layout
//! ```text
//! base ─► +--------------+---------------------+----------+----------+---
//!         | count (u16)  | reserved (optional) | record 0 | record 1 | ...
//!         +--------------+---------------------+----------+----------+---
//!                                              ▲
//!                       record_base = base + HEADER_SIZE + record_base_offset
//! ```
//! The count field may store `count + count_decrement` (some tables count the
//! first element implicitly); the decrement is a layout parameter.
//!
//! # States
//! A list starts **lazy**: only the count field has been read, and every
//! `get`, `contains` or iteration step decodes directly from the table bytes.
//! The first `add`, `add_all`, `prefetch` or write **materializes** it: all
//! records are decoded once into an owned `Vec`, which is authoritative from
//! then on.  There is no way back to the lazy state.
//!
//! # Writing
//! [`RecordList::write_to`] serializes the count and every record into any
//! [`WritableFontData`].  A list bound to its own output with
//! [`RecordList::bind`] becomes a [`BoundRecordList`], the only type that
//! offers a plain `write()`.

mod iter;

use std::ops::{Deref, DerefMut};

use thiserror::Error;
use tracing::{debug, trace};

use crate::data::{DataError, ReadableFontData, WritableFontData};
use crate::record::Record;

pub use iter::Iter;

/// Offset of the count field relative to the list base.
pub const COUNT_OFFSET: usize = 0;
/// Bytes occupied by the count field.
pub const HEADER_SIZE:  usize = 2;

// ── Error type ───────────────────────────────────────────────────────────────

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ListError {
    #[error("Record index {index} out of range for list of {count} records")]
    IndexOutOfRange { index: usize, count: usize },
    #[error("Record base offset {record_base_offset} overflows the address space from base {base}")]
    LayoutOverflow { base: usize, record_base_offset: usize },
    /// The count field holds fewer than `count_decrement`; no negative count is produced.
    #[error("Count field {raw} at offset {base} is smaller than count decrement {decrement}")]
    CountUnderflow { base: usize, raw: u16, decrement: u16 },
    #[error("List of {count} records does not fit a 16-bit count field")]
    CountOverflow { count: usize },
    #[error("Data error: {0}")]
    Data(#[from] DataError),
}

// ── ListLayout ───────────────────────────────────────────────────────────────

/// Header layout knobs for [`RecordList::with_layout`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListLayout {
    /// Extra header bytes between the count field and the first record.
    pub record_base_offset: usize,
    /// Amount by which the stored count exceeds the number of records.
    pub count_decrement:    u16,
}

// ── RecordList ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
enum Records<'a, T> {
    Lazy { data: ReadableFontData<'a>, count: usize },
    Owned(Vec<T>),
}

#[derive(Debug, Clone)]
pub struct RecordList<'a, T> {
    base:            usize,
    record_base:     usize,
    count_decrement: u16,
    records:         Records<'a, T>,
}

impl<'a, T: Record> RecordList<'a, T> {
    /// List at offset 0 with the default layout.
    pub fn new(data: ReadableFontData<'a>) -> Result<Self, ListError> {
        Self::with_layout(data, 0, ListLayout::default())
    }

    /// List at offset 0 whose count field over-counts by `count_decrement`.
    pub fn with_count_decrement(data: ReadableFontData<'a>, count_decrement: u16) -> Result<Self, ListError> {
        Self::with_layout(data, 0, ListLayout { count_decrement, ..ListLayout::default() })
    }

    /// List whose count field sits at `base`.
    ///
    /// Reads the count field and nothing else.  The layout is rejected when a
    /// full list (`u16::MAX` records) at `base` would not be addressable.
    pub fn with_layout(data: ReadableFontData<'a>, base: usize, layout: ListLayout) -> Result<Self, ListError> {
        let record_base = base
            .checked_add(HEADER_SIZE)
            .and_then(|offset| offset.checked_add(layout.record_base_offset))
            .filter(|offset| {
                usize::from(u16::MAX)
                    .checked_mul(T::RECORD_SIZE)
                    .and_then(|extent| offset.checked_add(extent))
                    .is_some()
            })
            .ok_or(ListError::LayoutOverflow { base, record_base_offset: layout.record_base_offset })?;
        let raw = data.read_u16(base + COUNT_OFFSET)?;
        let count = raw.checked_sub(layout.count_decrement).ok_or(ListError::CountUnderflow {
            base,
            raw,
            decrement: layout.count_decrement,
        })?;
        trace!(base, raw, count, "opened record list");
        Ok(Self {
            base,
            record_base,
            count_decrement: layout.count_decrement,
            records: Records::Lazy { data, count: usize::from(count) },
        })
    }

    pub fn base(&self) -> usize {
        self.base
    }

    /// Offset of the first record.
    pub fn record_base(&self) -> usize {
        self.record_base
    }

    pub fn count(&self) -> usize {
        match &self.records {
            Records::Lazy { count, .. } => *count,
            Records::Owned(records) => records.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    pub fn is_materialized(&self) -> bool {
        matches!(self.records, Records::Owned(_))
    }

    /// One past the last record byte.
    pub fn limit(&self) -> usize {
        self.offset_of(self.count())
    }

    // Exact for any index a 16-bit count can address; saturates beyond that.
    fn offset_of(&self, index: usize) -> usize {
        self.record_base.saturating_add(index.saturating_mul(T::RECORD_SIZE))
    }

    /// Record at `index`.  In lazy mode this decodes on every call.
    pub fn get(&self, index: usize) -> Result<T, ListError> {
        let count = self.count();
        if index >= count {
            return Err(ListError::IndexOutOfRange { index, count });
        }
        match &self.records {
            Records::Lazy { data, .. } => Ok(T::read_at(data, self.offset_of(index))?),
            Records::Owned(records) => Ok(records[index].clone()),
        }
    }

    /// Linear scan for a record equal to `record`.
    pub fn contains(&self, record: &T) -> Result<bool, ListError> {
        if let Records::Owned(records) = &self.records {
            return Ok(records.contains(record));
        }
        for candidate in self.iter() {
            if candidate? == *record {
                return Ok(true);
            }
        }
        Ok(false)
    }

    pub fn iter(&self) -> Iter<'_, T> {
        match &self.records {
            Records::Lazy { data, count } => Iter::lazy(*data, self.record_base, *count),
            Records::Owned(records) => Iter::owned(records),
        }
    }

    /// Append one record, materializing first.
    pub fn add(&mut self, record: T) -> Result<&mut Self, ListError> {
        self.materialize()?.push(record);
        Ok(self)
    }

    /// Append every record of `records` in order, materializing first.
    pub fn add_all<I>(&mut self, records: I) -> Result<&mut Self, ListError>
    where
        I: IntoIterator<Item = T>,
    {
        self.materialize()?.extend(records);
        Ok(self)
    }

    /// Decode every record into owned storage now.  No-op once materialized.
    pub fn prefetch(&mut self) -> Result<(), ListError> {
        self.materialize().map(|_| ())
    }

    fn materialize(&mut self) -> Result<&mut Vec<T>, ListError> {
        match self.records {
            Records::Owned(ref mut records) => Ok(records),
            Records::Lazy { data, count } => {
                let mut owned = Vec::with_capacity(count);
                for record in Iter::<T>::lazy(data, self.record_base, count) {
                    owned.push(record?);
                }
                debug!(base = self.base, count, "materialized record list");
                self.records = Records::Owned(owned);
                // now owned
                self.materialize()
            }
        }
    }

    /// Serialize the count field and all records into `data`.
    ///
    /// Returns `HEADER_SIZE` plus the bytes written for records.  `data` must
    /// hold at least [`limit`](Self::limit) bytes.
    pub fn write_to(&mut self, data: &mut WritableFontData) -> Result<usize, ListError> {
        let base = self.base;
        let record_base = self.record_base;
        let count_decrement = self.count_decrement;
        let records = self.materialize()?;

        let stored = records
            .len()
            .checked_add(usize::from(count_decrement))
            .and_then(|n| u16::try_from(n).ok())
            .ok_or(ListError::CountOverflow { count: records.len() })?;
        data.write_u16(base + COUNT_OFFSET, stored)?;

        let mut cursor = record_base;
        for record in records.iter() {
            cursor += record.write_to(data, cursor)?;
        }
        let written = cursor - record_base + HEADER_SIZE;
        trace!(base, count = records.len(), written, "wrote record list");
        Ok(written)
    }

    /// Attach an output buffer so the list can be written with `write()`.
    pub fn bind<'w>(self, data: &'w mut WritableFontData) -> BoundRecordList<'a, 'w, T> {
        BoundRecordList { list: self, data }
    }
}

impl<'l, 'a, T: Record> IntoIterator for &'l RecordList<'a, T> {
    type Item = Result<T, DataError>;
    type IntoIter = Iter<'l, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ── BoundRecordList ──────────────────────────────────────────────────────────

/// A [`RecordList`] paired with the buffer it writes to.
#[derive(Debug)]
pub struct BoundRecordList<'a, 'w, T> {
    list: RecordList<'a, T>,
    data: &'w mut WritableFontData,
}

impl<'a, 'w, T: Record> BoundRecordList<'a, 'w, T> {
    /// Serialize into the bound buffer.  See [`RecordList::write_to`].
    pub fn write(&mut self) -> Result<usize, ListError> {
        self.list.write_to(self.data)
    }

    pub fn data(&self) -> &WritableFontData {
        &*self.data
    }

    pub fn into_inner(self) -> RecordList<'a, T> {
        self.list
    }
}

impl<'a, T> Deref for BoundRecordList<'a, '_, T> {
    type Target = RecordList<'a, T>;

    fn deref(&self) -> &Self::Target {
        &self.list
    }
}

impl<T> DerefMut for BoundRecordList<'_, '_, T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.list
    }
}
