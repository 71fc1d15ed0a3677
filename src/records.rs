//! Fixed-size OpenType layout records that live in counted lists.
//!
//! | Kind | Size | Found in |
//! |------|------|----------|
//! | [`NumRecord`] | 2 | glyph arrays, lookup index lists, feature index lists |
//! | [`LookupRecord`] | 4 | contextual substitution/positioning |
//! | [`RangeRecord`] | 6 | coverage format 2, class definition format 2 |
//! | [`TagOffsetRecord`] | 6 | script, language system and feature lists |

use crate::data::{DataError, ReadableFontData, WritableFontData};
use crate::record::Record;
use crate::record_list::{ListError, RecordList};

// ── NumRecord ────────────────────────────────────────────────────────────────

/// A single `uint16`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NumRecord {
    pub value: u16,
}

impl NumRecord {
    pub fn new(value: u16) -> Self {
        Self { value }
    }
}

impl From<u16> for NumRecord {
    fn from(value: u16) -> Self {
        Self::new(value)
    }
}

impl Record for NumRecord {
    const RECORD_SIZE: usize = 2;

    fn read_at(data: &ReadableFontData<'_>, offset: usize) -> Result<Self, DataError> {
        Ok(Self { value: data.read_u16(offset)? })
    }

    fn write_to(&self, data: &mut WritableFontData, offset: usize) -> Result<usize, DataError> {
        data.write_u16(offset, self.value)
    }
}

impl RecordList<'_, NumRecord> {
    /// All values in list order.
    pub fn values(&self) -> Result<Vec<u16>, ListError> {
        let mut values = Vec::with_capacity(self.count());
        for record in self.iter() {
            values.push(record?.value);
        }
        Ok(values)
    }
}

// ── LookupRecord ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LookupRecord {
    /// Index into the current glyph sequence.
    pub sequence_index:    u16,
    pub lookup_list_index: u16,
}

impl LookupRecord {
    pub fn new(sequence_index: u16, lookup_list_index: u16) -> Self {
        Self { sequence_index, lookup_list_index }
    }
}

impl Record for LookupRecord {
    const RECORD_SIZE: usize = 4;

    fn read_at(data: &ReadableFontData<'_>, offset: usize) -> Result<Self, DataError> {
        Ok(Self {
            sequence_index:    data.read_u16(offset)?,
            lookup_list_index: data.read_u16(offset + 2)?,
        })
    }

    fn write_to(&self, data: &mut WritableFontData, offset: usize) -> Result<usize, DataError> {
        let mut written = data.write_u16(offset, self.sequence_index)?;
        written += data.write_u16(offset + written, self.lookup_list_index)?;
        Ok(written)
    }
}

// ── RangeRecord ──────────────────────────────────────────────────────────────

/// Inclusive glyph range `start..=end` mapped to consecutive coverage indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RangeRecord {
    pub start:                u16,
    pub end:                  u16,
    pub start_coverage_index: u16,
}

impl RangeRecord {
    pub fn new(start: u16, end: u16, start_coverage_index: u16) -> Self {
        Self { start, end, start_coverage_index }
    }

    pub fn contains_glyph(&self, glyph: u16) -> bool {
        (self.start..=self.end).contains(&glyph)
    }

    /// Coverage index of `glyph`, if it falls in this range.
    pub fn coverage_index(&self, glyph: u16) -> Option<u16> {
        if !self.contains_glyph(glyph) {
            return None;
        }
        self.start_coverage_index.checked_add(glyph - self.start)
    }
}

impl Record for RangeRecord {
    const RECORD_SIZE: usize = 6;

    fn read_at(data: &ReadableFontData<'_>, offset: usize) -> Result<Self, DataError> {
        Ok(Self {
            start:                data.read_u16(offset)?,
            end:                  data.read_u16(offset + 2)?,
            start_coverage_index: data.read_u16(offset + 4)?,
        })
    }

    fn write_to(&self, data: &mut WritableFontData, offset: usize) -> Result<usize, DataError> {
        let mut written = data.write_u16(offset, self.start)?;
        written += data.write_u16(offset + written, self.end)?;
        written += data.write_u16(offset + written, self.start_coverage_index)?;
        Ok(written)
    }
}

impl RecordList<'_, RangeRecord> {
    /// Coverage index of `glyph` from the first range containing it.
    pub fn coverage_index(&self, glyph: u16) -> Result<Option<u16>, ListError> {
        for range in self.iter() {
            let range = range?;
            if range.contains_glyph(glyph) {
                return Ok(range.coverage_index(glyph));
            }
        }
        Ok(None)
    }
}

// ── TagOffsetRecord ──────────────────────────────────────────────────────────

/// A 4-byte tag and a 16-bit offset from the start of the owning table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TagOffsetRecord {
    pub tag:    [u8; 4],
    pub offset: u16,
}

impl TagOffsetRecord {
    pub fn new(tag: [u8; 4], offset: u16) -> Self {
        Self { tag, offset }
    }

    /// Tag as text, for diagnostics.
    pub fn tag_str(&self) -> String {
        String::from_utf8_lossy(&self.tag).into_owned()
    }
}

impl Record for TagOffsetRecord {
    const RECORD_SIZE: usize = 6;

    fn read_at(data: &ReadableFontData<'_>, offset: usize) -> Result<Self, DataError> {
        Ok(Self {
            tag:    data.read_tag(offset)?,
            offset: data.read_u16(offset + 4)?,
        })
    }

    fn write_to(&self, data: &mut WritableFontData, offset: usize) -> Result<usize, DataError> {
        let mut written = data.write_tag(offset, &self.tag)?;
        written += data.write_u16(offset + written, self.offset)?;
        Ok(written)
    }
}

impl RecordList<'_, TagOffsetRecord> {
    /// First record carrying `tag`.
    pub fn record_for_tag(&self, tag: &[u8; 4]) -> Result<Option<TagOffsetRecord>, ListError> {
        for record in self.iter() {
            let record = record?;
            if &record.tag == tag {
                return Ok(Some(record));
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_coverage_index() {
        let range = RangeRecord::new(10, 20, 5);
        assert_eq!(range.coverage_index(9), None);
        assert_eq!(range.coverage_index(10), Some(5));
        assert_eq!(range.coverage_index(20), Some(15));
        assert_eq!(range.coverage_index(21), None);
    }

    #[test]
    fn range_list_lookup() {
        // coverage format 2 body: rangeCount = 2
        let bytes = [0, 2, 0, 1, 0, 3, 0, 0, 0, 10, 0, 11, 0, 3];
        let list = RecordList::<RangeRecord>::new(ReadableFontData::new(&bytes)).unwrap();
        assert_eq!(list.coverage_index(2).unwrap(), Some(1));
        assert_eq!(list.coverage_index(11).unwrap(), Some(4));
        assert_eq!(list.coverage_index(5).unwrap(), None);
    }

    #[test]
    fn tag_lookup() {
        let bytes = [0, 2, b'D', b'F', b'L', b'T', 0, 14, b'l', b'a', b't', b'n', 0, 40];
        let list = RecordList::<TagOffsetRecord>::new(ReadableFontData::new(&bytes)).unwrap();
        let latn = list.record_for_tag(b"latn").unwrap().unwrap();
        assert_eq!(latn.offset, 40);
        assert_eq!(latn.tag_str(), "latn");
        assert_eq!(list.record_for_tag(b"cyrl").unwrap(), None);
    }

    #[test]
    fn num_values() {
        let bytes = [0, 3, 0, 7, 1, 0, 0xFF, 0xFF];
        let list = RecordList::<NumRecord>::new(ReadableFontData::new(&bytes)).unwrap();
        assert_eq!(list.values().unwrap(), vec![7, 256, 0xFFFF]);
    }

    #[test]
    fn record_write_reports_size() {
        let mut out = WritableFontData::with_len(6);
        let record = TagOffsetRecord::new(*b"kern", 0x0102);
        assert_eq!(record.write_to(&mut out, 0).unwrap(), TagOffsetRecord::RECORD_SIZE);
        assert_eq!(TagOffsetRecord::read_at(&out.as_readable(), 0).unwrap(), record);
    }
}
