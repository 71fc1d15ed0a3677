pub mod data;
pub mod record;
pub mod record_list;
pub mod records;

pub use data::{DataError, ReadableFontData, WritableFontData};
pub use record::Record;
pub use record_list::{BoundRecordList, ListError, ListLayout, RecordList, COUNT_OFFSET, HEADER_SIZE};
pub use records::{LookupRecord, NumRecord, RangeRecord, TagOffsetRecord};
