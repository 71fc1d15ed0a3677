use std::iter::FusedIterator;
use std::marker::PhantomData;

use crate::data::{DataError, ReadableFontData};
use crate::record::Record;

/// Iterator over the records of a `RecordList`, in index order.
///
/// In lazy mode each step decodes one record straight from the table bytes;
/// the cursor snapshots the record base and count when it is created.  In
/// materialized mode it walks the owned records.  Either way, once the end is
/// reached `next()` keeps returning `None`.
#[derive(Debug, Clone)]
pub struct Iter<'l, T> {
    inner: Inner<'l, T>,
}

#[derive(Debug, Clone)]
enum Inner<'l, T> {
    Lazy {
        data:        ReadableFontData<'l>,
        record_base: usize,
        current:     usize,
        count:       usize,
        _marker:     PhantomData<T>,
    },
    Owned(std::slice::Iter<'l, T>),
}

impl<'l, T: Record> Iter<'l, T> {
    pub(crate) fn lazy(data: ReadableFontData<'l>, record_base: usize, count: usize) -> Self {
        Self {
            inner: Inner::Lazy { data, record_base, current: 0, count, _marker: PhantomData },
        }
    }

    pub(crate) fn owned(records: &'l [T]) -> Self {
        Self { inner: Inner::Owned(records.iter()) }
    }
}

impl<T: Record> Iterator for Iter<'_, T> {
    type Item = Result<T, DataError>;

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.inner {
            Inner::Lazy { data, record_base, current, count, .. } => {
                if *current >= *count {
                    return None;
                }
                let offset = *record_base + *current * T::RECORD_SIZE;
                *current += 1;
                Some(T::read_at(data, offset))
            }
            Inner::Owned(records) => records.next().cloned().map(Ok),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = match &self.inner {
            Inner::Lazy { current, count, .. } => count.saturating_sub(*current),
            Inner::Owned(records) => records.len(),
        };
        (remaining, Some(remaining))
    }
}

impl<T: Record> ExactSizeIterator for Iter<'_, T> {}

impl<T: Record> FusedIterator for Iter<'_, T> {}
