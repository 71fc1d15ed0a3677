use proptest::prelude::*;
use sfnt_records::{
    HEADER_SIZE, ListLayout, RangeRecord, ReadableFontData, Record, RecordList, WritableFontData,
};

fn range_record() -> impl Strategy<Value = RangeRecord> {
    (any::<u16>(), any::<u16>(), any::<u16>()).prop_map(|(a, b, c)| RangeRecord::new(a, b, c))
}

/// `prefix` filler bytes, then a count field holding `records.len() + decrement`.
fn encode(prefix: usize, decrement: u16, records: &[RangeRecord]) -> Vec<u8> {
    let len = prefix + HEADER_SIZE + records.len() * RangeRecord::RECORD_SIZE;
    let mut out = WritableFontData::from_vec(vec![0x5A; len]);
    out.write_u16(prefix, records.len() as u16 + decrement).unwrap();
    for (i, record) in records.iter().enumerate() {
        record.write_to(&mut out, prefix + HEADER_SIZE + i * RangeRecord::RECORD_SIZE).unwrap();
    }
    out.into_vec()
}

proptest! {
    #[test]
    fn count_is_field_minus_decrement(
        records in prop::collection::vec(range_record(), 0..32),
        prefix in 0usize..16,
        decrement in 0u16..4,
    ) {
        let bytes = encode(prefix, decrement, &records);
        let layout = ListLayout { record_base_offset: 0, count_decrement: decrement };
        let list = RecordList::<RangeRecord>::with_layout(ReadableFontData::new(&bytes), prefix, layout).unwrap();
        prop_assert_eq!(list.count(), records.len());
        prop_assert_eq!(list.limit(), bytes.len());
    }

    #[test]
    fn lazy_get_matches_iteration_and_direct_decode(
        records in prop::collection::vec(range_record(), 0..32),
        prefix in 0usize..16,
    ) {
        let bytes = encode(prefix, 0, &records);
        let data = ReadableFontData::new(&bytes);
        let list = RecordList::<RangeRecord>::with_layout(data, prefix, ListLayout::default()).unwrap();
        for (i, item) in list.iter().enumerate() {
            let item = item.unwrap();
            prop_assert_eq!(list.get(i).unwrap(), item);
            let direct = RangeRecord::read_at(&data, list.record_base() + i * RangeRecord::RECORD_SIZE).unwrap();
            prop_assert_eq!(item, direct);
        }
        prop_assert!(!list.is_materialized());
    }

    #[test]
    fn write_then_reread_preserves_records(
        records in prop::collection::vec(range_record(), 0..32),
        extra in prop::collection::vec(range_record(), 0..8),
    ) {
        let bytes = encode(0, 0, &records);
        let mut list = RecordList::<RangeRecord>::new(ReadableFontData::new(&bytes)).unwrap();
        list.add_all(extra.clone()).unwrap();

        let mut out = WritableFontData::with_len(list.limit());
        let written = list.write_to(&mut out).unwrap();
        prop_assert_eq!(written, HEADER_SIZE + list.count() * RangeRecord::RECORD_SIZE);

        let reread = RecordList::<RangeRecord>::new(out.as_readable()).unwrap();
        let expected: Vec<_> = records.iter().chain(extra.iter()).copied().collect();
        prop_assert_eq!(reread.count(), expected.len());
        for (i, record) in expected.iter().enumerate() {
            prop_assert_eq!(&reread.get(i).unwrap(), record);
        }
    }

    #[test]
    fn contains_iff_present(
        records in prop::collection::vec(range_record(), 0..16),
        probe in range_record(),
    ) {
        let bytes = encode(0, 0, &records);
        let mut list = RecordList::<RangeRecord>::new(ReadableFontData::new(&bytes)).unwrap();
        let expected = records.contains(&probe);
        prop_assert_eq!(list.contains(&probe).unwrap(), expected);
        list.prefetch().unwrap();
        prop_assert_eq!(list.contains(&probe).unwrap(), expected);
    }
}
