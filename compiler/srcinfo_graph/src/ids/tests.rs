use super::*;

#[test]
fn ids_are_dense_from_table_length() {
    assert_eq!(TypeId::next(0).raw(), 0);
    assert_eq!(TypeId::next(7).raw(), 7);
    assert_eq!(RecordId::next(3).index(), 3);
}

#[test]
fn none_sentinel_works() {
    assert!(TypeId::NONE.is_none());
    assert!(!TypeId::from_raw(0).is_none());
    assert_eq!(format!("{:?}", RecordId::NONE), "RecordId(NONE)");
}

#[test]
fn display_uses_kind_prefix() {
    assert_eq!(TypeId::from_raw(4).to_string(), "t4");
    assert_eq!(RecordId::from_raw(1).to_string(), "r1");
    assert_eq!(FunctionId::from_raw(0).to_string(), "f0");
    assert_eq!(VarId::from_raw(2).to_string(), "v2");
    assert_eq!(FileId::from_raw(9).to_string(), "file9");
}

#[test]
fn ids_encode_as_bare_integers() {
    let bytes = bincode::serialize(&TypeId::from_raw(42))
        .unwrap_or_else(|e| panic!("serialize failed: {e}"));
    let raw = bincode::serialize(&42u32).unwrap_or_else(|e| panic!("serialize failed: {e}"));
    assert_eq!(bytes, raw);
}
