use pretty_assertions::assert_eq;

use super::*;
use crate::{
    FileEntry, FileId, NamespaceEntry, PrimitiveKind, RecordEntry, RecordId, RecordKind,
    TypeDescriptor, TypeEntry, TypeId,
};

fn sample() -> GraphDocument {
    let int = TypeId::from_raw(0);
    let node = TypeId::from_raw(1);
    GraphDocument {
        main_file: "main.cpp".to_owned(),
        files: vec![FileEntry {
            id: FileId::from_raw(0),
            path: "main.cpp".to_owned(),
        }],
        namespaces: vec![
            NamespaceEntry {
                path: Vec::new(),
                types: vec![TypeEntry {
                    id: int,
                    descriptor: TypeDescriptor::Primitive {
                        kind: PrimitiveKind::SignedInt,
                        bits: 32,
                        name: "int".to_owned(),
                    },
                }],
                ..NamespaceEntry::default()
            },
            NamespaceEntry {
                path: vec!["list".to_owned()],
                types: vec![TypeEntry {
                    id: node,
                    descriptor: TypeDescriptor::Record {
                        kind: RecordKind::Struct,
                        name: "list::Node".to_owned(),
                        template_args: Vec::new(),
                        fields: Vec::new(),
                    },
                }],
                records: vec![RecordEntry {
                    id: RecordId::from_raw(0),
                    name: "Node".to_owned(),
                    qualified_name: "list::Node".to_owned(),
                    kind: RecordKind::Struct,
                    type_id: node,
                    bases: Vec::new(),
                    access_specs: Vec::new(),
                    body: None,
                }],
                ..NamespaceEntry::default()
            },
        ],
    }
}

fn encoded(document: &GraphDocument) -> Vec<u8> {
    let mut bytes = Vec::new();
    encode(document, &mut bytes).unwrap_or_else(|e| panic!("encode failed: {e}"));
    bytes
}

#[test]
fn header_precedes_payload() {
    let bytes = encoded(&sample());
    assert_eq!(&bytes[..4], b"SRCG");
    assert_eq!(&bytes[4..8], &1u32.to_le_bytes());
}

#[test]
fn document_survives_round_trip() {
    let document = sample();
    let decoded = decode(encoded(&document).as_slice()).unwrap_or_else(|e| panic!("decode failed: {e}"));
    assert_eq!(decoded, document);
    assert_eq!(decoded.namespace(&["list"]).map(|ns| ns.records.len()), Some(1));
}

#[test]
fn encoding_is_deterministic() {
    assert_eq!(encoded(&sample()), encoded(&sample()));
}

#[test]
fn rejects_foreign_bytes() {
    let result = decode(&b"ELF\x7f\x01\x00\x00\x00rest"[..]);
    assert!(matches!(result, Err(GraphError::BadMagic)), "got {result:?}");

    let result = decode(&b"SRC"[..]);
    assert!(matches!(result, Err(GraphError::BadMagic)), "got {result:?}");
}

#[test]
fn rejects_newer_versions() {
    let mut bytes = encoded(&sample());
    bytes[4..8].copy_from_slice(&7u32.to_le_bytes());
    let result = decode(bytes.as_slice());
    assert!(
        matches!(result, Err(GraphError::UnsupportedVersion { found: 7 })),
        "got {result:?}"
    );
}

#[test]
fn truncated_payload_is_a_decode_error() {
    let bytes = encoded(&sample());
    let result = decode(&bytes[..bytes.len() - 3]);
    assert!(matches!(result, Err(GraphError::Decode(_))), "got {result:?}");
}

#[test]
fn oversized_length_prefix_is_a_decode_error() {
    let mut bytes = encoded(&sample())[..8].to_vec();
    // `main_file` claims to be nearly 16 EiB long.
    bytes.extend_from_slice(&[0xff; 8]);
    bytes.extend_from_slice(b"main.cpp");
    let result = decode(bytes.as_slice());
    assert!(
        matches!(&result, Err(GraphError::Decode(err)) if matches!(**err, bincode::ErrorKind::SizeLimit)),
        "got {result:?}"
    );
}
