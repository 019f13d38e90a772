use pretty_assertions::assert_eq;
use srcinfo_ast::DeclId;

use super::*;
use crate::{FieldRef, PrimitiveKind, RecordKind};

fn int_descriptor() -> TypeDescriptor {
    TypeDescriptor::Primitive {
        kind: PrimitiveKind::SignedInt,
        bits: 32,
        name: "int".to_owned(),
    }
}

fn int_key() -> CanonicalKey {
    CanonicalKey::Primitive {
        kind: PrimitiveKind::SignedInt,
        bits: 32,
        spelling: None,
    }
}

#[test]
fn ids_are_sequential_in_first_encounter_order() {
    let mut cache = TypeCache::new();
    let int = cache.intern(int_key(), int_descriptor());
    let ptr = cache.intern(
        CanonicalKey::Pointer {
            target: int.id(),
            is_const: false,
        },
        TypeDescriptor::Pointer {
            target: int.id(),
            is_const: false,
        },
    );

    assert_eq!(int, Interned::New(TypeId::from_raw(0)));
    assert_eq!(ptr, Interned::New(TypeId::from_raw(1)));
    assert_eq!(cache.len(), 2);
}

#[test]
fn equal_keys_share_one_id() {
    let mut cache = TypeCache::new();
    let first = cache.intern(int_key(), int_descriptor());
    let second = cache.intern(
        int_key(),
        TypeDescriptor::Primitive {
            kind: PrimitiveKind::SignedInt,
            bits: 32,
            name: "signed".to_owned(),
        },
    );

    assert!(first.is_new());
    assert_eq!(second, Interned::Existing(first.id()));
    assert_eq!(cache.len(), 1);
    // The first spelling wins.
    assert_eq!(cache.get(first.id()), Some(&int_descriptor()));
}

#[test]
fn reserved_record_is_visible_before_it_is_filled() {
    let mut cache = TypeCache::new();
    let key = CanonicalKey::Record(DeclId::from_raw(7));
    let shell = TypeDescriptor::Record {
        kind: RecordKind::Struct,
        name: "Node".to_owned(),
        template_args: Vec::new(),
        fields: Vec::new(),
    };
    let node = cache.intern(key.clone(), shell).id();

    // A member lookup during expansion resolves to the reservation.
    assert_eq!(cache.lookup(&key), Some(node));
    let next = cache
        .intern(
            CanonicalKey::Pointer {
                target: node,
                is_const: false,
            },
            TypeDescriptor::Pointer {
                target: node,
                is_const: false,
            },
        )
        .id();

    if let Some(TypeDescriptor::Record { fields, .. }) = cache.descriptor_mut(node) {
        fields.push(FieldRef {
            name: "next".to_owned(),
            ty: next,
        });
    }

    assert_eq!(cache.get(node).map(TypeDescriptor::children), Some(vec![next]));
    assert_eq!(cache.get(next).map(TypeDescriptor::children), Some(vec![node]));
}

#[test]
fn iter_yields_allocation_order() {
    let mut cache = TypeCache::new();
    cache.intern(int_key(), int_descriptor());
    cache.intern(
        CanonicalKey::Opaque("__m128".to_owned()),
        TypeDescriptor::Opaque {
            spelling: "__m128".to_owned(),
        },
    );

    let tags: Vec<_> = cache.iter().map(|(id, d)| (id.raw(), d.tag())).collect();
    assert_eq!(tags, vec![(0, "prim"), (1, "opaque")]);
}
