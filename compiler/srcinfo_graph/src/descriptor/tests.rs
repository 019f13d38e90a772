use pretty_assertions::assert_eq;

use super::*;

fn t(raw: u32) -> TypeId {
    TypeId::from_raw(raw)
}

#[test]
fn pointer_const_placement_gives_distinct_keys() {
    let const_pointer = TypeDescriptor::Pointer {
        target: t(0),
        is_const: true,
    };
    let pointer_to_const = TypeDescriptor::Pointer {
        target: t(1),
        is_const: false,
    };

    assert_ne!(
        CanonicalKey::structural(&const_pointer),
        CanonicalKey::structural(&pointer_to_const)
    );
}

#[test]
fn primitive_key_ignores_spelling_for_numeric_kinds() {
    let int = TypeDescriptor::Primitive {
        kind: PrimitiveKind::SignedInt,
        bits: 32,
        name: "int".to_owned(),
    };
    let signed = TypeDescriptor::Primitive {
        kind: PrimitiveKind::SignedInt,
        bits: 32,
        name: "signed int".to_owned(),
    };
    assert_eq!(CanonicalKey::structural(&int), CanonicalKey::structural(&signed));
}

#[test]
fn primitive_key_keeps_spelling_for_other_kind() {
    let boolean = TypeDescriptor::Primitive {
        kind: PrimitiveKind::Other,
        bits: 8,
        name: "bool".to_owned(),
    };
    let byte = TypeDescriptor::Primitive {
        kind: PrimitiveKind::Other,
        bits: 8,
        name: "std::byte".to_owned(),
    };
    assert_ne!(CanonicalKey::structural(&boolean), CanonicalKey::structural(&byte));
}

#[test]
fn identity_keyed_descriptors_have_no_structural_key() {
    let record = TypeDescriptor::Record {
        kind: RecordKind::Struct,
        name: "Node".to_owned(),
        template_args: Vec::new(),
        fields: Vec::new(),
    };
    let alias = TypeDescriptor::Alias {
        name: "size_t".to_owned(),
        underlying: t(0),
    };
    assert_eq!(CanonicalKey::structural(&record), None);
    assert_eq!(CanonicalKey::structural(&alias), None);
}

#[test]
fn children_follow_field_order() {
    let record = TypeDescriptor::Record {
        kind: RecordKind::Class,
        name: "Pair<int, float>".to_owned(),
        template_args: vec![t(1), t(2)],
        fields: vec![
            FieldRef {
                name: "first".to_owned(),
                ty: t(1),
            },
            FieldRef {
                name: "second".to_owned(),
                ty: t(2),
            },
        ],
    };
    assert_eq!(record.children(), vec![t(1), t(2), t(1), t(2)]);

    let signature = TypeDescriptor::FunctionSignature {
        ret: t(0),
        params: vec![t(3), t(4)],
        is_variadic: true,
    };
    assert_eq!(signature.children(), vec![t(0), t(3), t(4)]);
}

#[test]
fn display_renders_ids() {
    let pointer = TypeDescriptor::Pointer {
        target: t(2),
        is_const: true,
    };
    assert_eq!(pointer.to_string(), "t2* const");

    let signature = TypeDescriptor::FunctionSignature {
        ret: t(0),
        params: vec![t(1)],
        is_variadic: true,
    };
    assert_eq!(signature.to_string(), "fn(t1, ...) -> t0");

    let array = TypeDescriptor::Array {
        element: t(5),
        length: None,
    };
    assert_eq!(array.to_string(), "t5[]");
}

#[test]
fn key_display_is_stable() {
    let key = CanonicalKey::Function {
        ret: t(0),
        params: vec![t(1), t(2)],
        is_variadic: false,
    };
    assert_eq!(key.to_string(), "fn(t0;t1, t2)");
    assert_eq!(
        CanonicalKey::Pointer {
            target: t(3),
            is_const: true
        }
        .to_string(),
        "ptr(t3,const)"
    );
}
