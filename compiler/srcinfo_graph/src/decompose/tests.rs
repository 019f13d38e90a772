use pretty_assertions::assert_eq;
use srcinfo_ast::{BuiltinClass, Language, SourceRange, TagKind};

use super::*;

fn unit() -> AstContext {
    AstContext::new(Language::Cxx, "main.cpp")
}

fn at(line: u32) -> SourceRange {
    SourceRange::lines("main.cpp", line, line)
}

#[test]
fn suffix_const_stays_on_pointer_layer() {
    let mut ctx = unit();
    let int = ctx.builtin(BuiltinClass::SignedInt, 32, "int");
    let ptr = ctx.pointer(int);

    // int* const
    let shape = decompose(&ctx, QualType::constant(ptr));
    assert_eq!(
        shape,
        Shape::Pointer {
            pointee: QualType::new(int),
            is_const: true
        }
    );
}

#[test]
fn prefix_const_moves_to_pointee() {
    let mut ctx = unit();
    let int = ctx.builtin(BuiltinClass::SignedInt, 32, "int");
    let ptr = ctx.pointer(QualType::constant(int));

    // const int*
    let shape = decompose(&ctx, QualType::new(ptr));
    assert_eq!(
        shape,
        Shape::Pointer {
            pointee: QualType::constant(int),
            is_const: false
        }
    );
    assert_eq!(
        decompose(&ctx, QualType::constant(int)),
        Shape::Const(QualType::new(int))
    );
}

#[test]
fn typedef_reports_its_own_const() {
    let mut ctx = unit();
    let tu = ctx.translation_unit();
    let int = ctx.builtin(BuiltinClass::SignedInt, 32, "int");
    let ptr = ctx.pointer(int);
    let alias = ctx.typedef(tu, "IntPtr", ptr, at(1));
    let alias_ty = ctx
        .typedef_type(alias)
        .unwrap_or_else(|| panic!("typedef type"));

    // const IntPtr
    assert_eq!(
        decompose(&ctx, QualType::constant(alias_ty)),
        Shape::Alias {
            decl: alias,
            underlying: QualType::new(ptr),
            is_const: true,
        }
    );
}

#[test]
fn array_const_applies_to_elements() {
    let mut ctx = unit();
    let int = ctx.builtin(BuiltinClass::SignedInt, 32, "int");
    let array = ctx.array(int, Some(4));

    assert_eq!(
        decompose(&ctx, QualType::constant(array)),
        Shape::Array {
            element: QualType::constant(int),
            length: Some(4)
        }
    );
}

#[test]
fn variable_length_array_has_no_length() {
    let mut ctx = unit();
    let int = ctx.builtin(BuiltinClass::SignedInt, 32, "int");
    let array = ctx.array(int, None);

    assert_eq!(
        decompose(&ctx, array.into()),
        Shape::Array {
            element: QualType::new(int),
            length: None
        }
    );
}

#[test]
fn references_peel_one_layer() {
    let mut ctx = unit();
    let int = ctx.builtin(BuiltinClass::SignedInt, 32, "int");
    let lref = ctx.lvalue_ref(QualType::constant(int));
    let rref = ctx.rvalue_ref(int);

    assert_eq!(
        decompose(&ctx, lref.into()),
        Shape::LValueRef(QualType::constant(int))
    );
    assert_eq!(decompose(&ctx, rref.into()), Shape::RValueRef(int.into()));
}

#[test]
fn sugar_is_transparent_and_keeps_const() {
    let mut ctx = unit();
    let unit_decl = ctx.translation_unit();
    let record = ctx.record(unit_decl, Some("S"), TagKind::Struct, at(1));
    let record_ty = ctx.record_type(record);
    let elaborated = ctx.add_type(TypeKind::Elaborated(record_ty.into()));
    let paren = ctx.add_type(TypeKind::Paren(QualType::constant(elaborated)));

    assert_eq!(decompose(&ctx, paren.into()), Shape::Const(record_ty.into()));
    assert_eq!(
        decompose(&ctx, elaborated.into()),
        Shape::Record { decl: record }
    );
}

#[test]
fn resolved_specialization_decomposes_to_record() {
    let mut ctx = unit();
    let unit_decl = ctx.translation_unit();
    let int = ctx.builtin(BuiltinClass::SignedInt, 32, "int");
    let record = ctx.record(unit_decl, Some("Box"), TagKind::Class, at(1));
    let record_ty = ctx.record_type(record);
    let spec = ctx.add_type(TypeKind::TemplateSpecialization {
        template_name: "Box".to_owned(),
        args: vec![TemplateArg::Type(int.into())],
        aliased: Some(record_ty.into()),
    });

    assert_eq!(decompose(&ctx, spec.into()), Shape::Record { decl: record });
}

#[test]
fn dependent_specialization_is_terminal() {
    let mut ctx = unit();
    let int = ctx.builtin(BuiltinClass::SignedInt, 32, "int");
    let args = vec![TemplateArg::Type(int.into())];
    let spec = ctx.add_type(TypeKind::TemplateSpecialization {
        template_name: "vector".to_owned(),
        args: args.clone(),
        aliased: None,
    });

    assert_eq!(
        decompose(&ctx, spec.into()),
        Shape::Specialization {
            template_name: "vector",
            args: &args
        }
    );
}

#[test]
fn primitives_capture_category_and_width() {
    let mut ctx = unit();
    let uchar = ctx.builtin(BuiltinClass::UnsignedInt, 8, "unsigned char");
    let double = ctx.builtin(BuiltinClass::Float, 64, "double");

    assert_eq!(
        decompose(&ctx, uchar.into()),
        Shape::Primitive {
            kind: PrimitiveKind::UnsignedInt,
            bits: 8,
            spelling: "unsigned char"
        }
    );
    assert_eq!(
        decompose(&ctx, double.into()),
        Shape::Primitive {
            kind: PrimitiveKind::Float,
            bits: 64,
            spelling: "double"
        }
    );
}

#[test]
fn cyclic_sugar_is_opaque() {
    let mut ctx = unit();
    // Paren pointing at itself: handle 0 refers to handle 0.
    let looped = ctx.add_type(TypeKind::Paren(QualType::new(srcinfo_ast::TypeRef::from_raw(0))));
    assert_eq!(looped.raw(), 0);

    assert!(desugar(&ctx, looped.into()).is_none());
    assert!(matches!(
        decompose(&ctx, looped.into()),
        Shape::Opaque { .. }
    ));
}

#[test]
fn unsupported_shape_is_opaque() {
    let mut ctx = unit();
    let vector = ctx.add_type(TypeKind::Unsupported {
        spelling: "__m128".to_owned(),
    });
    assert_eq!(
        decompose(&ctx, vector.into()),
        Shape::Opaque { spelling: "__m128" }
    );
}

#[test]
fn packs_expand_and_non_type_args_drop() {
    let mut ctx = unit();
    let int = ctx.builtin(BuiltinClass::SignedInt, 32, "int");
    let float = ctx.builtin(BuiltinClass::Float, 32, "float");
    let args = vec![
        TemplateArg::Type(int.into()),
        TemplateArg::Pack(vec![
            TemplateArg::Type(float.into()),
            TemplateArg::Integral {
                value: 3,
                ty: int.into(),
            },
            TemplateArg::Type(int.into()),
        ]),
        TemplateArg::Expression("N + 1".to_owned()),
    ];

    let flat = flatten_template_args(&args);
    assert_eq!(
        flat.types,
        vec![QualType::new(int), QualType::new(float), QualType::new(int)]
    );
    assert_eq!(flat.dropped.len(), 2);
}
