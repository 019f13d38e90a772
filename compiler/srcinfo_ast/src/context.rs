//! The declaration arena.

use rustc_hash::FxHashMap;

mod build;
mod validate;

pub use validate::InvalidHandle;

use crate::decl::FieldDecl;
use crate::{
    AccessSpec, BaseSpecifier, Decl, DeclFlags, DeclId, DeclKind, Language, QualType,
    SourceRange, TypeKind, TypeRef,
};

/// A fully resolved translation unit.
///
/// Owns every type node and declaration. The translation unit declaration is
/// created with the context and always has id 0.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AstContext {
    language: Language,
    main_file: String,
    types: Vec<TypeKind>,
    decls: Vec<Decl>,
    /// Canonical declaration -> redeclaration chain in declaration order.
    redecls: FxHashMap<DeclId, Vec<DeclId>>,
    /// Canonical record declaration -> its `TypeKind::Record` node.
    record_types: FxHashMap<DeclId, TypeRef>,
}

impl AstContext {
    /// Create an empty unit whose primary source file is `main_file`.
    pub fn new(language: Language, main_file: impl Into<String>) -> Self {
        let main_file = main_file.into();
        let unit = Decl {
            id: DeclId::from_raw(0),
            name: None,
            parent: None,
            canonical: DeclId::from_raw(0),
            range: SourceRange::lines(&main_file, 1, 1),
            flags: DeclFlags::DEFINITION,
            kind: DeclKind::TranslationUnit,
        };
        let mut redecls = FxHashMap::default();
        redecls.insert(unit.id, vec![unit.id]);
        AstContext {
            language,
            main_file,
            types: Vec::new(),
            decls: vec![unit],
            redecls,
            record_types: FxHashMap::default(),
        }
    }

    #[inline]
    pub fn language(&self) -> Language {
        self.language
    }

    #[inline]
    pub fn main_file(&self) -> &str {
        &self.main_file
    }

    #[inline]
    pub const fn translation_unit(&self) -> DeclId {
        DeclId::from_raw(0)
    }

    // === Types ===

    /// Add a type node. Handles are never deduplicated.
    pub fn add_type(&mut self, kind: TypeKind) -> TypeRef {
        let raw = u32::try_from(self.types.len()).unwrap_or(u32::MAX);
        self.types.push(kind);
        TypeRef::from_raw(raw)
    }

    /// Look up a type node.
    ///
    /// # Panics
    /// Panics if `ty` was not created by this context.
    #[inline]
    pub fn ty(&self, ty: TypeRef) -> &TypeKind {
        &self.types[ty.index()]
    }

    /// The record type of a record declaration, created on first request.
    ///
    /// All redeclarations of one record share a single type node.
    pub fn record_type(&mut self, record: DeclId) -> TypeRef {
        let canonical = self.decl(record).canonical;
        if let Some(&ty) = self.record_types.get(&canonical) {
            return ty;
        }
        let ty = self.add_type(TypeKind::Record(canonical));
        self.record_types.insert(canonical, ty);
        ty
    }

    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    // === Declarations ===

    /// Declare a new entity inside `parent`.
    pub fn declare(
        &mut self,
        parent: DeclId,
        name: Option<&str>,
        range: SourceRange,
        kind: DeclKind,
    ) -> DeclId {
        let id = self.next_decl_id();
        self.decls.push(Decl {
            id,
            name: name.map(str::to_owned),
            parent: Some(parent),
            canonical: id,
            range,
            flags: DeclFlags::empty(),
            kind,
        });
        self.redecls.insert(id, vec![id]);
        id
    }

    /// Redeclare the entity `previous` belongs to.
    ///
    /// The new declaration inherits name and parent and joins the chain of
    /// `previous`'s canonical declaration.
    pub fn redeclare(&mut self, previous: DeclId, range: SourceRange, kind: DeclKind) -> DeclId {
        let id = self.next_decl_id();
        let prev = self.decl(previous);
        let canonical = prev.canonical;
        let decl = Decl {
            id,
            name: prev.name.clone(),
            parent: prev.parent,
            canonical,
            range,
            flags: DeclFlags::empty(),
            kind,
        };
        self.decls.push(decl);
        self.redecls.entry(canonical).or_default().push(id);
        id
    }

    /// Look up a declaration.
    ///
    /// # Panics
    /// Panics if `id` was not created by this context.
    #[inline]
    pub fn decl(&self, id: DeclId) -> &Decl {
        &self.decls[id.index()]
    }

    pub fn get_decl(&self, id: DeclId) -> Option<&Decl> {
        self.decls.get(id.index())
    }

    pub fn decl_mut(&mut self, id: DeclId) -> &mut Decl {
        &mut self.decls[id.index()]
    }

    /// Set classification bits on a declaration.
    pub fn add_flags(&mut self, id: DeclId, flags: DeclFlags) {
        self.decl_mut(id).flags |= flags;
    }

    /// All declarations in creation order (translation unit first).
    pub fn decls(&self) -> impl Iterator<Item = &Decl> {
        self.decls.iter()
    }

    /// Redeclaration chain of the entity `id` belongs to, in declaration order.
    pub fn redecls(&self, id: DeclId) -> &[DeclId] {
        let canonical = self.decl(id).canonical;
        self.redecls.get(&canonical).map_or(&[][..], Vec::as_slice)
    }

    /// The redeclaration carrying the definition, if any.
    pub fn definition(&self, id: DeclId) -> Option<&Decl> {
        self.redecls(id)
            .iter()
            .map(|&redecl| self.decl(redecl))
            .find(|decl| decl.is_definition())
    }

    /// Definition if present, canonical declaration otherwise.
    pub fn definition_or_canonical(&self, id: DeclId) -> &Decl {
        match self.definition(id) {
            Some(decl) => decl,
            None => self.decl(self.decl(id).canonical),
        }
    }

    // === Record construction helpers ===

    /// Append a field to a record declaration. Ignored for non-records.
    pub fn add_field(&mut self, record: DeclId, name: Option<&str>, ty: QualType, range: SourceRange) {
        if let Some(data) = self.record_mut(record) {
            data.fields.push(FieldDecl {
                name: name.map(str::to_owned),
                ty,
                range,
            });
        }
    }

    /// Append a direct base to a record declaration. Ignored for non-records.
    pub fn add_base(&mut self, record: DeclId, base: BaseSpecifier) {
        if let Some(data) = self.record_mut(record) {
            data.bases.push(base);
        }
    }

    /// Append an access label to a record declaration. Ignored for non-records.
    pub fn add_access_spec(&mut self, record: DeclId, spec: AccessSpec) {
        if let Some(data) = self.record_mut(record) {
            data.access_specs.push(spec);
        }
    }

    fn next_decl_id(&self) -> DeclId {
        DeclId::from_raw(u32::try_from(self.decls.len()).unwrap_or(u32::MAX))
    }
}
