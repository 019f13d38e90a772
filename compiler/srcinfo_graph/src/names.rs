//! Qualified name resolution.
//!
//! Names are split in two parts:
//! - the **namespace path** (root first) that selects a namespace group, and
//! - the **scoped name** inside that namespace: the entity's own name,
//!   prefixed by its enclosing records for nested declarations.
//!
//! Anonymous entities get a synthetic `__anon_<kind>_<id>` name built from the
//! canonical declaration id. Template entities carry a `<...>` suffix with
//! their argument spellings, or `type_0`, `type_1`, ... placeholders for
//! primary templates.
//!
//! All results are cached per declaration for the lifetime of a session.

use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;
use srcinfo_ast::{AstContext, Decl, DeclId, DeclKind, QualType, TemplateArg, TemplateInfo, TypeKind};

use crate::decompose::desugar;
use crate::stack::ensure_sufficient_stack;

/// Separator between scope segments in rendered names.
pub const SCOPE_SEPARATOR: &str = "::";

#[derive(Default)]
pub struct NameResolver {
    /// Enclosing namespace (`None` = global) -> path, root first.
    paths: FxHashMap<Option<DeclId>, Vec<String>>,
    /// Canonical declaration -> scoped name.
    scoped: FxHashMap<DeclId, String>,
    /// Declarations whose scoped name is being computed.
    in_progress: FxHashSet<DeclId>,
}

impl NameResolver {
    pub fn new() -> Self {
        Self::default()
    }

    // === Namespace chains ===

    /// Namespace path enclosing `decl`, root first. Empty for the global scope.
    ///
    /// For a namespace declaration this is the path of the namespace itself.
    pub fn namespace_path(&mut self, ctx: &AstContext, decl: DeclId) -> Vec<String> {
        let start = if matches!(ctx.decl(decl).kind, DeclKind::Namespace) {
            Some(ctx.decl(decl).canonical)
        } else {
            next_enclosing_namespace(ctx, decl)
        };
        if let Some(path) = self.paths.get(&start) {
            return path.clone();
        }

        let mut visited: SmallVec<[DeclId; 8]> = SmallVec::new();
        let mut current = start;
        while let Some(ns) = current {
            if visited.contains(&ns) {
                tracing::warn!(namespace = %ns, "namespace chain revisits a context, truncating");
                break;
            }
            visited.push(ns);
            current = next_enclosing_namespace(ctx, ns);
        }

        let path: Vec<String> = visited
            .iter()
            .rev()
            .map(|&ns| own_identifier(ctx.decl(ns)))
            .collect();
        self.paths.insert(start, path.clone());
        path
    }

    // === Entity names ===

    /// Name of `decl` inside its namespace (`Outer::Inner<int>`, `Widget::draw`).
    pub fn scoped_name(&mut self, ctx: &AstContext, decl: DeclId) -> String {
        let canonical = ctx.decl(decl).canonical;
        if let Some(name) = self.scoped.get(&canonical) {
            return name.clone();
        }
        if !self.in_progress.insert(canonical) {
            // Re-entered through a template argument naming this entity.
            return own_identifier(ctx.decl(canonical));
        }

        let name = ensure_sufficient_stack(|| {
            let own = self.own_name(ctx, canonical);
            match ctx.decl(canonical).parent {
                Some(parent) if matches!(ctx.decl(parent).kind, DeclKind::Record(_)) => {
                    let prefix = self.scoped_name(ctx, parent);
                    format!("{prefix}{SCOPE_SEPARATOR}{own}")
                }
                _ => own,
            }
        });

        self.in_progress.remove(&canonical);
        self.scoped.insert(canonical, name.clone());
        name
    }

    /// Fully qualified name: namespace path followed by the scoped name.
    pub fn qualified_name(&mut self, ctx: &AstContext, decl: DeclId) -> String {
        let mut segments = self.namespace_path(ctx, decl);
        segments.push(self.scoped_name(ctx, decl));
        segments.join(SCOPE_SEPARATOR)
    }

    /// The entity's own name plus its template suffix.
    fn own_name(&mut self, ctx: &AstContext, decl: DeclId) -> String {
        let mut name = own_identifier(ctx.decl(decl));
        let template = match &ctx.definition_or_canonical(decl).kind {
            DeclKind::Record(record) => &record.template,
            DeclKind::Function(function) => &function.template,
            _ => return name,
        };
        match template {
            TemplateInfo::None => {}
            TemplateInfo::Primary { param_count } => {
                let params: Vec<String> = (0..*param_count).map(|i| format!("type_{i}")).collect();
                name.push('<');
                name.push_str(&params.join(","));
                name.push('>');
            }
            TemplateInfo::Specialization { args } => {
                name.push('<');
                name.push_str(&self.spell_template_args(ctx, args));
                name.push('>');
            }
        }
        name
    }

    // === Type spelling ===

    /// Printable spelling of a type (`const Widget*`, `int* const`, `int&`).
    pub fn spell_type(&mut self, ctx: &AstContext, qt: QualType) -> String {
        ensure_sufficient_stack(|| self.spell_layer(ctx, qt))
    }

    fn spell_layer(&mut self, ctx: &AstContext, qt: QualType) -> String {
        let Some(qt) = desugar(ctx, qt) else {
            return "<cyclic type sugar>".to_owned();
        };
        match ctx.ty(qt.ty) {
            TypeKind::Pointer(pointee) => {
                let mut spelled = self.spell_type(ctx, *pointee);
                spelled.push('*');
                if qt.is_const {
                    spelled.push_str(" const");
                }
                spelled
            }
            TypeKind::LValueReference(target) => self.spell_type(ctx, *target) + "&",
            TypeKind::RValueReference(target) => self.spell_type(ctx, *target) + "&&",
            TypeKind::Array { element, size } => {
                let element = self.spell_type(ctx, element.with_const(qt.is_const));
                match size {
                    Some(n) => format!("{element}[{n}]"),
                    None => format!("{element}[]"),
                }
            }
            terminal => {
                let base = match terminal {
                    TypeKind::Builtin { spelling, .. } | TypeKind::Unsupported { spelling } => {
                        spelling.clone()
                    }
                    TypeKind::Record(decl) | TypeKind::Typedef { decl, .. } => {
                        self.qualified_name(ctx, *decl)
                    }
                    TypeKind::FunctionProto {
                        ret,
                        params,
                        variadic,
                    } => {
                        let mut parts: Vec<String> =
                            params.iter().map(|p| self.spell_type(ctx, *p)).collect();
                        if *variadic {
                            parts.push("...".to_owned());
                        }
                        format!("{}({})", self.spell_type(ctx, *ret), parts.join(", "))
                    }
                    TypeKind::TemplateSpecialization {
                        template_name,
                        args,
                        ..
                    } => format!("{template_name}<{}>", self.spell_template_args(ctx, args)),
                    // Layers and sugar are handled above.
                    _ => String::new(),
                };
                if qt.is_const {
                    format!("const {base}")
                } else {
                    base
                }
            }
        }
    }

    fn spell_template_args(&mut self, ctx: &AstContext, args: &[TemplateArg]) -> String {
        args.iter()
            .map(|arg| self.spell_template_arg(ctx, arg))
            .collect::<Vec<_>>()
            .join(",")
    }

    pub(crate) fn spell_template_arg(&mut self, ctx: &AstContext, arg: &TemplateArg) -> String {
        match arg {
            TemplateArg::Type(ty) => self.spell_type(ctx, *ty),
            TemplateArg::Integral { value, .. } => value.to_string(),
            TemplateArg::Pack(elements) => self.spell_template_args(ctx, elements),
            TemplateArg::Expression(text) | TemplateArg::Template(text) => text.clone(),
            TemplateArg::Null => String::new(),
        }
    }
}

/// The nearest namespace enclosing `decl`, skipping records, functions and
/// linkage specifications. `None` once the translation unit is reached.
fn next_enclosing_namespace(ctx: &AstContext, decl: DeclId) -> Option<DeclId> {
    let mut visited: SmallVec<[DeclId; 8]> = SmallVec::new();
    let mut current = ctx.decl(decl).parent;
    while let Some(id) = current {
        if visited.contains(&id) {
            return None;
        }
        visited.push(id);
        let parent = ctx.decl(id);
        match parent.kind {
            DeclKind::Namespace => return Some(parent.canonical),
            DeclKind::TranslationUnit => return None,
            _ => current = parent.parent,
        }
    }
    None
}

/// Spelled name, or a synthetic one for anonymous entities.
fn own_identifier(decl: &Decl) -> String {
    match decl.name.as_deref() {
        Some(name) if !name.is_empty() => name.to_owned(),
        _ => format!("__anon_{}_{}", decl.kind.label(), decl.canonical.raw()),
    }
}
