//! Graph session configuration.

use std::path::{Path, PathBuf};

use srcinfo_ast::{AstContext, Decl, DeclFlags, Language};

/// Which declarations `add_declaration` accepts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IngestFilter {
    /// Reject declarations located outside the unit's main file.
    pub main_file_only: bool,
    pub skip_templated: bool,
    pub skip_defaulted: bool,
    pub skip_implicit: bool,
}

impl Default for IngestFilter {
    fn default() -> Self {
        IngestFilter {
            main_file_only: false,
            skip_templated: false,
            skip_defaulted: true,
            skip_implicit: true,
        }
    }
}

impl IngestFilter {
    /// Accept every declaration.
    pub fn all() -> Self {
        IngestFilter {
            main_file_only: false,
            skip_templated: false,
            skip_defaulted: false,
            skip_implicit: false,
        }
    }

    pub fn accepts(&self, ctx: &AstContext, decl: &Decl) -> bool {
        let mut rejected = DeclFlags::empty();
        if self.skip_templated {
            rejected |= DeclFlags::TEMPLATED;
        }
        if self.skip_defaulted {
            rejected |= DeclFlags::DEFAULTED;
        }
        if self.skip_implicit {
            rejected |= DeclFlags::IMPLICIT;
        }
        if decl.flags.intersects(rejected) {
            return false;
        }
        !self.main_file_only || decl.location().file == ctx.main_file()
    }
}

#[derive(Clone, Debug, Default)]
pub struct GraphConfig {
    /// Destination of the encoded graph. See [`GraphConfig::output_path`].
    pub output: Option<PathBuf>,
    /// Record function bodies located outside the main file.
    pub include_external_bodies: bool,
    pub filter: IngestFilter,
}

impl GraphConfig {
    pub const CXX_OUTPUT: &'static str = "srcinfo.cpp.graph";
    pub const C_OUTPUT: &'static str = "srcinfo.c.graph";

    /// The configured output path, or the default name for `language`.
    pub fn output_path(&self, language: Language) -> PathBuf {
        match &self.output {
            Some(path) => path.clone(),
            None => Path::new(match language {
                Language::Cxx => Self::CXX_OUTPUT,
                Language::C => Self::C_OUTPUT,
            })
            .to_path_buf(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use srcinfo_ast::{BuiltinClass, SourceRange};

    use super::*;

    #[test]
    fn default_output_follows_language() {
        let config = GraphConfig::default();
        assert_eq!(config.output_path(Language::Cxx), PathBuf::from("srcinfo.cpp.graph"));
        assert_eq!(config.output_path(Language::C), PathBuf::from("srcinfo.c.graph"));

        let config = GraphConfig {
            output: Some(PathBuf::from("out/unit.graph")),
            ..GraphConfig::default()
        };
        assert_eq!(config.output_path(Language::C), PathBuf::from("out/unit.graph"));
    }

    #[test]
    fn filter_checks_flags_and_file() {
        let mut ctx = AstContext::new(Language::Cxx, "main.cpp");
        let tu = ctx.translation_unit();
        let int = ctx.builtin(BuiltinClass::SignedInt, 32, "int");
        let local = ctx.variable(tu, "local", int, SourceRange::lines("main.cpp", 1, 1));
        let foreign = ctx.variable(tu, "foreign", int, SourceRange::lines("lib.h", 3, 3));
        let implicit = ctx.variable(tu, "implicit", int, SourceRange::lines("main.cpp", 2, 2));
        ctx.add_flags(implicit, DeclFlags::IMPLICIT);

        let default = IngestFilter::default();
        assert!(default.accepts(&ctx, ctx.decl(local)));
        assert!(default.accepts(&ctx, ctx.decl(foreign)));
        assert!(!default.accepts(&ctx, ctx.decl(implicit)));
        assert!(IngestFilter::all().accepts(&ctx, ctx.decl(implicit)));

        let main_only = IngestFilter {
            main_file_only: true,
            ..IngestFilter::default()
        };
        assert!(main_only.accepts(&ctx, ctx.decl(local)));
        assert!(!main_only.accepts(&ctx, ctx.decl(foreign)));
    }
}
