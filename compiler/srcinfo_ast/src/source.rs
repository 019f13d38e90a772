//! Source positions as reported by the frontend.

use std::fmt;

/// A position in a source file (1-based line and column).
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SourceLoc {
    pub file: String,
    pub line: u32,
    pub column: u32,
}

impl SourceLoc {
    pub fn new(file: impl Into<String>, line: u32, column: u32) -> Self {
        SourceLoc {
            file: file.into(),
            line,
            column,
        }
    }
}

impl fmt::Display for SourceLoc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

/// An inclusive begin/end pair of positions.
///
/// Both ends are expected to lie in the same file; the graph builder only
/// consults `begin.file` when it needs the owning file.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SourceRange {
    pub begin: SourceLoc,
    pub end: SourceLoc,
}

impl SourceRange {
    pub fn new(begin: SourceLoc, end: SourceLoc) -> Self {
        SourceRange { begin, end }
    }

    /// Range spanning `begin_line..=end_line` in one file, columns at 1.
    pub fn lines(file: &str, begin_line: u32, end_line: u32) -> Self {
        SourceRange {
            begin: SourceLoc::new(file, begin_line, 1),
            end: SourceLoc::new(file, end_line, 1),
        }
    }

    #[inline]
    pub fn file(&self) -> &str {
        &self.begin.file
    }
}

/// Source language variant of a translation unit.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Language {
    C,
    /// C with classes.
    #[default]
    Cxx,
}

impl Language {
    /// Conventional source file extension for the variant.
    pub const fn extension(self) -> &'static str {
        match self {
            Language::C => "c",
            Language::Cxx => "cpp",
        }
    }
}
