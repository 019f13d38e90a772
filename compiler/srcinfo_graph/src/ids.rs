//! Document-local node ids.
//!
//! Every id space is dense and starts at 0. Ids are allocated in order of
//! first encounter, so the same declaration stream always yields the same
//! ids. They are meaningful only inside one encoded document.

use std::fmt;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
        #[serde(transparent)]
        #[repr(transparent)]
        pub struct $name(u32);

        impl $name {
            /// Sentinel for a slot that has been reserved but not filled.
            pub const NONE: Self = Self(u32::MAX);

            #[inline]
            pub const fn from_raw(raw: u32) -> Self {
                Self(raw)
            }

            #[inline]
            pub const fn raw(self) -> u32 {
                self.0
            }

            #[inline]
            pub const fn is_none(self) -> bool {
                self.0 == u32::MAX
            }

            #[inline]
            pub(crate) const fn index(self) -> usize {
                self.0 as usize
            }

            /// Id for the next slot of a table currently holding `len` entries.
            #[inline]
            pub(crate) fn next(len: usize) -> Self {
                #[expect(
                    clippy::cast_possible_truncation,
                    reason = "one document never holds u32::MAX nodes of a kind"
                )]
                let raw = len as u32;
                Self(raw)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                if self.is_none() {
                    write!(f, concat!(stringify!($name), "(NONE)"))
                } else {
                    write!(f, concat!(stringify!($name), "({})"), self.0)
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "{}"), self.0)
            }
        }
    };
}

define_id!(
    /// Id of a type entry.
    TypeId,
    "t"
);
define_id!(
    /// Id of a record node.
    RecordId,
    "r"
);
define_id!(
    /// Id of a function node.
    FunctionId,
    "f"
);
define_id!(
    /// Id of a global variable node.
    VarId,
    "v"
);
define_id!(
    /// Id of a file table entry.
    FileId,
    "file"
);

#[cfg(test)]
mod tests;
