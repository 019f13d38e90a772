//! Type cache and id allocator.
//!
//! Maps [`CanonicalKey`]s to sequential [`TypeId`]s and owns every
//! [`TypeDescriptor`]. Ids are handed out in order of first encounter.
//!
//! # Reservation
//!
//! Records are inserted as a shell (no template arguments, no fields) under
//! their identity key *before* their members are resolved, then filled in
//! place through [`TypeCache::descriptor_mut`]. A field that refers back to
//! the enclosing record, at any pointer/array/reference depth, then finds the
//! reserved id instead of expanding the record again.

use rustc_hash::FxHashMap;

use crate::{CanonicalKey, TypeDescriptor, TypeId};

/// Outcome of [`TypeCache::intern`].
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Interned {
    /// The key was already cached.
    Existing(TypeId),
    /// A fresh id was allocated for the key.
    New(TypeId),
}

impl Interned {
    #[inline]
    pub fn id(self) -> TypeId {
        match self {
            Interned::Existing(id) | Interned::New(id) => id,
        }
    }

    #[inline]
    pub fn is_new(self) -> bool {
        matches!(self, Interned::New(_))
    }
}

#[derive(Default)]
pub struct TypeCache {
    ids: FxHashMap<CanonicalKey, TypeId>,
    entries: Vec<TypeDescriptor>,
}

impl TypeCache {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn lookup(&self, key: &CanonicalKey) -> Option<TypeId> {
        self.ids.get(key).copied()
    }

    /// Return the id cached for `key`, or allocate the next id for it.
    ///
    /// `descriptor` is dropped when the key already exists.
    pub fn intern(&mut self, key: CanonicalKey, descriptor: TypeDescriptor) -> Interned {
        if let Some(&id) = self.ids.get(&key) {
            tracing::trace!(%key, %id, "type cache hit");
            return Interned::Existing(id);
        }
        let id = TypeId::next(self.entries.len());
        tracing::trace!(%key, %id, "type cache insert");
        self.entries.push(descriptor);
        self.ids.insert(key, id);
        Interned::New(id)
    }

    #[inline]
    pub fn get(&self, id: TypeId) -> Option<&TypeDescriptor> {
        self.entries.get(id.index())
    }

    /// Mutable access for filling a reserved entry in place.
    #[inline]
    pub fn descriptor_mut(&mut self, id: TypeId) -> Option<&mut TypeDescriptor> {
        self.entries.get_mut(id.index())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in allocation order.
    pub fn iter(&self) -> impl Iterator<Item = (TypeId, &TypeDescriptor)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(index, descriptor)| (TypeId::next(index), descriptor))
    }
}

#[cfg(test)]
mod tests;
