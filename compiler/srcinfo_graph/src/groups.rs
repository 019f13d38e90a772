//! Namespace groups.
//!
//! One [`NamespaceGroup`] per distinct qualified path, created on first
//! reference and kept in that order. Each node is attached to exactly one
//! group, when the node is created.

use rustc_hash::FxHashMap;

use crate::{FunctionId, RecordId, TypeId, VarId};

/// Nodes owned by one namespace scope.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NamespaceGroup {
    /// Scope names, root first. Empty for the global namespace.
    pub path: Vec<String>,
    pub types: Vec<TypeId>,
    pub records: Vec<RecordId>,
    pub functions: Vec<FunctionId>,
    pub variables: Vec<VarId>,
}

impl NamespaceGroup {
    fn new(path: Vec<String>) -> Self {
        NamespaceGroup {
            path,
            ..Self::default()
        }
    }

    pub fn is_root(&self) -> bool {
        self.path.is_empty()
    }
}

#[derive(Default)]
pub struct NamespaceGroups {
    groups: Vec<NamespaceGroup>,
    index: FxHashMap<Vec<String>, usize>,
}

impl NamespaceGroups {
    pub fn new() -> Self {
        Self::default()
    }

    /// The group for `path`, created on first reference.
    pub fn group_mut(&mut self, path: Vec<String>) -> &mut NamespaceGroup {
        let slot = match self.index.get(&path) {
            Some(&slot) => slot,
            None => {
                let slot = self.groups.len();
                tracing::debug!(path = %path.join("::"), "namespace group created");
                self.index.insert(path.clone(), slot);
                self.groups.push(NamespaceGroup::new(path));
                slot
            }
        };
        &mut self.groups[slot]
    }

    pub fn root_mut(&mut self) -> &mut NamespaceGroup {
        self.group_mut(Vec::new())
    }

    pub fn get(&self, path: &[String]) -> Option<&NamespaceGroup> {
        self.index.get(path).map(|&slot| &self.groups[slot])
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Groups in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &NamespaceGroup> {
        self.groups.iter()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::NamespaceGroups;
    use crate::{RecordId, TypeId};

    fn path(segments: &[&str]) -> Vec<String> {
        segments.iter().map(|s| (*s).to_owned()).collect()
    }

    #[test]
    fn one_group_per_path_in_first_reference_order() {
        let mut groups = NamespaceGroups::new();
        groups.group_mut(path(&["A", "B"])).records.push(RecordId::from_raw(0));
        groups.root_mut().types.push(TypeId::from_raw(0));
        groups.group_mut(path(&["A", "B"])).records.push(RecordId::from_raw(1));

        assert_eq!(groups.len(), 2);
        let order: Vec<_> = groups.iter().map(|g| g.path.join("::")).collect();
        assert_eq!(order, vec!["A::B".to_owned(), String::new()]);
        assert_eq!(
            groups.get(&path(&["A", "B"])).map(|g| g.records.clone()),
            Some(vec![RecordId::from_raw(0), RecordId::from_raw(1)])
        );
        assert!(groups.get(&[]).is_some_and(|g| g.is_root()));
    }
}
