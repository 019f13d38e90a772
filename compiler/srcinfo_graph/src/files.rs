//! File table: bijective map between source paths and [`FileId`]s.

use rustc_hash::FxHashMap;

use crate::FileId;

#[derive(Default)]
pub struct FileTable {
    ids: FxHashMap<String, FileId>,
    paths: Vec<String>,
}

impl FileTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id of `path`, registering it on first use.
    pub fn intern(&mut self, path: &str) -> FileId {
        if let Some(&id) = self.ids.get(path) {
            return id;
        }
        let id = FileId::next(self.paths.len());
        tracing::trace!(%id, path, "file registered");
        self.paths.push(path.to_owned());
        self.ids.insert(path.to_owned(), id);
        id
    }

    pub fn lookup(&self, path: &str) -> Option<FileId> {
        self.ids.get(path).copied()
    }

    pub fn path(&self, id: FileId) -> Option<&str> {
        self.paths.get(id.index()).map(String::as_str)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Files in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (FileId, &str)> {
        self.paths
            .iter()
            .enumerate()
            .map(|(index, path)| (FileId::next(index), path.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::FileTable;
    use crate::FileId;

    #[test]
    fn paths_and_ids_round_trip() {
        let mut files = FileTable::new();
        let main = files.intern("src/main.cpp");
        let header = files.intern("include/widget.h");

        assert_eq!(files.intern("src/main.cpp"), main);
        assert_eq!(main, FileId::from_raw(0));
        assert_eq!(header, FileId::from_raw(1));
        assert_eq!(files.path(header), Some("include/widget.h"));
        assert_eq!(files.lookup("missing.h"), None);
        assert_eq!(
            files.iter().collect::<Vec<_>>(),
            vec![(main, "src/main.cpp"), (header, "include/widget.h")]
        );
    }
}
