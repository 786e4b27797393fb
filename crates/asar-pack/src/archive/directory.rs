//! Directory tree written into the archive header.

use indexmap::map::Entry;
use indexmap::IndexMap;
use serde::Serialize;

use super::errors::PathConflict;
use super::integrity::Integrity;

/// File record. Field order is the serialized order.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FileEntry {
    /// Size in bytes
    pub size: u64,
    /// Byte offset from the end of the header, as a decimal string
    pub offset: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub integrity: Option<Integrity>,
}

/// A node of the directory tree.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum DirectoryNode {
    File(FileEntry),
    Directory {
        /// Only the root can be empty; it serializes as `{}`.
        #[serde(skip_serializing_if = "IndexMap::is_empty")]
        files: IndexMap<String, DirectoryNode>,
    },
}

impl DirectoryNode {
    fn empty_directory() -> Self {
        Self::Directory {
            files: IndexMap::new(),
        }
    }
}

/// Root of the directory tree. Entries keep insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directory {
    root: DirectoryNode,
}

impl Default for Directory {
    fn default() -> Self {
        Self::new()
    }
}

impl Directory {
    pub fn new() -> Self {
        Self {
            root: DirectoryNode::empty_directory(),
        }
    }

    pub fn root(&self) -> &DirectoryNode {
        &self.root
    }

    /// Insert a file at `components` (root to leaf, non-empty).
    ///
    /// Missing parents are created. Fails if a parent is a file or the leaf
    /// name is already taken.
    pub fn insert(&mut self, components: &[&str], file: FileEntry) -> Result<(), PathConflict> {
        let Some((leaf, parents)) = components.split_last() else {
            return Err(PathConflict::Duplicate);
        };

        let mut files = match &mut self.root {
            DirectoryNode::Directory { files } => files,
            DirectoryNode::File(_) => return Err(PathConflict::FileAsDirectory),
        };

        for component in parents {
            let node = files
                .entry((*component).to_string())
                .or_insert_with(DirectoryNode::empty_directory);
            files = match node {
                DirectoryNode::Directory { files } => files,
                DirectoryNode::File(_) => return Err(PathConflict::FileAsDirectory),
            };
        }

        match files.entry((*leaf).to_string()) {
            Entry::Occupied(_) => Err(PathConflict::Duplicate),
            Entry::Vacant(slot) => {
                slot.insert(DirectoryNode::File(file));
                Ok(())
            }
        }
    }

    /// Look up the file at `components`.
    pub fn get(&self, components: &[&str]) -> Option<&FileEntry> {
        let mut node = &self.root;
        for component in components {
            node = match node {
                DirectoryNode::Directory { files } => files.get(*component)?,
                DirectoryNode::File(_) => return None,
            };
        }
        match node {
            DirectoryNode::File(file) => Some(file),
            DirectoryNode::Directory { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(size: u64, offset: u64) -> FileEntry {
        FileEntry {
            size,
            offset: offset.to_string(),
            integrity: None,
        }
    }

    #[test]
    fn test_empty_root_serializes_as_empty_object() {
        let dir = Directory::new();
        assert_eq!(serde_json::to_string(dir.root()).unwrap(), "{}");
    }

    #[test]
    fn test_nested_insert_and_serialization() {
        let mut dir = Directory::new();
        dir.insert(&["a.txt"], file(2, 0)).unwrap();
        dir.insert(&["lib", "b.js"], file(3, 2)).unwrap();
        assert_eq!(
            serde_json::to_string(dir.root()).unwrap(),
            r#"{"files":{"a.txt":{"size":2,"offset":"0"},"lib":{"files":{"b.js":{"size":3,"offset":"2"}}}}}"#
        );
        assert_eq!(dir.get(&["lib", "b.js"]), Some(&file(3, 2)));
        assert_eq!(dir.get(&["lib"]), None);
    }

    #[test]
    fn test_insertion_order_is_preserved() {
        let mut dir = Directory::new();
        for (i, name) in ["zeta", "alpha", "mid"].into_iter().enumerate() {
            dir.insert(&[name], file(0, i as u64)).unwrap();
        }
        let json = serde_json::to_string(dir.root()).unwrap();
        let zeta = json.find("zeta").unwrap();
        let alpha = json.find("alpha").unwrap();
        let mid = json.find("mid").unwrap();
        assert!(zeta < alpha && alpha < mid, "{json}");
    }

    #[test]
    fn test_duplicate_file_rejected() {
        let mut dir = Directory::new();
        dir.insert(&["world"], file(0, 0)).unwrap();
        assert_eq!(
            dir.insert(&["world"], file(0, 0)),
            Err(PathConflict::Duplicate)
        );
    }

    #[test]
    fn test_file_over_existing_directory_rejected() {
        let mut dir = Directory::new();
        dir.insert(&["a", "b"], file(0, 0)).unwrap();
        assert_eq!(dir.insert(&["a"], file(0, 0)), Err(PathConflict::Duplicate));
    }

    #[test]
    fn test_directory_through_existing_file_rejected() {
        let mut dir = Directory::new();
        dir.insert(&["a"], file(1, 0)).unwrap();
        assert_eq!(
            dir.insert(&["a", "b"], file(0, 1)),
            Err(PathConflict::FileAsDirectory)
        );
        // The failed insert left the tree untouched.
        assert_eq!(dir.get(&["a"]), Some(&file(1, 0)));
    }
}
