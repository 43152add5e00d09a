use std::collections::BTreeMap;
use std::fmt;

// =============================================================================
// Directory Handle
// =============================================================================

/// Index of a directory inside the [`VirtualFs`](crate::core::VirtualFs) arena.
///
/// Handles are never invalidated: the namespace is append-only, so a handle
/// taken from one command stays valid for the lifetime of the tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DirId(pub(crate) usize);

impl DirId {
    /// Handle of the root directory.
    pub const ROOT: DirId = DirId(0);

    pub fn is_root(self) -> bool {
        self == Self::ROOT
    }
}

impl fmt::Display for DirId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "dir#{}", self.0)
    }
}

// =============================================================================
// Entries
// =============================================================================

/// A text file, owned by exactly one directory.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FileNode {
    pub name: String,
    pub contents: String,
}

impl FileNode {
    /// Create an empty file (what `touch` produces).
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            contents: String::new(),
        }
    }

    pub fn with_contents(name: impl Into<String>, contents: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            contents: contents.into(),
        }
    }

    /// Append `text` on a new line.
    pub fn append(&mut self, text: &str) {
        self.contents.push('\n');
        self.contents.push_str(text);
    }
}

/// One name slot in a directory.
///
/// Directories and files share a single namespace, so a name maps to exactly
/// one of the two variants.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FsEntry {
    /// Child directory, stored in the arena and referenced by handle
    Directory(DirId),
    /// File stored inline in its parent
    File(FileNode),
}

impl FsEntry {
    pub fn is_directory(&self) -> bool {
        matches!(self, Self::Directory(_))
    }

    pub fn as_dir(&self) -> Option<DirId> {
        match self {
            Self::Directory(id) => Some(*id),
            Self::File(_) => None,
        }
    }

    pub fn as_file(&self) -> Option<&FileNode> {
        match self {
            Self::File(file) => Some(file),
            Self::Directory(_) => None,
        }
    }
}

/// A directory record in the arena.
///
/// `parent` is a plain handle, not an owner: ownership flows strictly from the
/// arena downwards and the root is the only record with no parent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DirNode {
    pub name: String,
    pub parent: Option<DirId>,
    /// Sorted by name so listings are reproducible
    pub children: BTreeMap<String, FsEntry>,
}

impl DirNode {
    pub fn root() -> Self {
        Self {
            name: "/".to_string(),
            parent: None,
            children: BTreeMap::new(),
        }
    }

    pub fn new(name: impl Into<String>, parent: DirId) -> Self {
        Self {
            name: name.into(),
            parent: Some(parent),
            children: BTreeMap::new(),
        }
    }

    /// Child directory names in lexicographic order.
    pub fn directory_names(&self) -> impl Iterator<Item = &str> {
        self.children
            .iter()
            .filter(|(_, entry)| entry.is_directory())
            .map(|(name, _)| name.as_str())
    }

    /// File names in lexicographic order.
    pub fn file_names(&self) -> impl Iterator<Item = &str> {
        self.children
            .iter()
            .filter(|(_, entry)| !entry.is_directory())
            .map(|(name, _)| name.as_str())
    }
}
