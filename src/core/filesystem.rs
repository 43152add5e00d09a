use crate::core::error::FsError;
use crate::models::{DirId, DirNode, FileNode, FsEntry};

/// In-memory hierarchical namespace.
///
/// Directories live in an arena (`Vec<DirNode>`) and refer to each other by
/// [`DirId`]. A parent owns its children through the `children` map; the
/// `parent` field is a plain back-handle, so there is no ownership cycle.
///
/// # Invariants
///
/// - `dirs[0]` is the root, has no parent, and is never removed
/// - Every other directory appears in exactly one parent's `children`
/// - Within a directory a name is either a directory or a file, never both
/// - Nothing is ever deleted, so handles stay valid
#[derive(Clone, Debug)]
pub struct VirtualFs {
    dirs: Vec<DirNode>,
}

impl VirtualFs {
    /// Create a namespace holding only the root directory.
    pub fn new() -> Self {
        Self {
            dirs: vec![DirNode::root()],
        }
    }

    pub fn root(&self) -> DirId {
        DirId::ROOT
    }

    /// Number of directories in the tree, root included.
    pub fn dir_count(&self) -> usize {
        self.dirs.len()
    }

    fn node(&self, id: DirId) -> &DirNode {
        &self.dirs[id.0]
    }

    fn node_mut(&mut self, id: DirId) -> &mut DirNode {
        &mut self.dirs[id.0]
    }

    pub fn name(&self, id: DirId) -> &str {
        &self.node(id).name
    }

    pub fn parent(&self, id: DirId) -> Option<DirId> {
        self.node(id).parent
    }

    /// Parent of `id`, or `id` itself for the root.
    pub fn parent_or_self(&self, id: DirId) -> DirId {
        self.parent(id).unwrap_or(id)
    }

    /// Look up the entry stored under `name` in `dir`.
    pub fn entry(&self, dir: DirId, name: &str) -> Option<&FsEntry> {
        self.node(dir).children.get(name)
    }

    /// Look up a child directory by name. Files of that name are ignored.
    pub fn child_dir(&self, dir: DirId, name: &str) -> Option<DirId> {
        self.entry(dir, name).and_then(FsEntry::as_dir)
    }

    /// Return the child directory `name`, creating it if missing.
    ///
    /// Idempotent for existing directories. Fails without mutating anything if
    /// a file already holds the name.
    pub fn create_child_if_absent(&mut self, dir: DirId, name: &str) -> Result<DirId, FsError> {
        validate_name(name)?;

        match self.entry(dir, name) {
            Some(FsEntry::Directory(existing)) => return Ok(*existing),
            Some(FsEntry::File(_)) => return Err(FsError::NotADirectory(name.to_string())),
            None => {}
        }

        let id = DirId(self.dirs.len());
        self.dirs.push(DirNode::new(name, dir));
        self.node_mut(dir)
            .children
            .insert(name.to_string(), FsEntry::Directory(id));
        Ok(id)
    }

    /// Directory listing: `.` and `..`, then child directories, then files.
    ///
    /// Both groups are in lexicographic order.
    pub fn listing(&self, dir: DirId) -> Vec<String> {
        let node = self.node(dir);
        let mut names = vec![".".to_string(), "..".to_string()];
        names.extend(node.directory_names().map(str::to_string));
        names.extend(node.file_names().map(str::to_string));
        names
    }

    /// Absolute path of a directory, e.g. `/home/alice` (or `/` for the root).
    pub fn absolute_path(&self, dir: DirId) -> String {
        let mut segments = Vec::new();
        let mut current = dir;
        while let Some(parent) = self.parent(current) {
            segments.push(self.name(current));
            current = parent;
        }
        segments.reverse();
        format!("/{}", segments.join("/"))
    }

    /// Read a file's current contents.
    pub fn read_file(&self, dir: DirId, name: &str) -> Result<&str, FsError> {
        match self.entry(dir, name) {
            Some(FsEntry::File(file)) => Ok(&file.contents),
            Some(FsEntry::Directory(_)) => Err(FsError::IsADirectory(name.to_string())),
            None => Err(FsError::NotFound(name.to_string())),
        }
    }

    /// Create an empty file.
    ///
    /// Never overwrites: an existing directory or file of the same name is
    /// reported and left untouched.
    pub fn touch(&mut self, dir: DirId, name: &str) -> Result<(), FsError> {
        validate_name(name)?;
        match self.entry(dir, name) {
            Some(FsEntry::Directory(_)) => Err(FsError::IsADirectory(name.to_string())),
            Some(FsEntry::File(_)) => Err(FsError::AlreadyExists(name.to_string())),
            None => {
                self.insert_file(dir, FileNode::empty(name));
                Ok(())
            }
        }
    }

    /// Replace a file's contents, creating the file if it is missing.
    pub fn write_file(&mut self, dir: DirId, name: &str, contents: &str) -> Result<(), FsError> {
        validate_name(name)?;
        match self.node_mut(dir).children.get_mut(name) {
            Some(FsEntry::File(file)) => {
                file.contents = contents.to_string();
                Ok(())
            }
            Some(FsEntry::Directory(_)) => Err(FsError::IsADirectory(name.to_string())),
            None => {
                self.insert_file(dir, FileNode::with_contents(name, contents));
                Ok(())
            }
        }
    }

    /// Append `contents` on a new line, creating the file if it is missing.
    ///
    /// A freshly created file holds just `contents`, without a leading newline.
    pub fn append_file(&mut self, dir: DirId, name: &str, contents: &str) -> Result<(), FsError> {
        validate_name(name)?;
        match self.node_mut(dir).children.get_mut(name) {
            Some(FsEntry::File(file)) => {
                file.append(contents);
                Ok(())
            }
            Some(FsEntry::Directory(_)) => Err(FsError::IsADirectory(name.to_string())),
            None => {
                self.insert_file(dir, FileNode::with_contents(name, contents));
                Ok(())
            }
        }
    }

    fn insert_file(&mut self, dir: DirId, file: FileNode) {
        self.node_mut(dir)
            .children
            .insert(file.name.clone(), FsEntry::File(file));
    }
}

impl Default for VirtualFs {
    fn default() -> Self {
        Self::new()
    }
}

/// Reject names that would make path resolution ambiguous.
fn validate_name(name: &str) -> Result<(), FsError> {
    if name.is_empty() || name == "." || name == ".." || name.contains('/') {
        return Err(FsError::InvalidName(name.to_string()));
    }
    Ok(())
}
