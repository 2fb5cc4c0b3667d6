//! Arena handles
//!
//! Every parsed file owns an arena of definitions and an arena of
//! references. Inside a file, definitions point at each other with
//! [`LocalDefId`]s; across files (resolved references, the model map of an
//! environment) the file is part of the handle.

/// Index of a file inside an [`Environment`](super::Environment).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FileId(u32);

impl FileId {
    /// The file holding the built-in model
    pub const BUILTIN: FileId = FileId(0);

    pub(crate) fn new(index: usize) -> Self {
        Self(index as u32)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Index of a definition inside the arena of its file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LocalDefId(u32);

impl LocalDefId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index as u32)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Index of a reference inside the arena of its file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LocalRefId(u32);

impl LocalRefId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index as u32)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Global handle of a definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DefId {
    pub file: FileId,
    pub local: LocalDefId,
}

impl DefId {
    pub fn new(file: FileId, local: LocalDefId) -> Self {
        Self { file, local }
    }

    /// Another definition of the same file
    pub fn sibling(self, local: LocalDefId) -> Self {
        Self::new(self.file, local)
    }
}

/// Global handle of a reference occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RefId {
    pub file: FileId,
    pub local: LocalRefId,
}

impl RefId {
    pub fn new(file: FileId, local: LocalRefId) -> Self {
        Self { file, local }
    }
}
