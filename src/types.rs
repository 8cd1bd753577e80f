use serde::{Deserialize, Serialize};

/// A file or folder as shown in the current directory listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    /// Stable identifier, empty for entries the panel gives no id (folders)
    #[serde(default)]
    pub uuid: String,
    /// Name relative to the current directory
    pub name: String,
}

impl FileEntry {
    pub fn new(uuid: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            uuid: uuid.into(),
            name: name.into(),
        }
    }

    /// Key used to find this entry in a listing: the uuid, or the name when
    /// the entry has no identifier
    pub fn key(&self) -> &str {
        if self.uuid.is_empty() {
            &self.name
        } else {
            &self.uuid
        }
    }

    pub fn has_identifier(&self) -> bool {
        !self.uuid.is_empty()
    }
}

/// Body of a rename call. Both paths are rooted at the current directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameRequest {
    pub rename_from: String,
    pub rename_to: String,
}

/// How the caller opened the form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OperationMode {
    #[default]
    Rename,
    Move,
}

impl OperationMode {
    pub fn from_move_terminology(use_move_terminology: bool) -> Self {
        if use_move_terminology {
            OperationMode::Move
        } else {
            OperationMode::Rename
        }
    }

    pub fn is_move(self) -> bool {
        self == OperationMode::Move
    }
}

/// Whether a completed operation renamed the entry in place or moved it out
/// of the current directory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationClassification {
    Rename,
    Move,
}
