use crate::{
    path::ResolvedPaths,
    types::{FileEntry, OperationMode},
};

pub const FIELD_ID: &str = "file_name";
pub const FIELD_NAME: &str = "name";
pub const FIELD_LABEL: &str = "File Name";
pub const MOVE_DESCRIPTION: &str =
    "Enter the new name and directory of this file or folder, relative to the current directory.";

/// Copy and field state of the rename/move form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameForm {
    mode: OperationMode,
    initial_name: String,
}

impl RenameForm {
    pub fn new(file: &FileEntry, mode: OperationMode) -> Self {
        Self {
            mode,
            initial_name: file.name.clone(),
        }
    }

    pub fn mode(&self) -> OperationMode {
        self.mode
    }

    /// Value the name field starts with
    pub fn initial_name(&self) -> &str {
        &self.initial_name
    }

    pub fn field_label(&self) -> &'static str {
        FIELD_LABEL
    }

    /// Helper text under the field, move mode only
    pub fn field_description(&self) -> Option<&'static str> {
        self.mode.is_move().then_some(MOVE_DESCRIPTION)
    }

    pub fn button_label(&self) -> &'static str {
        match self.mode {
            OperationMode::Move => "Move",
            OperationMode::Rename => "Rename",
        }
    }

    /// "New location" caption for the current input, move mode only
    pub fn location_caption(&self, resolved: &ResolvedPaths) -> Option<String> {
        self.mode
            .is_move()
            .then(|| format!("New location: {}", resolved.display_location()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::PathResolver;

    #[test]
    fn test_rename_mode_copy() {
        let form = RenameForm::new(&FileEntry::new("1", "a.txt"), OperationMode::Rename);
        let resolved = PathResolver::resolve("/", "a.txt", "sub/b.txt", OperationMode::Rename);

        assert_eq!(form.initial_name(), "a.txt");
        assert_eq!(form.field_label(), "File Name");
        assert_eq!(form.button_label(), "Rename");
        assert_eq!(form.field_description(), None);
        assert_eq!(form.location_caption(&resolved), None);
    }

    #[test]
    fn test_move_mode_copy() {
        let form = RenameForm::new(&FileEntry::new("1", "a.txt"), OperationMode::Move);
        let resolved = PathResolver::resolve("/world", "a.txt", "../../b.txt", OperationMode::Move);

        assert_eq!(form.button_label(), "Move");
        assert_eq!(form.field_description(), Some(MOVE_DESCRIPTION));
        assert_eq!(
            form.location_caption(&resolved).as_deref(),
            Some("New location: /home/container/b.txt")
        );
    }
}
