//! Session actions.

use std::sync::Arc;

use crate::tree::TreeNode;

/// A state transition request for a [`Session`](super::Session).
#[derive(Debug, Clone)]
pub enum Action {
    /// Open a file (or toggle a folder) at the given path.
    Select(String),
    /// Replace the text of the selected working copy.
    Edit(String),
    /// Merge the selected working copy into the tree.
    Save,
    /// Close the tab for the given path, dropping unsaved edits.
    Close(String),
    /// Replace the whole session with a freshly decoded archive.
    Load {
        /// Root of the decoded tree.
        root: Arc<TreeNode>,
        /// File name the archive was loaded from.
        archive_name: String,
    },
    /// Expand or collapse a folder without opening anything.
    ToggleExpand(String),
}

impl Action {
    /// Creates a select action.
    pub fn select(path: impl Into<String>) -> Self {
        Action::Select(path.into())
    }

    /// Creates an edit action.
    pub fn edit(content: impl Into<String>) -> Self {
        Action::Edit(content.into())
    }

    /// Creates a close action.
    pub fn close(path: impl Into<String>) -> Self {
        Action::Close(path.into())
    }

    /// Creates a load action.
    pub fn load(root: TreeNode, archive_name: impl Into<String>) -> Self {
        Action::Load {
            root: Arc::new(root),
            archive_name: archive_name.into(),
        }
    }

    /// Creates a toggle-expand action.
    pub fn toggle_expand(path: impl Into<String>) -> Self {
        Action::ToggleExpand(path.into())
    }

    /// Returns the path this action targets, if it names one.
    pub fn target_path(&self) -> Option<&str> {
        match self {
            Action::Select(path) | Action::Close(path) | Action::ToggleExpand(path) => Some(path),
            Action::Edit(_) | Action::Save | Action::Load { .. } => None,
        }
    }

    /// Returns the action type as a string.
    pub fn action_type(&self) -> &'static str {
        match self {
            Action::Select(_) => "select",
            Action::Edit(_) => "edit",
            Action::Save => "save",
            Action::Close(_) => "close",
            Action::Load { .. } => "load",
            Action::ToggleExpand(_) => "toggle-expand",
        }
    }
}
