//! Editing session state.
//!
//! A [`Session`] is a plain value: the canonical tree, the files opened for
//! editing, their dirty flags, the selection and the expanded folders.
//! [`Session::apply`] computes the next session from the current one and an
//! [`Action`]; nothing else changes it. [`SessionStore`] wraps a session for
//! hosts that want change notifications and archive load/export.
//!
//! Per opened path the lifecycle is
//! `closed → opened(clean) → opened(dirty) → opened(clean) → closed`.
//! Working copies never touch the tree until [`Action::Save`].
//!
//! # Example
//!
//! ```rust
//! use zipedit::session::{Action, Session};
//! use zipedit::{ArchivePath, FlatEntry, tree};
//!
//! let root = tree::build(
//!     vec![FlatEntry::from_bytes(ArchivePath::new("a.txt").unwrap(), b"hello".to_vec())],
//!     "demo.zip",
//! );
//!
//! let session = Session::new()
//!     .apply(Action::load(root, "demo.zip"))
//!     .apply(Action::select("a.txt"))
//!     .apply(Action::edit("hello world"));
//! assert!(session.is_dirty("a.txt"));
//!
//! let session = session.apply(Action::Save);
//! assert!(!session.is_dirty("a.txt"));
//! let saved = session.root().unwrap().find("a.txt").unwrap();
//! assert_eq!(saved.text_content(), Some("hello world"));
//! ```

mod action;
mod store;
mod working_copy;

pub use action::Action;
pub use store::{DEFAULT_EXPORT_NAME, ExportedArchive, LoadTicket, SessionStore, SubscriptionId};
pub use working_copy::{EditorDocument, FileDownload, WorkingCopy};

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::tree::{self, ROOT_PATH, TreeNode};

/// A working copy together with its dirty flag.
#[derive(Debug, Clone, PartialEq, Eq)]
struct OpenFile {
    copy: WorkingCopy,
    dirty: bool,
}

/// The state of one editing session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    root: Option<Arc<TreeNode>>,
    archive_name: Option<String>,
    /// Tab order is insertion order.
    open_files: Vec<OpenFile>,
    selected_path: Option<String>,
    expanded_paths: BTreeSet<String>,
}

impl Session {
    /// Creates an empty session with nothing loaded.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a session with `root` already loaded.
    pub fn with_root(root: TreeNode, archive_name: impl Into<String>) -> Self {
        Self::new().apply(Action::load(root, archive_name))
    }

    /// Returns the session that results from applying `action`.
    ///
    /// Actions whose preconditions do not hold (no selection, unknown path,
    /// nothing loaded) return the session unchanged.
    pub fn apply(self, action: Action) -> Self {
        log::debug!(
            "Applying {} action{}",
            action.action_type(),
            action
                .target_path()
                .map(|p| format!(" on '{}'", p))
                .unwrap_or_default()
        );

        match action {
            Action::Select(path) => self.select(path),
            Action::Edit(content) => self.edit(content),
            Action::Save => self.save(),
            Action::Close(path) => self.close(&path),
            Action::Load { root, archive_name } => Self::loaded(root, archive_name),
            Action::ToggleExpand(path) => self.toggle_expand(path),
        }
    }

    fn select(mut self, path: String) -> Self {
        let Some(node) = self.root.as_ref().and_then(|root| root.find(&path)) else {
            log::debug!("Ignoring selection of unknown path '{}'", path);
            return self;
        };

        if node.is_folder() {
            return self.toggle_expand(path);
        }

        if self.position(&path).is_none() {
            let Some(copy) = WorkingCopy::from_node(node) else {
                return self;
            };
            self.open_files.push(OpenFile { copy, dirty: false });
        }
        self.selected_path = Some(path);
        self
    }

    fn edit(mut self, content: String) -> Self {
        let Some(index) = self.selected_index() else {
            return self;
        };
        let open = &mut self.open_files[index];
        if !open.copy.is_editable() {
            log::debug!("'{}' is not a text file; edit ignored", open.copy.path());
            return self;
        }
        open.copy.set_content(content);
        open.dirty = true;
        self
    }

    fn save(mut self) -> Self {
        let Some(index) = self.selected_index() else {
            return self;
        };
        let open = &mut self.open_files[index];

        if open.copy.is_editable() {
            let updated = self
                .root
                .as_ref()
                .and_then(|root| tree::replace_text(root, open.copy.path(), open.copy.content()));
            match updated {
                Some(root) => self.root = Some(root),
                None => log::warn!("'{}' is no longer in the tree; not saved", open.copy.path()),
            }
        }
        open.dirty = false;
        self
    }

    fn close(mut self, path: &str) -> Self {
        let Some(index) = self.position(path) else {
            return self;
        };
        let closed = self.open_files.remove(index);
        if closed.dirty {
            log::debug!("Discarding unsaved edits to '{}'", path);
        }

        if self.selected_path.as_deref() == Some(path) {
            self.selected_path = self.open_files.last().map(|open| open.copy.path().to_string());
        }
        self
    }

    fn loaded(root: Arc<TreeNode>, archive_name: String) -> Self {
        Self {
            root: Some(root),
            archive_name: Some(archive_name),
            open_files: Vec::new(),
            selected_path: None,
            expanded_paths: BTreeSet::from([ROOT_PATH.to_string()]),
        }
    }

    fn toggle_expand(mut self, path: String) -> Self {
        let is_folder = self
            .root
            .as_ref()
            .and_then(|root| root.find(&path))
            .is_some_and(TreeNode::is_folder);
        if !is_folder {
            return self;
        }
        if !self.expanded_paths.remove(&path) {
            self.expanded_paths.insert(path);
        }
        self
    }

    fn position(&self, path: &str) -> Option<usize> {
        self.open_files.iter().position(|open| open.copy.path() == path)
    }

    fn selected_index(&self) -> Option<usize> {
        self.selected_path.as_deref().and_then(|path| self.position(path))
    }

    /// Returns the canonical tree, if an archive is loaded.
    pub fn root(&self) -> Option<&Arc<TreeNode>> {
        self.root.as_ref()
    }

    /// Returns the file name of the loaded archive.
    pub fn archive_name(&self) -> Option<&str> {
        self.archive_name.as_deref()
    }

    /// Returns the selected path.
    pub fn selected_path(&self) -> Option<&str> {
        self.selected_path.as_deref()
    }

    /// Returns the working copy shown in the editor.
    pub fn selected(&self) -> Option<&WorkingCopy> {
        self.selected_index().map(|index| &self.open_files[index].copy)
    }

    /// Returns the working copy for `path`, if it is open.
    pub fn working_copy(&self, path: &str) -> Option<&WorkingCopy> {
        self.position(path).map(|index| &self.open_files[index].copy)
    }

    /// Returns true if `path` is open with unsaved edits.
    pub fn is_dirty(&self, path: &str) -> bool {
        self.position(path)
            .is_some_and(|index| self.open_files[index].dirty)
    }

    /// Returns true if `path` is open.
    pub fn is_open(&self, path: &str) -> bool {
        self.position(path).is_some()
    }

    /// Returns the open paths in tab order.
    pub fn open_paths(&self) -> impl Iterator<Item = &str> {
        self.open_files.iter().map(|open| open.copy.path())
    }

    /// Returns the paths with unsaved edits, in tab order.
    pub fn dirty_paths(&self) -> impl Iterator<Item = &str> {
        self.open_files
            .iter()
            .filter(|open| open.dirty)
            .map(|open| open.copy.path())
    }

    /// Returns true if any open file has unsaved edits.
    pub fn has_unsaved(&self) -> bool {
        self.open_files.iter().any(|open| open.dirty)
    }

    /// Returns true if the folder at `path` is expanded.
    pub fn is_expanded(&self, path: &str) -> bool {
        self.expanded_paths.contains(path)
    }

    /// Returns the expanded folder paths in sorted order.
    pub fn expanded_paths(&self) -> impl Iterator<Item = &str> {
        self.expanded_paths.iter().map(String::as_str)
    }

    /// Returns what the editor widget should show for the selection.
    pub fn editor_document(&self) -> Option<EditorDocument> {
        self.selected().map(EditorDocument::from)
    }

    /// Returns the selected text file's current content for download.
    ///
    /// Unsaved edits are included. Image and binary files are not offered.
    pub fn download_selected(&self) -> Option<FileDownload> {
        let copy = self.selected().filter(|copy| copy.is_editable())?;
        Some(FileDownload {
            file_name: copy.name().to_string(),
            bytes: copy.content().as_bytes().to_vec(),
        })
    }
}
