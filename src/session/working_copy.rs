//! Working copies of opened files.

use std::sync::Arc;

use crate::classify::{ContentKind, language_hint};
use crate::tree::TreeNode;

/// An editable snapshot of one file, independent of the tree until saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkingCopy {
    path: String,
    name: String,
    content_kind: ContentKind,
    content: String,
    binary_data: Option<Arc<[u8]>>,
}

impl WorkingCopy {
    /// Snapshots a file node. Returns `None` for folders.
    ///
    /// Text content defaults to the empty string when the node has none
    /// (binary files and unreadable entries).
    pub fn from_node(node: &TreeNode) -> Option<Self> {
        let data = node.file_data()?;
        Some(Self {
            path: node.path().to_string(),
            name: node.name().to_string(),
            content_kind: data.kind(),
            content: data.text_content().unwrap_or_default().to_string(),
            binary_data: data.shared_bytes().cloned(),
        })
    }

    /// Returns the archive path this copy belongs to.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the file name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the content kind of the underlying file.
    pub fn content_kind(&self) -> ContentKind {
        self.content_kind
    }

    /// Returns the current text.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the bytes of an image or binary file.
    pub fn binary_data(&self) -> Option<&[u8]> {
        self.binary_data.as_deref()
    }

    /// Returns true if the text editor may change this copy.
    pub fn is_editable(&self) -> bool {
        self.content_kind.is_text()
    }

    /// Returns the editor language for this file.
    pub fn language(&self) -> &'static str {
        language_hint(&self.name)
    }

    pub(crate) fn set_content(&mut self, content: String) {
        self.content = content;
    }
}

/// What the text-editing widget needs to show a working copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorDocument {
    /// Initial text.
    pub text: String,
    /// Language hint such as `"typescript"` or `"plaintext"`.
    pub language: &'static str,
}

impl From<&WorkingCopy> for EditorDocument {
    fn from(copy: &WorkingCopy) -> Self {
        Self {
            text: copy.content.clone(),
            language: copy.language(),
        }
    }
}

/// A single file offered for download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDownload {
    /// Suggested file name.
    pub file_name: String,
    /// File contents.
    pub bytes: Vec<u8>,
}
