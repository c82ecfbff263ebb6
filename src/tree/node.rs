//! Tree node types.

use std::sync::Arc;

use crate::archive_path::{ArchivePath, is_within};
use crate::classify::ContentKind;

/// Path of the synthetic root folder.
pub const ROOT_PATH: &str = "/";

/// The stored payload of a file node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// Decoded text; only ever paired with [`ContentKind::Text`].
    Text(String),
    /// Raw bytes; only ever paired with [`ContentKind::Image`] or
    /// [`ContentKind::Binary`]. Shared so working copies and tree versions
    /// do not duplicate large blobs.
    Bytes(Arc<[u8]>),
    /// The entry could not be read; it has neither text nor bytes.
    Unreadable,
}

/// Content of a file node: its immutable kind plus its payload.
///
/// The constructors keep the payload consistent with the kind, so a text
/// file never carries bytes and an image never carries text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileData {
    kind: ContentKind,
    payload: Payload,
}

impl FileData {
    /// Creates text file data.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            kind: ContentKind::Text,
            payload: Payload::Text(content.into()),
        }
    }

    /// Creates file data from raw bytes for the given kind.
    ///
    /// Text kinds are decoded as UTF-8, replacing invalid sequences.
    pub fn from_bytes(kind: ContentKind, data: Vec<u8>) -> Self {
        let payload = match kind {
            ContentKind::Text => match String::from_utf8(data) {
                Ok(mut text) => {
                    text.shrink_to_fit();
                    Payload::Text(text)
                }
                Err(e) => {
                    log::debug!("replacing invalid UTF-8 in text entry");
                    Payload::Text(String::from_utf8_lossy(e.as_bytes()).into_owned())
                }
            },
            ContentKind::Image | ContentKind::Binary => Payload::Bytes(data.into()),
        };
        Self { kind, payload }
    }

    /// Creates file data for an entry whose payload could not be read.
    pub fn unreadable(kind: ContentKind) -> Self {
        Self {
            kind,
            payload: Payload::Unreadable,
        }
    }

    /// Returns the content kind assigned at decode time.
    pub fn kind(&self) -> ContentKind {
        self.kind
    }

    /// Returns the payload.
    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    /// Returns the text payload, if any.
    pub fn text_content(&self) -> Option<&str> {
        match &self.payload {
            Payload::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Returns the byte payload, if any.
    pub fn binary_data(&self) -> Option<&[u8]> {
        match &self.payload {
            Payload::Bytes(bytes) => Some(bytes),
            _ => None,
        }
    }

    pub(crate) fn shared_bytes(&self) -> Option<&Arc<[u8]>> {
        match &self.payload {
            Payload::Bytes(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// Returns true if the entry could not be read at decode time.
    pub fn is_unreadable(&self) -> bool {
        self.payload == Payload::Unreadable
    }

    /// Returns a copy with the text payload replaced.
    ///
    /// Returns `None` for non-text kinds, whose payload is never text.
    pub fn with_text(&self, content: impl Into<String>) -> Option<Self> {
        self.kind.is_text().then(|| Self {
            kind: self.kind,
            payload: Payload::Text(content.into()),
        })
    }
}

/// Whether a node is a file or a folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// A file with its content.
    File(FileData),
    /// A folder with its children in insertion order.
    Folder(Vec<Arc<TreeNode>>),
}

/// A file or folder in a decoded archive.
///
/// Children are shared through [`Arc`]: updating one file produces a new
/// tree that reuses every untouched subtree, so `Arc::ptr_eq` tells whether
/// a subtree changed between two versions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    name: String,
    path: String,
    kind: NodeKind,
}

impl TreeNode {
    /// Creates the synthetic root folder.
    pub fn root(name: impl Into<String>, children: Vec<Arc<TreeNode>>) -> Self {
        Self {
            name: name.into(),
            path: ROOT_PATH.to_string(),
            kind: NodeKind::Folder(children),
        }
    }

    /// Creates a file node at `path`.
    pub fn file(path: &ArchivePath, data: FileData) -> Self {
        Self {
            name: path.file_name().to_string(),
            path: path.as_str().to_string(),
            kind: NodeKind::File(data),
        }
    }

    /// Creates a folder node at `path`.
    pub fn folder(path: &ArchivePath, children: Vec<Arc<TreeNode>>) -> Self {
        Self {
            name: path.file_name().to_string(),
            path: path.as_str().to_string(),
            kind: NodeKind::Folder(children),
        }
    }

    pub(crate) fn with_kind(&self, kind: NodeKind) -> Self {
        Self {
            name: self.name.clone(),
            path: self.path.clone(),
            kind,
        }
    }

    /// Returns the display name (last path segment, or the archive name for
    /// the root).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the full path, `"/"` for the root.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the node kind.
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Returns true for the synthetic root.
    pub fn is_root(&self) -> bool {
        self.path == ROOT_PATH
    }

    /// Returns true for file nodes.
    pub fn is_file(&self) -> bool {
        matches!(self.kind, NodeKind::File(_))
    }

    /// Returns true for folder nodes.
    pub fn is_folder(&self) -> bool {
        matches!(self.kind, NodeKind::Folder(_))
    }

    /// Returns the file data of a file node.
    pub fn file_data(&self) -> Option<&FileData> {
        match &self.kind {
            NodeKind::File(data) => Some(data),
            NodeKind::Folder(_) => None,
        }
    }

    /// Returns the children of a folder; files have none.
    pub fn children(&self) -> &[Arc<TreeNode>] {
        match &self.kind {
            NodeKind::Folder(children) => children,
            NodeKind::File(_) => &[],
        }
    }

    /// Returns the content kind of a file node.
    pub fn content_kind(&self) -> Option<ContentKind> {
        self.file_data().map(FileData::kind)
    }

    /// Returns the text content of a text file node.
    pub fn text_content(&self) -> Option<&str> {
        self.file_data().and_then(FileData::text_content)
    }

    /// Returns the bytes of an image or binary file node.
    pub fn binary_data(&self) -> Option<&[u8]> {
        self.file_data().and_then(FileData::binary_data)
    }

    /// Finds the child of this folder with the given name.
    pub fn child(&self, name: &str) -> Option<&Arc<TreeNode>> {
        self.children().iter().find(|c| c.name == name)
    }

    /// Finds the node at `path` in the subtree rooted here.
    ///
    /// `"/"` resolves to the root itself.
    pub fn find(&self, path: &str) -> Option<&TreeNode> {
        if self.path == path {
            return Some(self);
        }
        self.children().iter().find_map(|child| {
            if child.path == path {
                Some(child.as_ref())
            } else if child.is_folder() && is_within(path, &child.path) {
                child.find(path)
            } else {
                None
            }
        })
    }

    /// Returns the number of file nodes in this subtree.
    pub fn file_count(&self) -> usize {
        match &self.kind {
            NodeKind::File(_) => 1,
            NodeKind::Folder(children) => children.iter().map(|c| c.file_count()).sum(),
        }
    }
}
