//! Flattening a tree back into archive entries.

use super::node::{NodeKind, Payload, TreeNode};
use crate::classify::ContentKind;

/// Borrowed payload of a serialized entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryData<'a> {
    /// Text content of a text file.
    Text(&'a str),
    /// Raw bytes of an image or binary file.
    Bytes(&'a [u8]),
    /// The file had no readable payload.
    Empty,
}

impl EntryData<'_> {
    /// Returns the bytes that would be stored for this entry.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            EntryData::Text(text) => text.as_bytes(),
            EntryData::Bytes(bytes) => bytes,
            EntryData::Empty => &[],
        }
    }
}

/// One file of a flattened tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerializedEntry<'a> {
    /// Slash-joined names from the start node down to the file.
    pub path: String,
    /// Borrowed payload.
    pub data: EntryData<'a>,
    /// Content kind fixed at decode time.
    pub kind: ContentKind,
}

/// Flattens the files below `node` depth-first, in child insertion order.
///
/// Paths are built from node names relative to `node`, whose own name is
/// not included. Folders produce no entries.
///
/// ```
/// use zipedit::tree::{self, EntryData};
/// use zipedit::{ArchivePath, FlatEntry};
///
/// let entries = vec![FlatEntry::from_bytes(
///     ArchivePath::new("docs/readme.md").unwrap(),
///     b"# hi".to_vec(),
/// )];
/// let root = tree::build(entries, "site.zip");
/// let flat = tree::serialize(&root);
/// assert_eq!(flat[0].path, "docs/readme.md");
/// assert_eq!(flat[0].data, EntryData::Text("# hi"));
/// ```
pub fn serialize(node: &TreeNode) -> Vec<SerializedEntry<'_>> {
    let mut out = Vec::new();
    for child in node.children() {
        walk(child, String::new(), &mut out);
    }
    out
}

fn walk<'a>(node: &'a TreeNode, prefix: String, out: &mut Vec<SerializedEntry<'a>>) {
    let path = if prefix.is_empty() {
        node.name().to_string()
    } else {
        format!("{}/{}", prefix, node.name())
    };

    match node.kind() {
        NodeKind::File(data) => {
            let entry_data = match data.payload() {
                Payload::Text(text) => EntryData::Text(text),
                Payload::Bytes(bytes) => EntryData::Bytes(bytes),
                Payload::Unreadable => EntryData::Empty,
            };
            out.push(SerializedEntry {
                path,
                data: entry_data,
                kind: data.kind(),
            });
        }
        NodeKind::Folder(children) => {
            for child in children {
                walk(child, path.clone(), out);
            }
        }
    }
}
