//! Copy-on-write updates of file content.
//!
//! A tree is never mutated in place. Updating a file rebuilds every folder
//! on the way down to it with a fresh children vector in which only the
//! changed child differs; all other children are the same [`Arc`]s as in
//! the previous version.

use std::sync::Arc;

use super::node::{FileData, NodeKind, TreeNode};
use crate::archive_path::is_within;

/// Replaces the text of the file at `path`.
///
/// Returns the new root, or `None` if `path` is not a text file in `root`
/// (the caller keeps the old root in that case).
///
/// ```
/// use std::sync::Arc;
/// use zipedit::tree;
/// use zipedit::{ArchivePath, FlatEntry};
///
/// let root = Arc::new(tree::build(
///     vec![FlatEntry::from_bytes(ArchivePath::new("a.txt").unwrap(), b"old".to_vec())],
///     "t.zip",
/// ));
/// let updated = tree::replace_text(&root, "a.txt", "new").unwrap();
/// assert_eq!(updated.find("a.txt").unwrap().text_content(), Some("new"));
/// assert_eq!(root.find("a.txt").unwrap().text_content(), Some("old"));
/// ```
pub fn replace_text(root: &Arc<TreeNode>, path: &str, content: &str) -> Option<Arc<TreeNode>> {
    update_file(root, path, |data| data.with_text(content))
}

/// Replaces the data of the file at `path` with the result of `f`.
///
/// `f` returning `None` leaves the tree as it was and makes this return
/// `None` too.
pub fn update_file<F>(root: &Arc<TreeNode>, path: &str, f: F) -> Option<Arc<TreeNode>>
where
    F: FnOnce(&FileData) -> Option<FileData>,
{
    rebuild(root, path, f)
}

fn rebuild<F>(node: &Arc<TreeNode>, path: &str, f: F) -> Option<Arc<TreeNode>>
where
    F: FnOnce(&FileData) -> Option<FileData>,
{
    match node.kind() {
        NodeKind::File(data) => {
            if node.path() != path {
                return None;
            }
            let data = f(data)?;
            Some(Arc::new(node.with_kind(NodeKind::File(data))))
        }
        NodeKind::Folder(children) => {
            let index = children.iter().position(|child| {
                child.path() == path || (child.is_folder() && is_within(path, child.path()))
            })?;
            let replaced = rebuild(&children[index], path, f)?;

            let mut updated = children.clone();
            updated[index] = replaced;
            Some(Arc::new(node.with_kind(NodeKind::Folder(updated))))
        }
    }
}
