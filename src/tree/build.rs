//! Building a tree from flat archive entries.

use std::sync::Arc;

use super::node::{FileData, ROOT_PATH, TreeNode};
use crate::archive_path::ArchivePath;
use crate::codec::FlatEntry;

/// Position of a staged child in insertion order.
enum Slot {
    /// The next not-yet-emitted entry of `StagedFolder::folders`.
    Folder,
    File(TreeNode),
}

/// Mutable staging folder used while inserting entries.
#[derive(Default)]
struct StagedFolder {
    slots: Vec<Slot>,
    folders: Vec<(ArchivePath, StagedFolder)>,
}

impl StagedFolder {
    /// Returns the child folder at `path`, creating it on first use.
    fn folder_mut(&mut self, path: ArchivePath) -> &mut StagedFolder {
        let existing = self
            .folders
            .iter()
            .position(|(p, _)| p.file_name() == path.file_name());

        let index = match existing {
            Some(index) => index,
            None => {
                if self.has_file(path.file_name()) {
                    log::warn!("Folder '{}' shares its name with a file entry", path);
                }
                self.folders.push((path, StagedFolder::default()));
                self.slots.push(Slot::Folder);
                self.folders.len() - 1
            }
        };
        &mut self.folders[index].1
    }

    fn has_file(&self, name: &str) -> bool {
        self.slots
            .iter()
            .any(|slot| matches!(slot, Slot::File(node) if node.name() == name))
    }

    fn insert_file(&mut self, path: &ArchivePath, data: FileData) {
        let node = TreeNode::file(path, data);
        let duplicate = self
            .slots
            .iter()
            .position(|slot| matches!(slot, Slot::File(f) if f.path() == path.as_str()));
        match duplicate {
            Some(index) => {
                log::warn!("Duplicate entry '{}': keeping the later one", path);
                self.slots[index] = Slot::File(node);
            }
            None => self.slots.push(Slot::File(node)),
        }
    }

    fn into_children(self) -> Vec<Arc<TreeNode>> {
        // Folder slots were pushed in the same order as `folders`.
        let mut folders = self.folders.into_iter();
        self.slots
            .into_iter()
            .filter_map(|slot| match slot {
                Slot::File(node) => Some(Arc::new(node)),
                Slot::Folder => folders
                    .next()
                    .map(|(path, folder)| Arc::new(TreeNode::folder(&path, folder.into_children()))),
            })
            .collect()
    }
}

/// Walks from `root` to the folder for `dir`, creating folders on demand.
fn ensure_folder<'a>(root: &'a mut StagedFolder, dir: &ArchivePath) -> &'a mut StagedFolder {
    let mut current = root;
    for ancestor in dir.ancestor_paths() {
        current = current.folder_mut(ancestor);
    }
    current.folder_mut(dir.clone())
}

/// Derives the root folder name from an archive file name.
///
/// A trailing `.zip` is stripped case-insensitively; other names are kept.
///
/// ```
/// use zipedit::tree::root_name;
///
/// assert_eq!(root_name("project.ZIP"), "project");
/// assert_eq!(root_name("bundle.tar"), "bundle.tar");
/// ```
pub fn root_name(archive_name: &str) -> String {
    let len = archive_name.len();
    if len >= 4 && archive_name.is_char_boundary(len - 4) {
        let (stem, ext) = archive_name.split_at(len - 4);
        if ext.eq_ignore_ascii_case(".zip") {
            return stem.to_string();
        }
    }
    archive_name.to_string()
}

/// Builds a single-rooted tree from flat entries.
///
/// Entries are sorted by path first so sibling order is deterministic.
/// Intermediate folders are created the first time a path needs them and
/// reused afterwards. An empty entry list yields a root with no children.
pub fn build(entries: Vec<FlatEntry>, archive_name: &str) -> TreeNode {
    build_with_directories(entries, Vec::new(), archive_name)
}

/// Builds a tree from flat entries plus explicit directory entries.
///
/// Directory entries only ever add folders; a folder that also appears as a
/// prefix of a file path is created once.
pub fn build_with_directories(
    entries: Vec<FlatEntry>,
    directories: Vec<ArchivePath>,
    archive_name: &str,
) -> TreeNode {
    let mut items: Vec<(ArchivePath, Option<FileData>)> = entries
        .into_iter()
        .map(|entry| (entry.path, Some(entry.data)))
        .chain(directories.into_iter().map(|dir| (dir, None)))
        .collect();
    items.sort_by(|a, b| a.0.cmp(&b.0));

    let mut root = StagedFolder::default();
    for (path, data) in items {
        match data {
            Some(data) => {
                let parent = match path.parent() {
                    Some(dir) => ensure_folder(&mut root, &dir),
                    None => &mut root,
                };
                parent.insert_file(&path, data);
            }
            None => {
                ensure_folder(&mut root, &path);
            }
        }
    }

    let tree = TreeNode::root(root_name(archive_name), root.into_children());
    log::debug!(
        "Built tree '{}' ({}) with {} files",
        tree.name(),
        ROOT_PATH,
        tree.file_count()
    );
    tree
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::ContentKind;

    fn entry(path: &str, data: &[u8]) -> FlatEntry {
        FlatEntry::from_bytes(ArchivePath::new(path).unwrap(), data.to_vec())
    }

    fn names(node: &TreeNode) -> Vec<&str> {
        node.children().iter().map(|c| c.name()).collect()
    }

    #[test]
    fn test_empty_archive_has_root() {
        let root = build(Vec::new(), "empty.zip");
        assert!(root.is_root());
        assert_eq!(root.name(), "empty");
        assert!(root.children().is_empty());
    }

    #[test]
    fn test_single_file() {
        let root = build(vec![entry("test.txt", b"Hello, World!")], "test.zip");
        assert_eq!(root.name(), "test");
        assert_eq!(names(&root), vec!["test.txt"]);
        let file = &root.children()[0];
        assert!(file.is_file());
        assert_eq!(file.path(), "test.txt");
        assert_eq!(file.text_content(), Some("Hello, World!"));
    }

    #[test]
    fn test_nested_directories_created_once() {
        let root = build(
            vec![
                entry("folder1/folder2/test2.txt", b"Content 2"),
                entry("folder1/test1.txt", b"Content 1"),
            ],
            "nested.zip",
        );
        assert_eq!(names(&root), vec!["folder1"]);

        let folder1 = &root.children()[0];
        assert!(folder1.is_folder());
        assert_eq!(folder1.path(), "folder1");
        assert_eq!(names(folder1), vec!["folder2", "test1.txt"]);

        let folder2 = root.find("folder1/folder2").unwrap();
        assert_eq!(folder2.children()[0].text_content(), Some("Content 2"));
    }

    #[test]
    fn test_children_sorted_by_path() {
        let root = build(
            vec![entry("b.txt", b"b"), entry("a.txt", b"a"), entry("C.txt", b"c")],
            "x.zip",
        );
        assert_eq!(names(&root), vec!["C.txt", "a.txt", "b.txt"]);
    }

    #[test]
    fn test_directories_materialized() {
        let root = build_with_directories(
            Vec::new(),
            vec![
                ArchivePath::new("folder1").unwrap(),
                ArchivePath::new("folder1/folder2").unwrap(),
            ],
            "dirs.zip",
        );
        assert_eq!(names(&root), vec!["folder1"]);
        let folder2 = root.find("folder1/folder2").unwrap();
        assert!(folder2.is_folder());
        assert!(folder2.children().is_empty());
    }

    #[test]
    fn test_directory_entry_and_file_share_folder() {
        let root = build_with_directories(
            vec![entry("src/main.ts", b"x")],
            vec![ArchivePath::new("src").unwrap()],
            "app.zip",
        );
        assert_eq!(names(&root), vec!["src"]);
        assert_eq!(root.children()[0].children().len(), 1);
    }

    #[test]
    fn test_duplicate_entry_keeps_later() {
        let root = build(vec![entry("a.txt", b"first"), entry("a.txt", b"second")], "d.zip");
        assert_eq!(root.children().len(), 1);
        assert_eq!(root.children()[0].text_content(), Some("second"));
    }

    #[test]
    fn test_content_kind_preserved() {
        let root = build(vec![entry("img/logo.png", &[1, 2, 3])], "k.zip");
        let logo = root.find("img/logo.png").unwrap();
        assert_eq!(logo.content_kind(), Some(ContentKind::Image));
        assert_eq!(logo.binary_data(), Some(&[1, 2, 3][..]));
    }

    #[test]
    fn test_root_name() {
        assert_eq!(root_name("test.zip"), "test");
        assert_eq!(root_name("Test.Zip"), "Test");
        assert_eq!(root_name(".zip"), "");
        assert_eq!(root_name("zip"), "zip");
        assert_eq!(root_name("résumé.zip"), "résumé");
    }
}
