//! The archive file tree.
//!
//! A decoded archive is held as a single-rooted tree of [`TreeNode`]s. The
//! root is a synthetic folder at [`ROOT_PATH`] named after the archive; every
//! other node is addressed by its slash-separated archive path.
//!
//! - [`build`] turns flat decoded entries into a tree.
//! - [`serialize`] flattens a tree back into entries, in insertion order.
//! - [`replace_text`] produces a new tree version with one file changed,
//!   sharing every untouched subtree with the old version.

mod build;
mod node;
mod serialize;
mod update;

pub use build::{build, build_with_directories, root_name};
pub use node::{FileData, NodeKind, Payload, ROOT_PATH, TreeNode};
pub use serialize::{EntryData, SerializedEntry, serialize};
pub use update::{replace_text, update_file};
