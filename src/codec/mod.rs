//! Archive codec infrastructure.
//!
//! This module provides the abstraction layer between raw archive bytes and
//! the flat entry list the tree is built from. [`ZipCodec`] implements it
//! over the `zip` crate.

mod options;
mod zip;

pub use self::options::{Compression, DecodeOptions, EncodeOptions, ResourceLimits};
pub use self::zip::ZipCodec;

use crate::archive_path::ArchivePath;
use crate::classify::ContentKind;
use crate::tree::{FileData, TreeNode};
use crate::Result;

/// A decoded file entry before it is placed in a tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatEntry {
    /// Full path inside the archive.
    pub path: ArchivePath,
    /// Classified content.
    pub data: FileData,
}

impl FlatEntry {
    /// Creates an entry, classifying `data` by the path's extension.
    pub fn from_bytes(path: ArchivePath, data: Vec<u8>) -> Self {
        let kind = crate::classify(path.as_str());
        Self {
            data: FileData::from_bytes(kind, data),
            path,
        }
    }

    /// Creates an entry whose payload could not be read.
    pub fn unreadable(path: ArchivePath) -> Self {
        let kind = crate::classify(path.as_str());
        Self {
            data: FileData::unreadable(kind),
            path,
        }
    }

    /// Returns the classified content kind.
    pub fn kind(&self) -> ContentKind {
        self.data.kind()
    }
}

/// Result of decoding an archive container.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodedArchive {
    /// File entries in archive order.
    pub entries: Vec<FlatEntry>,
    /// Explicit directory entries; empty unless
    /// [`DecodeOptions::materialize_directories`] is set.
    pub directories: Vec<ArchivePath>,
}

impl DecodedArchive {
    /// Returns the paths of entries that could not be read.
    pub fn unreadable_paths(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(|e| e.data.is_unreadable())
            .map(|e| e.path.as_str())
    }

    /// Builds the tree for this archive.
    pub fn into_tree(self, archive_name: &str) -> TreeNode {
        crate::tree::build_with_directories(self.entries, self.directories, archive_name)
    }
}

/// Converts between archive bytes and trees.
///
/// Implementations must be pure with respect to their inputs: decoding the
/// same bytes twice yields the same entries, and encoding never mutates the
/// tree. `Send + Sync` lets the async API run them on a blocking pool.
pub trait ArchiveCodec: Send + Sync {
    /// Decodes archive bytes into flat entries.
    ///
    /// A malformed container fails the whole call; an unreadable entry does
    /// not (see [`FlatEntry::unreadable`]).
    fn decode(&self, bytes: &[u8]) -> Result<DecodedArchive>;

    /// Encodes the files of a tree into archive bytes.
    fn encode(&self, root: &TreeNode) -> Result<Vec<u8>>;
}
