//! Async archive loading and export with Tokio.
//!
//! Decoding and encoding are CPU-bound and synchronous, so they run on
//! Tokio's blocking pool against owned inputs: the archive bytes for a
//! load, and a shared snapshot of the root for an export. The session is
//! only touched once the background work has finished.
//!
//! # Example
//!
//! ```rust,ignore
//! use zipedit::{SessionStore, ZipCodec};
//!
//! #[tokio::main]
//! async fn main() -> zipedit::Result<()> {
//!     let bytes = tokio::fs::read("project.zip").await?;
//!     let mut store = SessionStore::new();
//!     store.load_archive_async(&ZipCodec::new(), bytes, "project.zip").await?;
//!
//!     if let Some(exported) = store.export_archive_async(&ZipCodec::new()).await? {
//!         tokio::fs::write(&exported.file_name, &exported.bytes).await?;
//!     }
//!     Ok(())
//! }
//! ```

use std::sync::Arc;

use crate::codec::ArchiveCodec;
use crate::session::{ExportedArchive, SessionStore};
use crate::tree::TreeNode;
use crate::{Error, Result};

/// Decodes `bytes` and builds the tree on the blocking pool.
pub async fn decode_tree_async<C>(codec: &C, bytes: Vec<u8>, archive_name: &str) -> Result<TreeNode>
where
    C: ArchiveCodec + Clone + 'static,
{
    let codec = codec.clone();
    let archive_name = archive_name.to_string();
    tokio::task::spawn_blocking(move || {
        codec
            .decode(&bytes)
            .map(|decoded| decoded.into_tree(&archive_name))
    })
    .await
    .map_err(|e| Error::Io(std::io::Error::other(e)))?
}

/// Encodes `root` on the blocking pool.
pub async fn encode_async<C>(codec: &C, root: Arc<TreeNode>) -> Result<Vec<u8>>
where
    C: ArchiveCodec + Clone + 'static,
{
    let codec = codec.clone();
    tokio::task::spawn_blocking(move || codec.encode(&root))
        .await
        .map_err(|e| Error::Io(std::io::Error::other(e)))?
}

impl SessionStore {
    /// Async version of [`load_archive`](Self::load_archive).
    ///
    /// Returns `Ok(false)` if another load was started on this store while
    /// this one was decoding; its result is discarded.
    ///
    /// # Errors
    ///
    /// Same as [`load_archive`](Self::load_archive). The session is unchanged
    /// on error.
    pub async fn load_archive_async<C>(
        &mut self,
        codec: &C,
        bytes: Vec<u8>,
        file_name: &str,
    ) -> Result<bool>
    where
        C: ArchiveCodec + Clone + 'static,
    {
        let ticket = self.begin_load(file_name);
        let result = decode_tree_async(codec, bytes, file_name).await;
        if let Err(e) = &result {
            log::warn!("Could not open '{}': {}", file_name, e);
        }
        self.complete_load(ticket, result)
    }

    /// Async version of [`export_archive`](Self::export_archive).
    ///
    /// Encodes the root as it was when this was called.
    pub async fn export_archive_async<C>(&self, codec: &C) -> Result<Option<ExportedArchive>>
    where
        C: ArchiveCodec + Clone + 'static,
    {
        let Some(root) = self.state().root().cloned() else {
            return Ok(None);
        };
        let file_name = self.export_name();
        let bytes = encode_async(codec, root).await?;
        Ok(Some(ExportedArchive { file_name, bytes }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::ZipCodec;
    use crate::session::Action;

    #[tokio::test]
    async fn test_decode_garbage_fails() {
        let err = decode_tree_async(&ZipCodec::new(), b"nope".to_vec(), "x.zip")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Decode { .. }));
    }

    #[tokio::test]
    async fn test_empty_round_trip() {
        let root = Arc::new(crate::tree::build(Vec::new(), "empty.zip"));
        let bytes = encode_async(&ZipCodec::new(), root).await.unwrap();
        let tree = decode_tree_async(&ZipCodec::new(), bytes, "empty.zip")
            .await
            .unwrap();
        assert_eq!(tree.name(), "empty");
        assert!(tree.children().is_empty());
    }

    #[tokio::test]
    async fn test_store_export_without_archive() {
        let store = SessionStore::new();
        let exported = store.export_archive_async(&ZipCodec::new()).await.unwrap();
        assert!(exported.is_none());
    }

    #[tokio::test]
    async fn test_store_load_then_select() {
        let root = crate::tree::build(Vec::new(), "e.zip");
        let bytes = ZipCodec::new().encode(&root).unwrap();

        let mut store = SessionStore::new();
        assert!(store
            .load_archive_async(&ZipCodec::new(), bytes, "e.zip")
            .await
            .unwrap());
        store.dispatch(Action::select("/"));
        assert_eq!(store.state().archive_name(), Some("e.zip"));
    }
}
