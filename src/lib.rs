//! # zipedit
//!
//! In-memory editing of ZIP archives.
//!
//! This crate decodes a ZIP archive into a file tree, keeps an editing
//! session over it (opened files, unsaved edits, selection) and encodes the
//! edited tree back into an archive. It is designed to sit behind a browser
//! UI through the `wasm` feature, but the core is plain Rust.
//!
//! ## Quick Start
//!
//! ### Editing an Archive
//!
//! ```rust
//! use zipedit::{Action, ArchiveCodec, Result, SessionStore, ZipCodec};
//! # use zipedit::{ArchivePath, FlatEntry, tree};
//!
//! fn main() -> Result<()> {
//!     # let original = ZipCodec::new().encode(&tree::build(
//!     #     vec![FlatEntry::from_bytes(ArchivePath::new("notes.md")?, b"# Notes".to_vec())],
//!     #     "notes.zip",
//!     # ))?;
//!     let codec = ZipCodec::new();
//!     let mut store = SessionStore::new();
//!     store.load_archive(&codec, original, "notes.zip")?;
//!
//!     store.dispatch(Action::select("notes.md"));
//!     store.dispatch(Action::edit("# Notes\n\n- ship it"));
//!     assert!(store.state().is_dirty("notes.md"));
//!     store.dispatch(Action::Save);
//!
//!     if let Some(exported) = store.export_archive(&codec)? {
//!         println!("{}: {} bytes", exported.file_name, exported.bytes.len());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ### Working With the Tree Directly
//!
//! ```rust
//! use zipedit::{ArchiveCodec, ArchivePath, FlatEntry, ZipCodec, tree};
//!
//! let root = tree::build(
//!     vec![
//!         FlatEntry::from_bytes(ArchivePath::new("src/main.ts").unwrap(), b"run()".to_vec()),
//!         FlatEntry::from_bytes(ArchivePath::new("logo.png").unwrap(), vec![0x89, 0x50]),
//!     ],
//!     "app.zip",
//! );
//! assert_eq!(root.name(), "app");
//!
//! let bytes = ZipCodec::new().encode(&root).unwrap();
//! let decoded = ZipCodec::new().decode(&bytes).unwrap();
//! assert_eq!(decoded.entries.len(), 2);
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `async` | No | Decode/encode on Tokio's blocking pool |
//! | `wasm` | No | WebAssembly/browser support |
//!
//! ## Async API
//!
//! Enable the `async` feature for Tokio-based loading and export:
//!
//! ```rust,ignore
//! # #[cfg(feature = "async")]
//! use zipedit::{Result, SessionStore, ZipCodec};
//!
//! # #[cfg(feature = "async")]
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let bytes = tokio::fs::read("project.zip").await?;
//!     let mut store = SessionStore::new();
//!     store.load_archive_async(&ZipCodec::new(), bytes, "project.zip").await?;
//!     Ok(())
//! }
//! # #[cfg(not(feature = "async"))]
//! # fn main() {}
//! ```
//!
//! ## Error Handling
//!
//! All fallible operations return [`Result<T>`], an alias for
//! `std::result::Result<T, Error>`. A failed load or export leaves the
//! session exactly as it was; see [`error`] for the details.
//!
//! ## Safety and Resource Limits
//!
//! - **Path validation**: entries named with `..`, absolute paths or NUL
//!   bytes are skipped while decoding
//! - **Resource limits**: entry count and decompressed sizes are capped
//!   (see [`ResourceLimits`])
//!
//! ## Minimum Supported Rust Version (MSRV)
//!
//! This crate requires **Rust 1.85** or later.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]

pub mod archive_path;
pub mod classify;
pub mod codec;
pub mod error;
pub mod session;
pub mod tree;

// Async API (requires "async" feature)
#[cfg(feature = "async")]
#[cfg_attr(docsrs, doc(cfg(feature = "async")))]
pub mod async_api;

pub use archive_path::ArchivePath;
pub use classify::{ContentKind, classify, language_hint};
pub use error::{Error, Result};

pub use codec::{
    ArchiveCodec, Compression, DecodeOptions, DecodedArchive, EncodeOptions, FlatEntry,
    ResourceLimits, ZipCodec,
};

pub use tree::{FileData, NodeKind, Payload, TreeNode};

pub use session::{
    Action, EditorDocument, ExportedArchive, FileDownload, LoadTicket, Session, SessionStore,
    SubscriptionId, WorkingCopy,
};

#[cfg(feature = "async")]
pub use async_api::{decode_tree_async, encode_async};

// WASM/Browser support (requires "wasm" feature)
#[cfg(all(feature = "wasm", target_arch = "wasm32"))]
#[cfg_attr(docsrs, doc(cfg(feature = "wasm")))]
pub mod wasm;

#[cfg(all(feature = "wasm", target_arch = "wasm32"))]
pub use wasm::WasmSession;
