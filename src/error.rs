//! Error types for archive editing operations.
//!
//! This module provides the [`Error`] enum which represents all failure modes
//! of decoding, editing and re-encoding an archive, along with a convenient
//! [`Result<T>`] type alias.
//!
//! # Error Handling
//!
//! Whole-archive failures ([`Error::Decode`], [`Error::Encode`]) abort the
//! operation and leave any session state untouched. Per-entry failures never
//! abort a decode: the entry is kept with an unreadable payload and a warning
//! is logged.
//!
//! ```rust
//! use zipedit::{Error, SessionStore, ZipCodec};
//!
//! let mut store = SessionStore::new();
//! match store.load_archive(&ZipCodec::new(), b"not a zip".to_vec(), "broken.zip") {
//!     Ok(()) => println!("loaded"),
//!     Err(Error::Decode { reason }) => println!("Could not open archive: {}", reason),
//!     Err(e) => println!("Error: {}", e),
//! }
//! assert!(store.state().root().is_none());
//! ```

use std::io;

/// The main error type for archive editing operations.
///
/// # Error Categories
///
/// | Category | Variants | Typical Cause |
/// |----------|----------|---------------|
/// | Container | [`Decode`][Self::Decode], [`Encode`][Self::Encode] | Malformed archive, writer failure |
/// | Entry | [`EntryRead`][Self::EntryRead] | Corrupt or unsupported single entry |
/// | Paths | [`InvalidArchivePath`][Self::InvalidArchivePath] | Unsafe entry names |
/// | Resources | [`ResourceLimitExceeded`][Self::ResourceLimitExceeded] | Safety limits |
/// | I/O | [`Io`][Self::Io] | Reader/writer plumbing |
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// An I/O error occurred while reading or writing archive data.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The archive container could not be opened.
    ///
    /// Returned when the bytes are not a ZIP archive, the central directory
    /// is truncated, or the background decode task failed. Nothing from a
    /// failed decode reaches the session.
    #[error("Failed to decode archive: {reason}")]
    Decode {
        /// A description of what went wrong.
        reason: String,
    },

    /// The archive could not be written.
    #[error("Failed to encode archive: {reason}")]
    Encode {
        /// A description of what went wrong.
        reason: String,
    },

    /// A single entry could not be read.
    ///
    /// Decoding downgrades these to an unreadable payload and continues, so
    /// this variant is mostly seen in log output.
    #[error("Failed to read entry '{path}': {reason}")]
    EntryRead {
        /// The entry path inside the archive.
        path: String,
        /// A description of the failure.
        reason: String,
    },

    /// A resource limit was exceeded.
    ///
    /// This error protects against malicious archives (e.g., "zip bombs")
    /// that decompress to extremely large sizes. Adjust limits with
    /// [`DecodeOptions`](crate::DecodeOptions).
    #[error("Resource limit exceeded: {0}")]
    ResourceLimitExceeded(String),

    /// An archive path is invalid.
    ///
    /// Archive paths must:
    /// - Not contain null bytes
    /// - Not be empty
    /// - Not be absolute
    /// - Not contain `.` or `..` segments
    ///
    /// ```rust
    /// use zipedit::ArchivePath;
    ///
    /// match ArchivePath::new("path/to/file.txt") {
    ///     Ok(path) => println!("Valid path: {}", path.as_str()),
    ///     Err(e) => eprintln!("Invalid path: {}", e),
    /// }
    /// ```
    #[error("Invalid archive path: {0}")]
    InvalidArchivePath(String),

    /// An invalid compression level was provided.
    ///
    /// Compression levels must be in the range 0-9.
    #[error("invalid compression level {level}: must be 0-9")]
    InvalidCompressionLevel {
        /// The invalid level that was provided.
        level: u32,
    },
}

impl Error {
    /// Creates a Decode error.
    pub fn decode(reason: impl Into<String>) -> Self {
        Error::Decode {
            reason: reason.into(),
        }
    }

    /// Creates an Encode error.
    pub fn encode(reason: impl Into<String>) -> Self {
        Error::Encode {
            reason: reason.into(),
        }
    }

    /// Creates an EntryRead error.
    pub fn entry_read(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::EntryRead {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Returns `true` if this error aborted a whole decode or encode.
    ///
    /// Fatal errors are the ones a host should surface to the user as a
    /// visible notification; the session is unchanged after them.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Error::EntryRead { .. })
    }

    /// Returns the entry path associated with this error, if any.
    pub fn entry_path(&self) -> Option<&str> {
        match self {
            Error::EntryRead { path, .. } => Some(path.as_str()),
            _ => None,
        }
    }
}

/// A specialized Result type for archive editing operations.
pub type Result<T> = std::result::Result<T, Error>;
