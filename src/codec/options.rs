//! Decode and encode options for the archive codec.

/// Resource limits applied while decoding an archive.
///
/// Every decoded payload is held in memory for the whole session, so these
/// limits bound how much a single upload can allocate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceLimits {
    /// Maximum number of entries (files and directories) in the archive.
    pub max_entries: usize,
    /// Maximum uncompressed size of a single entry.
    pub max_entry_size: u64,
    /// Maximum uncompressed size of all entries together.
    pub max_total_size: u64,
}

impl Default for ResourceLimits {
    /// Creates resource limits with the following default values:
    ///
    /// | Limit | Default Value |
    /// |-------|---------------|
    /// | `max_entries` | 100,000 |
    /// | `max_entry_size` | 512 MiB |
    /// | `max_total_size` | 2 GiB |
    fn default() -> Self {
        Self {
            max_entries: 100_000,
            max_entry_size: 512 << 20,
            max_total_size: 2 << 30,
        }
    }
}

impl ResourceLimits {
    /// Creates new resource limits with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates resource limits with no restrictions.
    pub fn unlimited() -> Self {
        Self {
            max_entries: usize::MAX,
            max_entry_size: u64::MAX,
            max_total_size: u64::MAX,
        }
    }

    /// Sets the maximum number of entries.
    pub fn max_entries(mut self, max: usize) -> Self {
        self.max_entries = max;
        self
    }

    /// Sets the maximum size of a single entry.
    pub fn max_entry_size(mut self, max: u64) -> Self {
        self.max_entry_size = max;
        self
    }

    /// Sets the maximum total size of all entries.
    pub fn max_total_size(mut self, max: u64) -> Self {
        self.max_total_size = max;
        self
    }
}

/// Options controlling how an archive is decoded.
///
/// # Example
///
/// ```rust
/// use zipedit::{DecodeOptions, ResourceLimits};
///
/// let options = DecodeOptions::new()
///     .limits(ResourceLimits::new().max_entries(500))
///     .materialize_directories(true);
/// assert!(options.materialize_directories);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Resource limits.
    pub limits: ResourceLimits,
    /// Report explicit directory entries so empty folders appear in the tree.
    ///
    /// Off by default: the tree is built from file paths alone and directory
    /// entries are ignored.
    pub materialize_directories: bool,
}

impl DecodeOptions {
    /// Creates default decode options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the resource limits.
    pub fn limits(mut self, limits: ResourceLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Sets whether explicit directory entries are reported.
    pub fn materialize_directories(mut self, enabled: bool) -> Self {
        self.materialize_directories = enabled;
        self
    }
}

/// Compression method for encoded entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum Compression {
    /// Store entries uncompressed.
    Stored,
    /// Deflate, readable by every ZIP tool.
    #[default]
    Deflated,
}

/// Options controlling how an archive is encoded.
///
/// # Example
///
/// ```rust
/// use zipedit::{Compression, EncodeOptions};
///
/// let options = EncodeOptions::new().compression(Compression::Deflated).level(9).unwrap();
/// assert_eq!(options.level, Some(9));
/// assert!(EncodeOptions::new().level(12).is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Compression method.
    pub compression: Compression,
    /// Compression level 0-9, or `None` for the method default.
    pub level: Option<u32>,
}

impl EncodeOptions {
    /// Creates default encode options (Deflate, default level).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the compression method.
    pub fn compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }

    /// Sets the compression level (strict validation).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCompressionLevel`](crate::Error::InvalidCompressionLevel)
    /// if level is greater than 9.
    pub fn level(mut self, level: u32) -> crate::Result<Self> {
        if level > 9 {
            return Err(crate::Error::InvalidCompressionLevel { level });
        }
        self.level = Some(level);
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_decode_ignores_directories() {
        let options = DecodeOptions::default();
        assert!(!options.materialize_directories);
        assert_eq!(options.limits, ResourceLimits::default());
    }

    #[test]
    fn test_unlimited() {
        let limits = ResourceLimits::unlimited();
        assert_eq!(limits.max_entries, usize::MAX);
        assert_eq!(limits.max_total_size, u64::MAX);
    }

    #[test]
    fn test_level_validation() {
        assert_eq!(EncodeOptions::new().level(0).unwrap().level, Some(0));
        let err = EncodeOptions::new().level(10).unwrap_err();
        assert!(matches!(
            err,
            crate::Error::InvalidCompressionLevel { level: 10 }
        ));
    }

    #[test]
    fn test_default_encode_is_deflate() {
        let options = EncodeOptions::default();
        assert_eq!(options.compression, Compression::Deflated);
        assert_eq!(options.level, None);
    }
}
