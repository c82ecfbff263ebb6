//! Archive path type with validation for entry names.

use crate::{Error, Result};
use std::fmt;

/// Maximum length for archive paths (in bytes).
///
/// ZIP stores name lengths in 16 bits, so anything longer did not come
/// from a well-formed archive.
const MAX_PATH_LENGTH: usize = u16::MAX as usize;

/// A validated slash-separated path of an entry inside an archive.
///
/// `ArchivePath` is the key every tree node and working copy is addressed
/// by. It validates that:
/// - No NUL bytes are present
/// - The path is not absolute (does not start with `/`)
/// - No empty segments exist (no `//` or trailing `/`)
/// - No `.` or `..` segments are present
///
/// # Examples
///
/// ```
/// use zipedit::ArchivePath;
///
/// let path = ArchivePath::new("src/main.ts").unwrap();
/// assert_eq!(path.file_name(), "main.ts");
/// assert_eq!(path.extension(), Some("ts"));
///
/// assert!(ArchivePath::new("../secret").is_err());
/// assert!(ArchivePath::new("/absolute/path").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ArchivePath(String);

impl ArchivePath {
    /// Creates a new `ArchivePath` from a string, validating it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArchivePath`] if the path is empty, absolute,
    /// contains NUL bytes, empty segments, or `.`/`..` segments.
    pub fn new(s: &str) -> Result<Self> {
        Self::validate(s)?;
        Ok(Self(s.to_string()))
    }

    /// Creates an `ArchivePath` from a raw ZIP entry name.
    ///
    /// ZIP writers on Windows sometimes store `\` separators, and directory
    /// entries carry a trailing `/`; both are normalized before validation.
    pub fn from_entry_name(name: &str) -> Result<Self> {
        let normalized = name.replace('\\', "/");
        let trimmed = normalized.trim_end_matches('/');
        Self::new(trimmed)
    }

    fn validate(s: &str) -> Result<()> {
        if s.contains('\0') {
            return Err(Error::InvalidArchivePath("contains NUL byte".into()));
        }

        if s.is_empty() {
            return Err(Error::InvalidArchivePath("empty path".into()));
        }

        if s.len() > MAX_PATH_LENGTH {
            return Err(Error::InvalidArchivePath(format!(
                "path exceeds maximum length of {} bytes",
                MAX_PATH_LENGTH
            )));
        }

        if s.starts_with('/') {
            return Err(Error::InvalidArchivePath(
                "absolute path not allowed".into(),
            ));
        }

        if s.ends_with('/') {
            return Err(Error::InvalidArchivePath(
                "trailing slash not allowed".into(),
            ));
        }

        for segment in s.split('/') {
            match segment {
                "" => {
                    return Err(Error::InvalidArchivePath(
                        "empty segment (consecutive slashes)".into(),
                    ));
                }
                "." => {
                    return Err(Error::InvalidArchivePath("'.' segment not allowed".into()));
                }
                ".." => {
                    return Err(Error::InvalidArchivePath(
                        "'..' segment not allowed (path traversal)".into(),
                    ));
                }
                _ => {}
            }
        }

        Ok(())
    }

    /// Returns the path as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the path and returns the inner string.
    pub fn into_string(self) -> String {
        self.0
    }

    /// Returns the parent directory of this path, if any.
    ///
    /// Returns `None` if this path is a single segment.
    pub fn parent(&self) -> Option<Self> {
        self.0
            .rfind('/')
            .map(|idx| Self(self.0[..idx].to_string()))
    }

    /// Returns the file name (last segment) of this path.
    pub fn file_name(&self) -> &str {
        file_name(&self.0)
    }

    /// Returns the file extension, if any.
    ///
    /// A leading dot does not start an extension (`.gitignore` has none).
    pub fn extension(&self) -> Option<&str> {
        extension(self.file_name())
    }

    /// Returns an iterator over the path segments.
    ///
    /// ```
    /// use zipedit::ArchivePath;
    ///
    /// let path = ArchivePath::new("a/b/c.txt").unwrap();
    /// let components: Vec<_> = path.components().collect();
    /// assert_eq!(components, vec!["a", "b", "c.txt"]);
    /// ```
    pub fn components(&self) -> impl Iterator<Item = &str> {
        self.0.split('/')
    }

    /// Returns the proper ancestors of this path, shortest first.
    ///
    /// ```
    /// use zipedit::ArchivePath;
    ///
    /// let path = ArchivePath::new("a/b/c.txt").unwrap();
    /// let ancestors: Vec<_> = path.ancestors().collect();
    /// assert_eq!(ancestors, vec!["a", "a/b"]);
    /// ```
    pub fn ancestors(&self) -> impl Iterator<Item = &str> {
        self.0
            .match_indices('/')
            .map(move |(idx, _)| &self.0[..idx])
    }

    /// Like [`ancestors`](Self::ancestors), as owned paths.
    pub(crate) fn ancestor_paths(&self) -> impl Iterator<Item = ArchivePath> + '_ {
        // Prefixes of a valid path are valid.
        self.ancestors().map(|prefix| Self(prefix.to_string()))
    }

    /// Returns true if this path starts with the given prefix.
    ///
    /// This performs a component-wise comparison, not a string prefix match.
    /// For example, `"foo/bar"` starts with `"foo"` but not `"fo"`.
    pub fn starts_with(&self, prefix: &str) -> bool {
        is_within(&self.0, prefix)
    }
}

/// Returns the last segment of a slash-separated path.
pub(crate) fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Returns the extension of a file name, if any.
pub(crate) fn extension(name: &str) -> Option<&str> {
    let name = file_name(name);
    match name.rfind('.') {
        Some(0) | None => None,
        Some(pos) => Some(&name[pos + 1..]),
    }
}

/// Component-wise prefix test on slash-separated paths.
pub(crate) fn is_within(path: &str, prefix: &str) -> bool {
    if prefix.is_empty() || path == prefix {
        return true;
    }
    path.len() > prefix.len()
        && path.starts_with(prefix)
        && path.as_bytes()[prefix.len()] == b'/'
}

impl AsRef<str> for ArchivePath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArchivePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<&str> for ArchivePath {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<String> for ArchivePath {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        Self::validate(&s)?;
        Ok(Self(s))
    }
}
