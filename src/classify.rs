//! File type classification by extension.
//!
//! Every file in a decoded archive is classified exactly once, when it is
//! read, and the classification decides whether its payload is kept as text
//! or as raw bytes. The editor language hint is derived the same way.

use std::fmt;

use crate::archive_path::file_name;

/// Extensions whose entries are decoded as UTF-8 text.
const TEXT_EXTENSIONS: &[&str] = &[
    "ts", "tsx", "js", "jsx", "json", "html", "css", "md", "txt", "yml", "pem",
];

/// Extensions whose entries are images (kept as bytes).
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "svg"];

/// How a file's payload is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentKind {
    /// UTF-8 text, editable in the text editor.
    Text,
    /// Image data, kept as raw bytes.
    Image,
    /// Any other data, kept as raw bytes.
    Binary,
}

impl ContentKind {
    /// Returns true if payloads of this kind are held as text.
    pub fn is_text(self) -> bool {
        self == ContentKind::Text
    }

    /// Returns the lowercase name of this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            ContentKind::Text => "text",
            ContentKind::Image => "image",
            ContentKind::Binary => "binary",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Text after the last `.` of the final segment.
///
/// Unlike [`ArchivePath::extension`](crate::ArchivePath::extension), a
/// leading dot counts, so `.yml` classifies as `yml`.
fn suffix(name: &str) -> Option<&str> {
    file_name(name).rsplit_once('.').map(|(_, ext)| ext)
}

/// Classifies a file name or path by its extension.
///
/// This is a total function: names without an extension, or with an
/// unrecognized one, are [`ContentKind::Binary`].
///
/// ```
/// use zipedit::{classify, ContentKind};
///
/// assert_eq!(classify("src/App.TSX"), ContentKind::Text);
/// assert_eq!(classify("logo.png"), ContentKind::Image);
/// assert_eq!(classify("Makefile"), ContentKind::Binary);
/// ```
pub fn classify(name: &str) -> ContentKind {
    let Some(ext) = suffix(name) else {
        return ContentKind::Binary;
    };
    let ext = ext.to_ascii_lowercase();
    let ext = ext.as_str();

    if TEXT_EXTENSIONS.contains(&ext) {
        ContentKind::Text
    } else if IMAGE_EXTENSIONS.contains(&ext) {
        ContentKind::Image
    } else {
        // exe, zip, pdf, woff, ttf and everything unrecognized
        ContentKind::Binary
    }
}

/// Returns the editor language identifier for a file name.
///
/// Unrecognized or missing extensions map to `"plaintext"`.
///
/// ```
/// use zipedit::language_hint;
///
/// assert_eq!(language_hint("index.ts"), "typescript");
/// assert_eq!(language_hint("README.md"), "markdown");
/// assert_eq!(language_hint("data.bin"), "plaintext");
/// ```
pub fn language_hint(name: &str) -> &'static str {
    let Some(ext) = suffix(name) else {
        return "plaintext";
    };
    match ext.to_ascii_lowercase().as_str() {
        "js" | "jsx" => "javascript",
        "ts" | "tsx" => "typescript",
        "html" => "html",
        "css" => "css",
        "json" => "json",
        "md" => "markdown",
        "py" => "python",
        "java" => "java",
        "cpp" => "cpp",
        "c" => "c",
        "go" => "go",
        "rs" => "rust",
        "sql" => "sql",
        "yaml" | "yml" => "yaml",
        "xml" => "xml",
        "sh" | "bash" => "shell",
        _ => "plaintext",
    }
}
