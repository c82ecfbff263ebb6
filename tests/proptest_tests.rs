//! Property-based tests using proptest.
//!
//! These tests verify invariants of classification, paths and the
//! tree/archive round trip using randomly generated inputs.

use std::collections::BTreeMap;

use proptest::prelude::*;
use zipedit::tree::{self, EntryData};
use zipedit::{ArchiveCodec, ArchivePath, ContentKind, FlatEntry, ZipCodec, classify};

/// Strategy for generating valid archive path strings.
///
/// - 1-4 path components separated by '/'
/// - Each component is 1-10 alphanumeric characters with optional underscores/dots/dashes
/// - Excludes "." and ".." segments (path traversal)
fn valid_path_strategy() -> impl Strategy<Value = String> {
    proptest::collection::vec("[a-zA-Z0-9][a-zA-Z0-9_.-]{0,9}", 1..4)
        .prop_map(|parts| parts.join("/"))
        .prop_filter("must not contain invalid segments", |s| {
            !s.split('/').any(|seg| seg == "." || seg == "..")
        })
}

/// A file payload: text for `.txt`, bytes for `.bin`, never empty.
#[derive(Debug, Clone)]
enum Content {
    Text(String),
    Bytes(Vec<u8>),
}

/// Strategy for a file set whose folder names never collide with file names.
///
/// Folder segments have no dot and file names always do, so no path is both
/// a file and a folder prefix of another file.
fn file_set_strategy() -> impl Strategy<Value = BTreeMap<String, Content>> {
    let folders = proptest::collection::vec("[a-z]{1,6}", 0..3);
    let text_file = (folders.clone(), "[a-z]{1,8}", "\\PC{1,40}").prop_map(|(dirs, stem, text)| {
        (join(&dirs, &format!("{}.txt", stem)), Content::Text(text))
    });
    let bin_file = (
        folders,
        "[a-z]{1,8}",
        proptest::collection::vec(any::<u8>(), 1..64),
    )
        .prop_map(|(dirs, stem, bytes)| (join(&dirs, &format!("{}.bin", stem)), Content::Bytes(bytes)));

    proptest::collection::vec(prop_oneof![text_file, bin_file], 0..12)
        .prop_map(|files| files.into_iter().collect())
}

fn join(dirs: &[String], file: &str) -> String {
    dirs.iter()
        .map(String::as_str)
        .chain(std::iter::once(file))
        .collect::<Vec<_>>()
        .join("/")
}

fn flat_entries(files: &BTreeMap<String, Content>) -> Vec<FlatEntry> {
    files
        .iter()
        .map(|(path, content)| {
            let data = match content {
                Content::Text(text) => text.as_bytes().to_vec(),
                Content::Bytes(bytes) => bytes.clone(),
            };
            FlatEntry::from_bytes(ArchivePath::new(path).unwrap(), data)
        })
        .collect()
}

proptest! {
    /// Valid paths should always parse and keep their string form.
    #[test]
    fn valid_paths_parse_successfully(path in valid_path_strategy()) {
        let parsed = ArchivePath::new(&path);
        prop_assert!(parsed.is_ok(), "Valid path '{}' failed to parse: {:?}", path, parsed);
        let parsed = parsed.unwrap();
        prop_assert_eq!(parsed.as_str(), &path);
    }

    /// Paths with ".." as a complete segment should always be rejected.
    #[test]
    fn traversal_paths_rejected(
        prefix in "[a-zA-Z0-9]{1,5}",
        suffix in "[a-zA-Z0-9]{1,5}"
    ) {
        let path = format!("{}/../{}", prefix, suffix);
        prop_assert!(ArchivePath::new(&path).is_err());
    }

    /// Classification is total and depends only on the final extension.
    #[test]
    fn classification_is_total(name in any::<String>()) {
        let kind = classify(&name);
        prop_assert!(matches!(
            kind,
            ContentKind::Text | ContentKind::Image | ContentKind::Binary
        ));
        prop_assert_eq!(kind, classify(&name));
    }

    /// Names without any dot are always binary.
    #[test]
    fn no_extension_is_binary(name in "[a-zA-Z0-9_/-]{0,20}") {
        prop_assert_eq!(classify(&name), ContentKind::Binary);
    }

    /// Extension matching ignores case.
    #[test]
    fn classification_ignores_case(
        stem in "[a-z]{1,8}",
        ext in prop_oneof![Just("ts"), Just("md"), Just("png"), Just("svg"), Just("pdf")]
    ) {
        let lower = classify(&format!("{}.{}", stem, ext));
        let upper = classify(&format!("{}.{}", stem, ext.to_uppercase()));
        prop_assert_eq!(lower, upper);
    }

    /// build → encode → decode → build keeps every file's path and payload.
    #[test]
    fn archive_round_trip_preserves_files(files in file_set_strategy()) {
        let codec = ZipCodec::new();
        let root = tree::build(flat_entries(&files), "prop.zip");
        let bytes = codec.encode(&root).unwrap();
        let rebuilt = codec.decode(&bytes).unwrap().into_tree("prop.zip");

        let flat = tree::serialize(&rebuilt);
        prop_assert_eq!(flat.len(), files.len());
        for entry in flat {
            let expected = files.get(&entry.path);
            prop_assert!(expected.is_some(), "unexpected entry {}", entry.path);
            match (expected.unwrap(), entry.data) {
                (Content::Text(text), EntryData::Text(actual)) => prop_assert_eq!(actual, text.as_str()),
                (Content::Bytes(bytes), EntryData::Bytes(actual)) => prop_assert_eq!(actual, bytes.as_slice()),
                (expected, actual) => prop_assert!(false, "{:?} decoded as {:?}", expected, actual),
            }
        }
    }

    /// Building twice from the same entries yields equal trees.
    #[test]
    fn build_is_deterministic(files in file_set_strategy()) {
        let a = tree::build(flat_entries(&files), "d.zip");
        let mut reversed = flat_entries(&files);
        reversed.reverse();
        let b = tree::build(reversed, "d.zip");
        prop_assert_eq!(a, b);
    }
}
