//! Shared test utilities for integration tests.
//!
//! Archive fixtures are written with the `zip` crate directly so tests do
//! not depend on the encoder under test to produce their inputs.
//!
//! Note: `#![allow(dead_code)]` is required because each integration test file
//! compiles as a separate crate and may only use a subset of these helpers.

#![allow(dead_code)]

use std::io::{Cursor, Read, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};
use zipedit::{SessionStore, ZipCodec};

/// Creates an in-memory ZIP archive.
///
/// Names ending in `/` are written as directory entries; everything else is
/// a stored file with the given data.
///
/// # Example
///
/// ```ignore
/// let bytes = zip_bytes(&[("folder/", b""), ("folder/a.txt", b"hello")]);
/// ```
pub fn zip_bytes(entries: &[(&str, &[u8])]) -> Vec<u8> {
    zip_bytes_with(CompressionMethod::Stored, entries)
}

/// Like [`zip_bytes`], with a chosen compression method for files.
pub fn zip_bytes_with(method: CompressionMethod, entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(method);
    for (name, data) in entries {
        if name.ends_with('/') {
            writer.add_directory(*name, options).unwrap();
        } else {
            writer.start_file(*name, options).unwrap();
            writer.write_all(data).unwrap();
        }
    }
    writer.finish().unwrap().into_inner()
}

/// Returns the entry names of an archive in central-directory order.
pub fn entry_names(bytes: &[u8]) -> Vec<String> {
    let archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
    archive.file_names().map(String::from).collect::<Vec<_>>()
}

/// Reads one entry of an archive.
pub fn read_entry(bytes: &[u8], name: &str) -> Vec<u8> {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut file = archive.by_name(name).unwrap();
    let mut data = Vec::new();
    file.read_to_end(&mut data).unwrap();
    data
}

/// Corrupts the stored data of the first occurrence of `marker`.
///
/// With stored entries the marker appears verbatim in the archive, so
/// flipping its first byte makes that entry fail its CRC check.
pub fn corrupt_marker(bytes: &mut [u8], marker: &[u8]) {
    let pos = bytes
        .windows(marker.len())
        .position(|w| w == marker)
        .expect("marker not found in archive");
    bytes[pos] ^= 0xff;
}

/// Loads `entries` as `name` into a fresh store.
pub fn loaded_store(name: &str, entries: &[(&str, &[u8])]) -> SessionStore {
    let mut store = SessionStore::new();
    store
        .load_archive(&ZipCodec::new(), zip_bytes(entries), name)
        .unwrap();
    store
}
