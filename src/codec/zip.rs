//! ZIP implementation of [`ArchiveCodec`].

use std::io::{Cursor, Read, Write};

use ::zip::result::ZipError;
use ::zip::write::SimpleFileOptions;
use ::zip::{CompressionMethod, ZipArchive, ZipWriter};

use super::{ArchiveCodec, Compression, DecodeOptions, DecodedArchive, EncodeOptions, FlatEntry};
use crate::archive_path::ArchivePath;
use crate::tree::{EntryData, TreeNode, serialize};
use crate::{Error, Result};

/// Upper bound on the buffer reserved from an entry's declared size.
const PREALLOC_LIMIT: u64 = 64 * 1024;

/// Reads and writes ZIP archives entirely in memory.
///
/// # Example
///
/// ```rust
/// use zipedit::{ArchiveCodec, ZipCodec, tree};
///
/// let codec = ZipCodec::new();
/// let empty = tree::build(Vec::new(), "empty.zip");
/// let bytes = codec.encode(&empty).unwrap();
/// let decoded = codec.decode(&bytes).unwrap();
/// assert!(decoded.entries.is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ZipCodec {
    decode_options: DecodeOptions,
    encode_options: EncodeOptions,
}

impl ZipCodec {
    /// Creates a codec with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the decode options.
    pub fn with_decode_options(mut self, options: DecodeOptions) -> Self {
        self.decode_options = options;
        self
    }

    /// Sets the encode options.
    pub fn with_encode_options(mut self, options: EncodeOptions) -> Self {
        self.encode_options = options;
        self
    }

    /// Returns the decode options.
    pub fn decode_options(&self) -> &DecodeOptions {
        &self.decode_options
    }

    /// Returns the encode options.
    pub fn encode_options(&self) -> &EncodeOptions {
        &self.encode_options
    }

    fn file_options(&self) -> SimpleFileOptions {
        let options = SimpleFileOptions::default();
        match self.encode_options.compression {
            Compression::Stored => options.compression_method(CompressionMethod::Stored),
            Compression::Deflated => options
                .compression_method(CompressionMethod::Deflated)
                .compression_level(self.encode_options.level.map(i64::from)),
        }
    }
}

/// Outcome of reading one entry.
enum EntryOutcome {
    Directory,
    File(Vec<u8>),
}

impl ArchiveCodec for ZipCodec {
    fn decode(&self, bytes: &[u8]) -> Result<DecodedArchive> {
        let limits = &self.decode_options.limits;
        let mut archive = ZipArchive::new(Cursor::new(bytes)).map_err(decode_error)?;

        if archive.len() > limits.max_entries {
            return Err(Error::ResourceLimitExceeded(format!(
                "archive has {} entries, limit is {}",
                archive.len(),
                limits.max_entries
            )));
        }

        let mut decoded = DecodedArchive::default();
        let mut total_size: u64 = 0;

        for index in 0..archive.len() {
            let Some(raw_name) = archive.name_for_index(index).map(str::to_string) else {
                log::warn!("Skipping entry {}: no name in central directory", index);
                continue;
            };
            let is_dir_name = raw_name.ends_with('/') || raw_name.ends_with('\\');

            let path = match ArchivePath::from_entry_name(&raw_name) {
                Ok(path) => path,
                Err(e) => {
                    log::warn!("Skipping entry {} ('{}'): {}", index, raw_name, e);
                    continue;
                }
            };

            match read_entry(&mut archive, index, limits.max_entry_size, &mut total_size) {
                Ok(EntryOutcome::Directory) => {
                    if self.decode_options.materialize_directories {
                        decoded.directories.push(path);
                    }
                }
                Ok(EntryOutcome::File(data)) => {
                    if total_size > limits.max_total_size {
                        return Err(Error::ResourceLimitExceeded(format!(
                            "archive expands beyond {} bytes",
                            limits.max_total_size
                        )));
                    }
                    decoded.entries.push(FlatEntry::from_bytes(path, data));
                }
                Err(e @ Error::ResourceLimitExceeded(_)) => return Err(e),
                Err(e) if is_dir_name => {
                    log::debug!("Ignoring unreadable directory entry '{}': {}", raw_name, e);
                }
                Err(e) => {
                    log::warn!("{}", Error::entry_read(path.as_str(), e.to_string()));
                    decoded.entries.push(FlatEntry::unreadable(path));
                }
            }
        }

        log::debug!(
            "Decoded {} file entries ({} bytes, {} directories kept)",
            decoded.entries.len(),
            total_size,
            decoded.directories.len()
        );
        Ok(decoded)
    }

    fn encode(&self, root: &TreeNode) -> Result<Vec<u8>> {
        let options = self.file_options();
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let mut written = 0usize;

        for entry in serialize(root) {
            let data: &[u8] = match entry.data {
                EntryData::Bytes(bytes) => bytes,
                EntryData::Text(text) if !text.is_empty() => text.as_bytes(),
                EntryData::Text(_) | EntryData::Empty => {
                    log::debug!("Omitting '{}': no content", entry.path);
                    continue;
                }
            };

            writer
                .start_file(entry.path.as_str(), options)
                .map_err(encode_error)?;
            writer.write_all(data)?;
            written += 1;
        }

        let cursor = writer.finish().map_err(encode_error)?;
        let bytes = cursor.into_inner();
        log::debug!("Encoded {} entries into {} bytes", written, bytes.len());
        Ok(bytes)
    }
}

fn read_entry<R: Read + std::io::Seek>(
    archive: &mut ZipArchive<R>,
    index: usize,
    max_entry_size: u64,
    total_size: &mut u64,
) -> Result<EntryOutcome> {
    let mut file = archive.by_index(index).map_err(decode_error)?;
    if file.is_dir() {
        return Ok(EntryOutcome::Directory);
    }

    if file.size() > max_entry_size {
        return Err(Error::ResourceLimitExceeded(format!(
            "entry '{}' is {} bytes, limit is {}",
            file.name(),
            file.size(),
            max_entry_size
        )));
    }

    // The declared size can lie; cap the read just past the limit and never
    // preallocate more than PREALLOC_LIMIT from it.
    let mut data = Vec::with_capacity(file.size().min(PREALLOC_LIMIT) as usize);
    (&mut file)
        .take(max_entry_size.saturating_add(1))
        .read_to_end(&mut data)?;
    data.shrink_to_fit();
    if data.len() as u64 > max_entry_size {
        return Err(Error::ResourceLimitExceeded(format!(
            "entry '{}' expands beyond {} bytes",
            file.name(),
            max_entry_size
        )));
    }

    *total_size = total_size.saturating_add(data.len() as u64);
    Ok(EntryOutcome::File(data))
}

fn decode_error(e: ZipError) -> Error {
    Error::decode(e.to_string())
}

fn encode_error(e: ZipError) -> Error {
    Error::encode(e.to_string())
}
