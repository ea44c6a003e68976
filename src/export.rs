//! Image export: single PNG downloads and ZIP batches.
//!
//! The archive backend is an injected capability rather than an ambient
//! global, so tests can swap in a fake and the zip dependency stays behind
//! one seam. Batch export skips chunks without a rendered image; an entirely
//! image-less batch is an error, not an empty archive.

use std::io::{Cursor, Write};

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::{Error, Result};
use crate::store::ChunkStore;

/// One named file destined for an archive
#[derive(Debug, Clone)]
pub struct ArchiveEntry {
    pub name: String,
    pub data: Vec<u8>,
}

/// Capability for assembling a downloadable archive from named blobs
pub trait ArchiveWriter {
    fn write(&self, entries: &[ArchiveEntry]) -> Result<Vec<u8>>;
}

/// Production archive backend using the `zip` crate.
///
/// Entries are stored uncompressed: the payload is already-deflated PNG data.
#[derive(Debug, Default, Clone, Copy)]
pub struct ZipArchiveWriter;

impl ArchiveWriter for ZipArchiveWriter {
    fn write(&self, entries: &[ArchiveEntry]) -> Result<Vec<u8>> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);

        for entry in entries {
            writer
                .start_file(entry.name.as_str(), options)
                .map_err(|e| Error::Archive(e.to_string()))?;
            writer
                .write_all(&entry.data)
                .map_err(|e| Error::Archive(e.to_string()))?;
        }

        let cursor = writer.finish().map_err(|e| Error::Archive(e.to_string()))?;
        Ok(cursor.into_inner())
    }
}

/// A single exported image with its download filename
#[derive(Debug, Clone)]
pub struct ExportedImage {
    pub filename: String,
    pub png_data: Vec<u8>,
}

/// Zero-padded entry name, e.g. `slide-03.png`
pub fn entry_name(stem: &str, position: usize) -> String {
    format!("{stem}-{position:02}.png")
}

/// Assemble an archive of every rendered chunk image.
///
/// Chunks with no image (empty content or not yet rendered) are skipped;
/// when nothing remains the export aborts with [`Error::EmptyExport`] and no
/// archive is produced.
pub fn export_all(store: &ChunkStore, writer: &dyn ArchiveWriter, stem: &str) -> Result<Vec<u8>> {
    let entries: Vec<ArchiveEntry> = store
        .chunks()
        .iter()
        .filter_map(|chunk| {
            chunk.image.as_ref().map(|image| ArchiveEntry {
                name: entry_name(stem, chunk.order),
                data: image.png_data.clone(),
            })
        })
        .collect();

    if entries.is_empty() {
        return Err(Error::EmptyExport);
    }

    log::info!("exporting {} images as archive", entries.len());
    writer.write(&entries)
}

/// Export the chunk under the cursor as a single named PNG
pub fn export_current(store: &ChunkStore, stem: &str) -> Result<ExportedImage> {
    let chunk = store.current();
    let image = chunk.image.as_ref().ok_or(Error::EmptyExport)?;
    Ok(ExportedImage {
        filename: entry_name(stem, chunk.order),
        png_data: image.png_data.clone(),
    })
}

/// Encode PNG bytes as a `data:` URL for embed-style consumers
pub fn data_url(png_data: &[u8]) -> String {
    format!("data:image/png;base64,{}", BASE64.encode(png_data))
}
