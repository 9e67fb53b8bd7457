//! In-memory access to the zip container of a word-processing document.
//!
//! A DOCX file is a zip archive of named XML parts plus media. The container
//! decodes every part eagerly at open time, so reads and writes are pure
//! in-memory operations and serialization is a plain re-packing of current
//! state. Byte buffers in, byte buffers out: this layer never touches the
//! filesystem or network.

use docfill_core::{DocfillError, Result};
use log::warn;
use std::io::{Cursor, Read, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::{BODY_PART, MAX_PART_SIZE, MEDIA_PREFIX};

/// One named part of an opened container.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ArchivePart {
    name: String,
    contents: Vec<u8>,
}

/// An opened word-processing container.
///
/// Parts keep their archive order, so a container that is opened and
/// serialized without modification re-packs the same entries in the same
/// sequence. Mutation through [`write_part`](Self::write_part) is local to
/// the instance until [`serialize`](Self::serialize) is called.
#[derive(Debug, Clone)]
pub struct DocxContainer {
    parts: Vec<ArchivePart>,
}

impl DocxContainer {
    /// Opens a container from raw bytes, decoding every part.
    ///
    /// # Errors
    ///
    /// Returns [`DocfillError::CorruptArchive`] if the buffer is not a valid
    /// zip archive, is password-protected, or holds an entry larger than
    /// [`MAX_PART_SIZE`]; returns [`DocfillError::PartNotFound`] if the
    /// archive lacks the body part (`word/document.xml`).
    ///
    /// # Panics
    ///
    /// Should not panic in practice. Uses `.expect()` for part size
    /// conversion but sizes are pre-checked against `MAX_PART_SIZE`
    /// (100MB < `usize::MAX`).
    pub fn open(bytes: &[u8]) -> Result<Self> {
        let mut archive = ZipArchive::new(Cursor::new(bytes))
            .map_err(|e| DocfillError::CorruptArchive(format!("not a valid zip archive: {e}")))?;

        let mut parts = Vec::with_capacity(archive.len());
        for i in 0..archive.len() {
            let mut entry = archive
                .by_index(i)
                .map_err(|e| DocfillError::CorruptArchive(format!("unreadable entry {i}: {e}")))?;

            if entry.is_dir() {
                warn!("Skipping directory entry: {}", entry.name());
                continue;
            }
            if entry.encrypted() {
                return Err(DocfillError::CorruptArchive(
                    "archive is password-protected".to_string(),
                ));
            }

            let name = entry.name().to_string();
            let size = entry.size();
            if size > MAX_PART_SIZE {
                return Err(DocfillError::CorruptArchive(format!(
                    "part {name} is {size} bytes, exceeds {MAX_PART_SIZE} byte limit"
                )));
            }

            // Safe: size already checked against MAX_PART_SIZE (100MB < usize::MAX)
            let mut contents = Vec::with_capacity(
                size.try_into()
                    .expect("size within bounds after MAX_PART_SIZE check"),
            );
            entry.read_to_end(&mut contents).map_err(|e| {
                DocfillError::CorruptArchive(format!("failed to decode part {name}: {e}"))
            })?;

            parts.push(ArchivePart { name, contents });
        }

        let container = Self { parts };
        if !container.has_part(BODY_PART) {
            return Err(DocfillError::PartNotFound(BODY_PART.to_string()));
        }
        Ok(container)
    }

    /// Returns `true` if the container holds a part with this exact name.
    #[must_use = "returns whether the part exists"]
    pub fn has_part(&self, name: &str) -> bool {
        self.parts.iter().any(|p| p.name == name)
    }

    /// Iterates over part names in archive order.
    pub fn part_names(&self) -> impl Iterator<Item = &str> {
        self.parts.iter().map(|p| p.name.as_str())
    }

    /// Reads a part as text.
    ///
    /// # Errors
    ///
    /// Returns [`DocfillError::PartNotFound`] if no part has this name, or
    /// [`DocfillError::MalformedXml`] if the part is not valid UTF-8.
    pub fn read_part(&self, name: &str) -> Result<String> {
        let part = self
            .parts
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| DocfillError::PartNotFound(name.to_string()))?;

        String::from_utf8(part.contents.clone())
            .map_err(|e| DocfillError::MalformedXml(format!("part {name} is not valid UTF-8: {e}")))
    }

    /// Replaces a part's content, or appends a new part if the name is new.
    ///
    /// Mutation stays inside this instance until [`serialize`](Self::serialize).
    pub fn write_part(&mut self, name: &str, text: &str) {
        match self.parts.iter_mut().find(|p| p.name == name) {
            Some(part) => part.contents = text.as_bytes().to_vec(),
            None => self.parts.push(ArchivePart {
                name: name.to_string(),
                contents: text.as_bytes().to_vec(),
            }),
        }
    }

    /// Re-packs the container into zip bytes.
    ///
    /// Media parts (`word/media/…`) are stored uncompressed, everything else
    /// deflated, matching the layout word processors expect. Entry order is
    /// the order parts were opened (plus any appended parts at the end).
    ///
    /// # Errors
    ///
    /// Returns [`DocfillError::Io`] if re-packing fails; with an in-memory
    /// sink this does not happen for containers that opened successfully.
    pub fn serialize(&self) -> Result<Vec<u8>> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let deflated = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        let stored = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);

        for part in &self.parts {
            let options = if part.name.starts_with(MEDIA_PREFIX) {
                stored
            } else {
                deflated
            };
            zip.start_file(part.name.as_str(), options)
                .map_err(|e| std::io::Error::other(e.to_string()))?;
            zip.write_all(&part.contents)?;
        }

        let cursor = zip
            .finish()
            .map_err(|e| std::io::Error::other(e.to_string()))?;
        Ok(cursor.into_inner())
    }
}
