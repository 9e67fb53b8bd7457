//! Error types for template filling operations.
//!
//! This module defines the error conditions that can occur while opening a
//! document container, scanning it for placeholders, substituting values, or
//! resolving templates through a store.

use thiserror::Error;

/// Error types that can occur during template analysis and generation.
///
/// Every variant is fatal to the job that produced it and to that job only;
/// batch drivers convert these into per-job failure results instead of
/// aborting the batch.
///
/// # Examples
///
/// ```rust
/// use docfill_core::{DocfillError, Result};
///
/// fn require_zip_magic(bytes: &[u8]) -> Result<()> {
///     if !bytes.starts_with(b"PK") {
///         return Err(DocfillError::CorruptArchive(
///             "missing zip signature".to_string(),
///         ));
///     }
///     Ok(())
/// }
///
/// match require_zip_magic(b"not a zip") {
///     Err(DocfillError::CorruptArchive(msg)) => assert!(msg.contains("signature")),
///     _ => panic!("expected CorruptArchive"),
/// }
/// ```
#[derive(Error, Debug)]
pub enum DocfillError {
    /// The supplied bytes are not a readable container.
    ///
    /// Raised when the buffer is not a valid zip archive, when the archive
    /// is encrypted, or when an entry exceeds the extraction size cap.
    #[error("Corrupt archive: {0}")]
    CorruptArchive(String),

    /// The container opened but a required part is absent.
    ///
    /// The message carries the missing part name (for a word-processing
    /// container, typically `word/document.xml`).
    #[error("Part not found: {0}")]
    PartNotFound(String),

    /// A template identity did not resolve through the store.
    ///
    /// Surfaced as a structured per-job error by batch drivers, never as a
    /// batch-level abort.
    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    /// The body XML could not be parsed.
    #[error("Malformed XML: {0}")]
    MalformedXml(String),

    /// File I/O error from a store implementation.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Failure inside an external store collaborator.
    ///
    /// Catch-all for persistence backends that report their own error
    /// types; wrapped via `anyhow` so store implementations stay narrow.
    #[error("Store error: {0}")]
    Store(#[from] anyhow::Error),
}

/// Type alias for [`Result<T, DocfillError>`].
///
/// # Examples
///
/// ```rust
/// use docfill_core::Result;
///
/// fn body_part_name() -> Result<&'static str> {
///     Ok("word/document.xml")
/// }
///
/// assert_eq!(body_part_name().unwrap(), "word/document.xml");
/// ```
pub type Result<T> = std::result::Result<T, DocfillError>;
