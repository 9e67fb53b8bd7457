//! High-level template operations: analyze and generate.
//!
//! These compose the container, scanner, and substitution engine into the
//! two operations callers actually invoke: inspect a template's
//! placeholders, and produce a filled document from a replacement map.

use docfill_core::{ReplacementMap, Result, ScanReport};
use log::debug;

use crate::container::DocxContainer;
use crate::scanner::{self, ScanOptions};
use crate::substitute::substitute;
use crate::BODY_PART;

/// A filled document produced by [`generate_document`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedDocument {
    /// Serialized container bytes, ready to persist.
    pub bytes: Vec<u8>,

    /// Number of text leaves replaced.
    pub replacement_count: usize,

    /// Keys that matched at least one leaf, in first-match order.
    pub matched_keys: Vec<String>,
}

/// Scans a template container for placeholders (default marker color).
///
/// # Errors
///
/// Returns [`DocfillError::CorruptArchive`](docfill_core::DocfillError::CorruptArchive),
/// [`DocfillError::PartNotFound`](docfill_core::DocfillError::PartNotFound), or
/// [`DocfillError::MalformedXml`](docfill_core::DocfillError::MalformedXml)
/// when the container or its body cannot be read.
pub fn analyze_template(template_bytes: &[u8]) -> Result<ScanReport> {
    analyze_template_with(template_bytes, &ScanOptions::default())
}

/// Scans a template container for placeholders with explicit options.
///
/// # Errors
///
/// Same conditions as [`analyze_template`].
pub fn analyze_template_with(template_bytes: &[u8], options: &ScanOptions) -> Result<ScanReport> {
    let container = DocxContainer::open(template_bytes)?;
    let body_xml = container.read_part(BODY_PART)?;
    let report = scanner::scan_with(&body_xml, options)?;

    debug!(
        "analyzed template: {} placeholders, {} split-run groups",
        report.total_placeholders(),
        report.adjacent_marked_runs.len()
    );
    Ok(report)
}

/// Fills a template container with the supplied replacement values.
///
/// Opens the container, substitutes into the body part, and re-packs. A map
/// that matches nothing is not an error: the result carries a zero count and
/// a container whose body is unchanged.
///
/// # Errors
///
/// Same conditions as [`analyze_template`]; serialization of a successfully
/// opened container does not fail.
pub fn generate_document(
    template_bytes: &[u8],
    replacements: &ReplacementMap,
) -> Result<GeneratedDocument> {
    let mut container = DocxContainer::open(template_bytes)?;
    let body_xml = container.read_part(BODY_PART)?;

    let outcome = substitute(&body_xml, replacements)?;
    debug!(
        "substitution replaced {} text leaves ({} keys matched)",
        outcome.replacement_count,
        outcome.matched_keys.len()
    );

    container.write_part(BODY_PART, &outcome.body_xml);
    let bytes = container.serialize()?;

    Ok(GeneratedDocument {
        bytes,
        replacement_count: outcome.replacement_count,
        matched_keys: outcome.matched_keys,
    })
}
