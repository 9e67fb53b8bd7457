//! Shared data model for template analysis and generation.
//!
//! These types cross the boundary between the scanning/substitution layers
//! and callers (request handlers, batch drivers), so they all carry serde
//! derives.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Caller-supplied key→value data used to fill placeholders.
///
/// Keys are author-chosen tokens, with or without surrounding brackets;
/// values are scalar strings pre-formatted by the caller (numbers, dates,
/// currency). Entries with empty values are skipped during substitution.
pub type ReplacementMap = HashMap<String, String>;

/// The marking convention that produced a placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaceholderSource {
    /// The run carried the reserved highlight marker color.
    Highlight,
}

/// A single author-marked substitution token found in a template.
///
/// Placeholders are keyed by trimmed run text: one scan over one container
/// yields a set with no duplicates, ordered by first encounter.
///
/// # Examples
///
/// ```rust
/// use docfill_core::{Placeholder, PlaceholderSource};
///
/// let placeholder = Placeholder::highlighted("  [CLIENT NAME]  ");
/// assert_eq!(placeholder.key, "[CLIENT NAME]");
/// assert_eq!(placeholder.original_text, "[CLIENT NAME]");
/// assert_eq!(placeholder.source, PlaceholderSource::Highlight);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placeholder {
    /// Trimmed token text, usable as a replacement-map key.
    pub key: String,

    /// The marked run's text as registered (trimmed).
    pub original_text: String,

    /// How this placeholder was discovered.
    pub source: PlaceholderSource,
}

impl Placeholder {
    /// Creates a placeholder from the text of a highlight-marked run.
    ///
    /// The text is trimmed; callers are expected to skip runs whose text is
    /// empty after trimming.
    #[must_use = "creates a placeholder value"]
    pub fn highlighted(text: &str) -> Self {
        let trimmed = text.trim().to_string();
        Self {
            key: trimmed.clone(),
            original_text: trimmed,
            source: PlaceholderSource::Highlight,
        }
    }
}

/// Result of scanning one body XML part for marked placeholders.
///
/// # Examples
///
/// ```rust
/// use docfill_core::{Placeholder, ScanReport};
///
/// let report = ScanReport {
///     placeholders: vec![Placeholder::highlighted("[NAME]")],
///     adjacent_marked_runs: Vec::new(),
/// };
///
/// assert_eq!(report.total_placeholders(), 1);
/// assert!(!report.has_adjacent_marked_runs());
/// assert_eq!(report.keys().collect::<Vec<_>>(), vec!["[NAME]"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScanReport {
    /// Distinct placeholders, in order of first encounter.
    pub placeholders: Vec<Placeholder>,

    /// Joined text of each group of adjacent marker-highlighted runs.
    ///
    /// A non-empty list means the source editor split a highlighted phrase
    /// into fragments that scanning and substitution treat independently;
    /// callers can surface these for manual consolidation in the template.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub adjacent_marked_runs: Vec<String>,
}

impl ScanReport {
    /// Number of distinct placeholders found.
    #[inline]
    #[must_use = "returns the placeholder count"]
    pub fn total_placeholders(&self) -> usize {
        self.placeholders.len()
    }

    /// Iterates over placeholder keys in scan order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.placeholders.iter().map(|p| p.key.as_str())
    }

    /// Returns `true` if any split-run groups were detected.
    #[inline]
    #[must_use = "returns whether split-run groups were detected"]
    pub fn has_adjacent_marked_runs(&self) -> bool {
        !self.adjacent_marked_runs.is_empty()
    }
}

/// One (template, replacement map) generation request within a batch.
///
/// Jobs are independent units of work: no shared state with sibling jobs,
/// so batches can run sequentially or in parallel with identical results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationJob {
    /// Store identity of the template to fill.
    pub template_id: String,

    /// Values to substitute into the template.
    pub replacements: ReplacementMap,
}

impl GenerationJob {
    /// Creates a job for one template with its replacement values.
    #[must_use = "creates a generation job"]
    pub fn new(template_id: impl Into<String>, replacements: ReplacementMap) -> Self {
        Self {
            template_id: template_id.into(),
            replacements,
        }
    }
}

/// Outcome of one batch job.
///
/// Batch drivers return exactly one result per job, in input order. A failed
/// job never carries an `output_ref`; no partial output is persisted.
///
/// # Examples
///
/// ```rust
/// use docfill_core::GenerationResult;
///
/// let ok = GenerationResult::succeeded("annual_update", "annual_update_17.docx", 4);
/// assert!(ok.success);
/// assert_eq!(ok.replacement_count, 4);
///
/// let failed = GenerationResult::failed("missing", "Template not found: missing");
/// assert!(!failed.success);
/// assert!(failed.output_ref.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationResult {
    /// Identity of the template this result belongs to.
    pub template_id: String,

    /// Whether the job ran to completion and its output was persisted.
    pub success: bool,

    /// Opaque reference to the persisted output (absent on failure).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_ref: Option<String>,

    /// Failure description (absent on success).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Replacements performed; informational, zero is a valid outcome.
    #[serde(default)]
    pub replacement_count: usize,
}

impl GenerationResult {
    /// Builds the result for a job that persisted its output.
    #[must_use = "creates a success result"]
    pub fn succeeded(
        template_id: impl Into<String>,
        output_ref: impl Into<String>,
        replacement_count: usize,
    ) -> Self {
        Self {
            template_id: template_id.into(),
            success: true,
            output_ref: Some(output_ref.into()),
            error: None,
            replacement_count,
        }
    }

    /// Builds the result for a job that failed at any transition.
    #[must_use = "creates a failure result"]
    pub fn failed(template_id: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            template_id: template_id.into(),
            success: false,
            output_ref: None,
            error: Some(error.into()),
            replacement_count: 0,
        }
    }
}
