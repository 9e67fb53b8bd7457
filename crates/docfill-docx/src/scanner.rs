//! Typed-tree discovery of highlight-marked placeholder runs.
//!
//! The body XML is parsed into a namespace-aware tree and every run element
//! is visited depth-first. A run whose properties carry a highlight in the
//! marker color contributes its trimmed text as a placeholder key. Unmarked
//! runs are ignored even when their text looks like a token.

use docfill_core::{DocfillError, Placeholder, Result, ScanReport};
use roxmltree::{Document, Node};
use std::collections::HashSet;

use crate::{DEFAULT_MARKER_COLOR, WORDPROCESSINGML_NS};

/// Options controlling placeholder discovery.
///
/// # Examples
///
/// ```rust
/// use docfill_docx::ScanOptions;
///
/// let options = ScanOptions::new().with_marker_color("cyan");
/// assert_eq!(options.marker_color(), "cyan");
/// assert_eq!(ScanOptions::default().marker_color(), "yellow");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOptions {
    marker_color: String,
}

impl ScanOptions {
    /// Options with the reserved marker color.
    #[must_use = "returns the default scan options"]
    pub fn new() -> Self {
        Self {
            marker_color: DEFAULT_MARKER_COLOR.to_string(),
        }
    }

    /// Overrides the highlight color treated as the placeholder marker.
    #[must_use = "returns options with the marker color applied"]
    pub fn with_marker_color(mut self, color: impl Into<String>) -> Self {
        self.marker_color = color.into();
        self
    }

    /// The highlight color treated as the placeholder marker.
    #[inline]
    #[must_use = "returns the configured marker color"]
    pub fn marker_color(&self) -> &str {
        &self.marker_color
    }
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Scans body XML for placeholder runs using the default marker color.
///
/// # Errors
///
/// Returns [`DocfillError::MalformedXml`] if the body cannot be parsed.
pub fn scan(body_xml: &str) -> Result<ScanReport> {
    scan_with(body_xml, &ScanOptions::default())
}

/// Scans body XML for placeholder runs.
///
/// Registration is keyed by trimmed run text, so repeated tokens collapse to
/// one [`Placeholder`], ordered by first encounter. Marked runs whose text
/// is empty after trimming contribute nothing.
///
/// Groups of adjacent marked runs under one parent are reported joined in
/// [`ScanReport::adjacent_marked_runs`]: they usually mean the editor split
/// one highlighted token into fragments that neither scanning nor
/// substitution will see whole.
///
/// # Errors
///
/// Returns [`DocfillError::MalformedXml`] if the body cannot be parsed.
pub fn scan_with(body_xml: &str, options: &ScanOptions) -> Result<ScanReport> {
    let doc = Document::parse(body_xml)
        .map_err(|e| DocfillError::MalformedXml(format!("cannot parse body XML: {e}")))?;

    let mut placeholders: Vec<Placeholder> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    for run in doc.descendants().filter(|n| is_wp_element(*n, "r")) {
        if !run_has_marker(run, options.marker_color()) {
            continue;
        }
        let Some(text) = run_text(run) else {
            continue;
        };
        let trimmed = text.trim();
        if trimmed.is_empty() {
            continue;
        }
        if seen.insert(trimmed.to_string()) {
            placeholders.push(Placeholder::highlighted(trimmed));
        }
    }

    let adjacent_marked_runs = find_adjacent_marked_runs(&doc, options.marker_color());

    Ok(ScanReport {
        placeholders,
        adjacent_marked_runs,
    })
}

/// Element test against the wordprocessingml namespace, prefix-independent.
fn is_wp_element(node: Node, local_name: &str) -> bool {
    node.is_element() && node.has_tag_name((WORDPROCESSINGML_NS, local_name))
}

/// Whether a run's properties carry a highlight in the marker color.
fn run_has_marker(run: Node, marker_color: &str) -> bool {
    run.children()
        .find(|n| is_wp_element(*n, "rPr"))
        .and_then(|run_props| run_props.children().find(|n| is_wp_element(*n, "highlight")))
        .and_then(|highlight| highlight.attribute((WORDPROCESSINGML_NS, "val")))
        .is_some_and(|val| val == marker_color)
}

/// Text of a run's first text leaf, if any.
fn run_text<'a>(run: Node<'a, '_>) -> Option<&'a str> {
    run.children()
        .find(|n| is_wp_element(*n, "t"))
        .and_then(|t| t.text())
}

/// Collects the joined text of each group of two or more adjacent marked
/// runs under one parent.
///
/// Only sibling runs are considered; non-run siblings (proofing marks,
/// bookmarks) neither extend nor break a group, and neither do runs without
/// text. An unmarked run with non-empty text ends the current group.
fn find_adjacent_marked_runs(doc: &Document, marker_color: &str) -> Vec<String> {
    let mut groups: Vec<String> = Vec::new();

    for parent in doc.descendants().filter(Node::is_element) {
        let mut fragments: Vec<&str> = Vec::new();

        for child in parent.children().filter(|n| n.is_element()) {
            if !is_wp_element(child, "r") {
                continue;
            }

            let text = run_text(child).filter(|t| !t.trim().is_empty());
            if run_has_marker(child, marker_color) {
                if let Some(text) = text {
                    fragments.push(text);
                }
            } else if text.is_some() {
                flush_group(&mut groups, &mut fragments);
            }
        }

        flush_group(&mut groups, &mut fragments);
    }

    groups
}

fn flush_group(groups: &mut Vec<String>, fragments: &mut Vec<&str>) {
    if fragments.len() >= 2 {
        groups.push(fragments.concat().trim().to_string());
    }
    fragments.clear();
}

#[cfg(test)]
mod tests {
    use super::*;

    const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

    fn body(paragraphs: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="{W_NS}"><w:body>{paragraphs}</w:body></w:document>"#
        )
    }

    fn marked_run(text: &str) -> String {
        format!(r#"<w:r><w:rPr><w:highlight w:val="yellow"/></w:rPr><w:t>{text}</w:t></w:r>"#)
    }

    fn plain_run(text: &str) -> String {
        format!("<w:r><w:t>{text}</w:t></w:r>")
    }

    #[test]
    fn test_scan_finds_highlighted_run() {
        let xml = body(&format!("<w:p>{}</w:p>", marked_run("[CLIENT NAME]")));
        let report = scan(&xml).unwrap();

        assert_eq!(report.total_placeholders(), 1);
        assert_eq!(report.placeholders[0].key, "[CLIENT NAME]");
        assert_eq!(report.placeholders[0].original_text, "[CLIENT NAME]");
    }

    #[test]
    fn test_scan_ignores_unmarked_runs() {
        let xml = body(&format!("<w:p>{}</w:p>", plain_run("[CLIENT NAME]")));
        let report = scan(&xml).unwrap();
        assert_eq!(report.total_placeholders(), 0);
    }

    #[test]
    fn test_scan_ignores_other_highlight_colors() {
        let xml = body(
            r#"<w:p><w:r><w:rPr><w:highlight w:val="green"/></w:rPr><w:t>[NAME]</w:t></w:r></w:p>"#,
        );
        let report = scan(&xml).unwrap();
        assert_eq!(report.total_placeholders(), 0);
    }

    #[test]
    fn test_scan_deduplicates_and_orders_by_first_encounter() {
        let xml = body(&format!(
            "<w:p>{}{}{}</w:p>",
            marked_run("[NAME]"),
            marked_run("[DATE]"),
            marked_run("[NAME]")
        ));
        let report = scan(&xml).unwrap();

        let keys: Vec<&str> = report.keys().collect();
        assert_eq!(keys, vec!["[NAME]", "[DATE]"]);
    }

    #[test]
    fn test_scan_trims_run_text() {
        let xml = body(&format!("<w:p>{}</w:p>", marked_run("  [NAME]  ")));
        let report = scan(&xml).unwrap();
        assert_eq!(report.placeholders[0].key, "[NAME]");
    }

    #[test]
    fn test_scan_skips_empty_marked_runs() {
        let xml = body(&format!("<w:p>{}</w:p>", marked_run("   ")));
        let report = scan(&xml).unwrap();
        assert_eq!(report.total_placeholders(), 0);
    }

    #[test]
    fn test_scan_finds_runs_inside_tables() {
        let xml = body(&format!(
            "<w:tbl><w:tr><w:tc><w:p>{}</w:p></w:tc></w:tr></w:tbl>",
            marked_run("[PORTFOLIO VALUE]")
        ));
        let report = scan(&xml).unwrap();
        assert_eq!(report.placeholders[0].key, "[PORTFOLIO VALUE]");
    }

    #[test]
    fn test_scan_with_custom_marker_color() {
        let xml = body(
            r#"<w:p><w:r><w:rPr><w:highlight w:val="cyan"/></w:rPr><w:t>[NAME]</w:t></w:r></w:p>"#,
        );

        let default_report = scan(&xml).unwrap();
        assert_eq!(default_report.total_placeholders(), 0);

        let options = ScanOptions::new().with_marker_color("cyan");
        let report = scan_with(&xml, &options).unwrap();
        assert_eq!(report.placeholders[0].key, "[NAME]");
    }

    #[test]
    fn test_scan_matches_namespace_not_prefix() {
        // Same namespace bound to a different prefix still scans.
        let xml = format!(
            r#"<x:document xmlns:x="{W_NS}"><x:body><x:p><x:r><x:rPr><x:highlight x:val="yellow"/></x:rPr><x:t>[NAME]</x:t></x:r></x:p></x:body></x:document>"#
        );
        let report = scan(&xml).unwrap();
        assert_eq!(report.placeholders[0].key, "[NAME]");
    }

    #[test]
    fn test_scan_reports_adjacent_marked_runs() {
        // Spell-check styling split "[CLIENT NAME]" into two marked runs
        // with a proofing mark between them.
        let xml = body(&format!(
            r#"<w:p>{}<w:proofErr w:type="spellStart"/>{}</w:p>"#,
            marked_run("[CLIENT "),
            marked_run("NAME]")
        ));
        let report = scan(&xml).unwrap();

        // Each fragment still scans independently.
        let keys: Vec<&str> = report.keys().collect();
        assert_eq!(keys, vec!["[CLIENT", "NAME]"]);

        assert!(report.has_adjacent_marked_runs());
        assert_eq!(report.adjacent_marked_runs, vec!["[CLIENT NAME]"]);
    }

    #[test]
    fn test_scan_no_adjacency_across_unmarked_text() {
        let xml = body(&format!(
            "<w:p>{}{}{}</w:p>",
            marked_run("[NAME]"),
            plain_run(" and "),
            marked_run("[DATE]")
        ));
        let report = scan(&xml).unwrap();

        assert_eq!(report.total_placeholders(), 2);
        assert!(!report.has_adjacent_marked_runs());
    }

    #[test]
    fn test_scan_rejects_malformed_xml() {
        let err = scan("<w:document><w:body>").unwrap_err();
        match err {
            DocfillError::MalformedXml(msg) => assert!(!msg.is_empty()),
            other => panic!("expected MalformedXml, got {other:?}"),
        }
    }
}
