//! # Docfill DOCX - Placeholder Scanning and Substitution
//!
//! Opens DOCX containers (zip archives of XML parts), scans the body XML for
//! runs marked with the reserved highlight color, and substitutes
//! caller-supplied values into matching text leaves without disturbing any
//! surrounding markup.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use docfill_core::ReplacementMap;
//! use docfill_docx::{analyze_template, generate_document};
//!
//! let template = std::fs::read("annual_update.docx")?;
//!
//! // Discovery: which placeholders does this template carry?
//! let report = analyze_template(&template)?;
//! for key in report.keys() {
//!     println!("placeholder: {key}");
//! }
//!
//! // Generation: fill them in.
//! let mut replacements = ReplacementMap::new();
//! replacements.insert("CLIENT NAME".to_string(), "O'Brien & Co".to_string());
//! let generated = generate_document(&template, &replacements)?;
//! std::fs::write("filled.docx", &generated.bytes)?;
//! println!("{} replacements", generated.replacement_count);
//! # Ok::<(), docfill_core::DocfillError>(())
//! ```
//!
//! ## Module Organization
//!
//! - [`container`]: in-memory zip part access ([`DocxContainer`])
//! - [`scanner`]: typed-tree discovery of highlight-marked runs
//! - [`patterns`]: literal pattern forms derived from replacement keys
//! - [`substitute`]: single-pass replacement over the raw body XML
//! - [`template`]: high-level analyze/generate operations

pub mod container;
pub mod patterns;
pub mod scanner;
pub mod substitute;
pub mod template;

/// Archive part holding the main document body XML.
pub const BODY_PART: &str = "word/document.xml";

/// Parts under this prefix are re-packed without compression.
pub const MEDIA_PREFIX: &str = "word/media/";

/// Highlight color reserved as the placeholder marker.
pub const DEFAULT_MARKER_COLOR: &str = "yellow";

/// WordprocessingML main namespace URI.
pub const WORDPROCESSINGML_NS: &str =
    "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

/// Largest part the container will extract (100MB zip-bomb guard).
pub const MAX_PART_SIZE: u64 = 100 * 1024 * 1024;

pub use container::DocxContainer;
pub use patterns::{CompiledPattern, PatternSet};
pub use scanner::{scan, scan_with, ScanOptions};
pub use substitute::{substitute, SubstitutionOutcome};
pub use template::{
    analyze_template, analyze_template_with, generate_document, GeneratedDocument,
};
