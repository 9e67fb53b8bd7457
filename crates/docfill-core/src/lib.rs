//! # Docfill Core - Shared Types for DOCX Template Filling
//!
//! Error and data types shared across the docfill workspace: the structured
//! error enum, placeholder/scan types produced by template analysis, and the
//! job/result types consumed by batch drivers.
//!
//! ## Quick Start
//!
//! ```rust
//! use docfill_core::{GenerationJob, GenerationResult, ReplacementMap};
//!
//! let mut replacements = ReplacementMap::new();
//! replacements.insert("NAME".to_string(), "Acme Ltd".to_string());
//!
//! let job = GenerationJob::new("annual_update", replacements);
//! let result = GenerationResult::succeeded(&job.template_id, "annual_update_1.docx", 1);
//! assert!(result.success);
//! ```
//!
//! ## Module Organization
//!
//! - [`error`]: [`DocfillError`] and the crate-wide [`Result`] alias
//! - [`types`]: placeholder, scan report, and batch job/result types

pub mod error;
pub mod types;

pub use error::*;
pub use types::*;
