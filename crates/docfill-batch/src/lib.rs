//! # Docfill Batch - Ordered Multi-Template Generation
//!
//! Drives document generation across many templates with per-job failure
//! isolation: every job produces exactly one [`GenerationResult`], in input
//! order, and a job that fails (unknown template, corrupt container, store
//! fault) never takes its siblings down or leaves partial output behind.
//!
//! Templates are reached through the narrow [`TemplateStore`] trait, so the
//! drivers stay independent of where templates live. [`DirTemplateStore`]
//! covers the common directory-on-disk layout.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use docfill_batch::{run_batch, DirTemplateStore};
//! use docfill_core::{GenerationJob, ReplacementMap};
//!
//! let store = DirTemplateStore::new("templates", "outputs");
//!
//! let mut replacements = ReplacementMap::new();
//! replacements.insert("[CLIENT NAME]".to_string(), "Acme Ltd".to_string());
//! replacements.insert("MEETING DATE".to_string(), "12 March 2025".to_string());
//!
//! let jobs = vec![
//!     GenerationJob::new("annual_update", replacements.clone()),
//!     GenerationJob::new("fee_disclosure", replacements),
//! ];
//!
//! for result in run_batch(&store, &jobs) {
//!     match result.output_ref {
//!         Some(output_ref) => println!("{}: {output_ref}", result.template_id),
//!         None => eprintln!("{}: {}", result.template_id, result.error.unwrap_or_default()),
//!     }
//! }
//! ```
//!
//! ## Module Organization
//!
//! - [`store`]: the [`TemplateStore`] trait and its filesystem implementation
//! - [`runner`]: sequential, parallel, and shared-map batch drivers

pub mod runner;
pub mod store;

pub use runner::{run_batch, run_batch_parallel, run_batch_shared};
pub use store::{DirTemplateStore, TemplateStore};

// Batch callers always need the job/result pair; save them the extra import.
pub use docfill_core::{GenerationJob, GenerationResult};
