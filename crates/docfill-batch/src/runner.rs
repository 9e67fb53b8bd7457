//! Batch drivers over a [`TemplateStore`].
//!
//! Each job runs resolve → fill → persist against its own template bytes.
//! A failing job is folded into its own [`GenerationResult`]; sibling jobs
//! are unaffected and the batch always returns one result per job, in
//! input order.

use docfill_core::{GenerationJob, GenerationResult, ReplacementMap, Result};
use docfill_docx::generate_document;
use log::{debug, warn};
use rayon::prelude::*;

use crate::store::TemplateStore;

/// Runs one job end to end.
///
/// Persist is the last transition, so a failure anywhere earlier leaves
/// nothing behind in the store.
fn execute_job<S: TemplateStore + ?Sized>(
    store: &S,
    job: &GenerationJob,
) -> Result<(String, usize)> {
    let template_bytes = store.open_template(&job.template_id)?;
    let generated = generate_document(&template_bytes, &job.replacements)?;
    let output_ref = store.persist(&job.template_id, &generated.bytes)?;
    Ok((output_ref, generated.replacement_count))
}

fn job_result<S: TemplateStore + ?Sized>(store: &S, job: &GenerationJob) -> GenerationResult {
    debug!("Running generation job for template '{}'", job.template_id);
    match execute_job(store, job) {
        Ok((output_ref, replacement_count)) => {
            GenerationResult::succeeded(job.template_id.as_str(), output_ref, replacement_count)
        }
        Err(e) => {
            warn!("Generation failed for template '{}': {e}", job.template_id);
            GenerationResult::failed(job.template_id.as_str(), format!("{e}"))
        }
    }
}

/// Runs a batch of generation jobs sequentially.
///
/// Returns one result per job, in input order. A job that fails at any
/// transition (unknown template, corrupt container, malformed body, store
/// fault) yields a failure result; every other job still runs.
///
/// # Example
///
/// ```no_run
/// use docfill_batch::{run_batch, DirTemplateStore};
/// use docfill_core::{GenerationJob, ReplacementMap};
///
/// let store = DirTemplateStore::new("templates", "outputs");
/// let mut replacements = ReplacementMap::new();
/// replacements.insert("[CLIENT NAME]".to_string(), "Acme Ltd".to_string());
///
/// let jobs = vec![GenerationJob::new("offer_letter", replacements)];
/// let results = run_batch(&store, &jobs);
/// assert_eq!(results.len(), jobs.len());
/// ```
pub fn run_batch<S: TemplateStore + ?Sized>(
    store: &S,
    jobs: &[GenerationJob],
) -> Vec<GenerationResult> {
    debug!("Running batch of {} generation jobs", jobs.len());
    jobs.iter().map(|job| job_result(store, job)).collect()
}

/// Runs a batch of generation jobs on the rayon thread pool.
///
/// Jobs share no mutable state, so results are identical to [`run_batch`]
/// up to output reference naming, and they come back in input order.
pub fn run_batch_parallel<S: TemplateStore + ?Sized>(
    store: &S,
    jobs: &[GenerationJob],
) -> Vec<GenerationResult> {
    debug!("Running batch of {} generation jobs in parallel", jobs.len());
    jobs.par_iter().map(|job| job_result(store, job)).collect()
}

/// Fills many templates from one shared replacement map.
///
/// Convenience for the mail-merge-like case where a whole template set is
/// regenerated from a single data snapshot. Jobs run sequentially.
pub fn run_batch_shared<S: TemplateStore + ?Sized>(
    store: &S,
    template_ids: &[String],
    replacements: &ReplacementMap,
) -> Vec<GenerationResult> {
    let jobs: Vec<GenerationJob> = template_ids
        .iter()
        .map(|id| GenerationJob::new(id.clone(), replacements.clone()))
        .collect();
    run_batch(store, &jobs)
}
