//! Batch generation example
//!
//! This example demonstrates filling a whole template set from one shared
//! replacement map, with per-job success/failure reporting.
//!
//! Arguments containing `=` become replacement pairs; everything else is
//! taken as a template id (a `.docx` file under the templates directory).
//!
//! Usage:
//! ```bash
//! cargo run --example batch_generate -- templates/ outputs/ \
//!     annual_update fee_disclosure "CLIENT NAME=Acme Ltd" "YEAR=2026"
//! ```

use docfill_batch::{run_batch_shared, DirTemplateStore};
use docfill_core::{DocfillError, ReplacementMap};
use std::env;

fn main() -> Result<(), DocfillError> {
    // Get directories, template ids, and replacement pairs from command line
    let args: Vec<String> = env::args().collect();
    if args.len() < 4 {
        eprintln!(
            "Usage: {} <templates_dir> <outputs_dir> <template_id|KEY=VALUE> ...",
            args[0]
        );
        eprintln!(
            "Example: {} templates/ outputs/ annual_update \"CLIENT NAME=Acme Ltd\"",
            args[0]
        );
        std::process::exit(1);
    }
    let templates_dir = &args[1];
    let outputs_dir = &args[2];

    let mut template_ids: Vec<String> = Vec::new();
    let mut replacements = ReplacementMap::new();
    for arg in &args[3..] {
        match arg.split_once('=') {
            Some((key, value)) => {
                replacements.insert(key.to_string(), value.to_string());
            }
            None => template_ids.push(arg.clone()),
        }
    }
    if template_ids.is_empty() {
        eprintln!("No template ids given");
        std::process::exit(1);
    }

    let store = DirTemplateStore::new(templates_dir, outputs_dir);
    println!(
        "Generating {} documents from {} into {}...\n",
        template_ids.len(),
        store.templates_dir().display(),
        store.outputs_dir().display()
    );

    let results = run_batch_shared(&store, &template_ids, &replacements);

    let mut successful = 0;
    for (i, result) in results.iter().enumerate() {
        if result.success {
            successful += 1;
            println!(
                "[{}/{}] ✓ {}: {} ({} replacements)",
                i + 1,
                results.len(),
                result.template_id,
                result.output_ref.as_deref().unwrap_or("-"),
                result.replacement_count
            );
        } else {
            eprintln!(
                "[{}/{}] ✗ {}: {}",
                i + 1,
                results.len(),
                result.template_id,
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    println!("\n=== Batch Summary ===");
    println!("Total jobs: {}", results.len());
    println!("Successful: {successful}");
    println!("Failed: {}", results.len() - successful);

    Ok(())
}
