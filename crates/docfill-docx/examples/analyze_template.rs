//! Template placeholder inspection example
//!
//! This example demonstrates the discovery half of the pipeline:
//! open a template and list every highlight-marked placeholder.
//!
//! Usage:
//! ```bash
//! cargo run --example analyze_template -- path/to/template.docx
//! ```

use docfill_core::DocfillError;
use docfill_docx::analyze_template;
use std::env;

fn main() -> Result<(), DocfillError> {
    // Get template path from command line
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <template.docx>", args[0]);
        eprintln!("Example: {} annual_update.docx", args[0]);
        std::process::exit(1);
    }
    let template_path = &args[1];

    println!("Analyzing: {template_path}");

    let template_bytes = std::fs::read(template_path)?;
    let report = analyze_template(&template_bytes)?;

    // List what the author marked
    println!("\n=== Placeholders ===");
    if report.placeholders.is_empty() {
        println!("(none - no runs carry the reserved highlight color)");
    }
    for placeholder in &report.placeholders {
        println!("  {}", placeholder.key);
    }
    println!("\nTotal: {}", report.total_placeholders());

    // Flag phrases the editor split across several runs
    if report.has_adjacent_marked_runs() {
        println!("\n=== Split-Run Groups ===");
        for group_text in &report.adjacent_marked_runs {
            println!("  {group_text}");
        }
        println!("\nThese phrases span multiple runs and will not substitute");
        println!("as a whole; re-type each one in a single stretch.");
    }

    Ok(())
}
