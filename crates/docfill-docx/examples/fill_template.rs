//! Single-document generation example
//!
//! This example demonstrates filling one template: supply key=value
//! pairs on the command line and write the generated document.
//!
//! Usage:
//! ```bash
//! cargo run --example fill_template -- template.docx filled.docx \
//!     "CLIENT NAME=O'Brien & Co" "MEETING DATE=12 March 2026"
//! ```

use docfill_core::{DocfillError, ReplacementMap};
use docfill_docx::generate_document;
use std::env;

fn main() -> Result<(), DocfillError> {
    // Get paths and replacement pairs from command line
    let args: Vec<String> = env::args().collect();
    if args.len() < 4 {
        eprintln!("Usage: {} <template.docx> <output.docx> <KEY=VALUE> ...", args[0]);
        eprintln!(
            "Example: {} annual_update.docx filled.docx \"CLIENT NAME=Acme Ltd\"",
            args[0]
        );
        std::process::exit(1);
    }
    let template_path = &args[1];
    let output_path = &args[2];

    let mut replacements = ReplacementMap::new();
    for pair in &args[3..] {
        match pair.split_once('=') {
            Some((key, value)) => {
                replacements.insert(key.to_string(), value.to_string());
            }
            None => {
                eprintln!("Skipping malformed pair (expected KEY=VALUE): {pair}");
            }
        }
    }

    println!("Filling: {template_path}");
    println!("Values: {}", replacements.len());

    let template_bytes = std::fs::read(template_path)?;
    let generated = generate_document(&template_bytes, &replacements)?;
    std::fs::write(output_path, &generated.bytes)?;

    println!("\n=== Result ===");
    println!("Output: {output_path}");
    println!("Replacements made: {}", generated.replacement_count);
    if generated.matched_keys.is_empty() {
        println!("No keys matched; the output body is unchanged.");
    } else {
        println!("Matched keys:");
        for key in &generated.matched_keys {
            println!("  {key}");
        }
    }

    Ok(())
}
