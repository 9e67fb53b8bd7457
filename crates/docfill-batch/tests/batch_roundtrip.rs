//! End-to-end batch generation against a directory-backed store.

use std::io::{Cursor, Write};

use docfill_batch::{run_batch, run_batch_parallel, DirTemplateStore, GenerationJob};
use docfill_core::ReplacementMap;
use docfill_docx::{DocxContainer, BODY_PART};
use tempfile::TempDir;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
<Default Extension="xml" ContentType="application/xml"/>
</Types>"#;

fn letter_body() -> String {
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
<w:body>
<w:p><w:r><w:t>Dear </w:t></w:r><w:r><w:rPr><w:highlight w:val="yellow"/></w:rPr><w:t>[CLIENT NAME]</w:t></w:r></w:p>
<w:p><w:r><w:rPr><w:highlight w:val="yellow"/></w:rPr><w:t>MEETING DATE</w:t></w:r></w:p>
</w:body>
</w:document>"#
        .to_string()
}

fn build_docx(body_xml: &str) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();
    writer.start_file("[Content_Types].xml", options).unwrap();
    writer.write_all(CONTENT_TYPES_XML.as_bytes()).unwrap();
    writer.start_file("word/document.xml", options).unwrap();
    writer.write_all(body_xml.as_bytes()).unwrap();
    writer.finish().unwrap().into_inner()
}

/// Writes a template into a fresh store layout and returns the tempdir
/// guard alongside the store.
fn store_with_templates(templates: &[(&str, Vec<u8>)]) -> (TempDir, DirTemplateStore) {
    let dir = TempDir::new().unwrap();
    let store = DirTemplateStore::new(dir.path().join("templates"), dir.path().join("outputs"));
    std::fs::create_dir_all(store.templates_dir()).unwrap();
    for (template_id, bytes) in templates {
        std::fs::write(
            store.templates_dir().join(format!("{template_id}.docx")),
            bytes,
        )
        .unwrap();
    }
    (dir, store)
}

fn letter_replacements() -> ReplacementMap {
    let mut map = ReplacementMap::new();
    map.insert("CLIENT NAME".to_string(), "Acme Ltd".to_string());
    map.insert("MEETING DATE".to_string(), "12 March 2025".to_string());
    map
}

#[test]
fn test_batch_fills_and_persists_documents() {
    let (_dir, store) = store_with_templates(&[("letter", build_docx(&letter_body()))]);

    let jobs = vec![GenerationJob::new("letter", letter_replacements())];
    let results = run_batch(&store, &jobs);

    assert_eq!(results.len(), 1);
    assert!(results[0].success, "error: {:?}", results[0].error);
    assert_eq!(results[0].replacement_count, 2);

    let output_ref = results[0].output_ref.as_deref().unwrap();
    let output_bytes = std::fs::read(store.outputs_dir().join(output_ref)).unwrap();

    let container = DocxContainer::open(&output_bytes).unwrap();
    let body = container.read_part(BODY_PART).unwrap();
    assert!(body.contains("Acme Ltd"));
    assert!(body.contains("12 March 2025"));
    assert!(!body.contains("[CLIENT NAME]"));
    assert!(!body.contains("MEETING DATE"));
}

#[test]
fn test_missing_template_fails_in_place() {
    let (_dir, store) = store_with_templates(&[("letter", build_docx(&letter_body()))]);

    let jobs = vec![
        GenerationJob::new("letter", letter_replacements()),
        GenerationJob::new("retired_template", letter_replacements()),
    ];
    let results = run_batch(&store, &jobs);

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].template_id, "letter");
    assert!(results[0].success);
    assert_eq!(results[1].template_id, "retired_template");
    assert!(!results[1].success);
    assert!(results[1]
        .error
        .as_deref()
        .unwrap()
        .contains("Template not found"));

    // Only the successful job left an artifact behind.
    let outputs: Vec<_> = std::fs::read_dir(store.outputs_dir()).unwrap().collect();
    assert_eq!(outputs.len(), 1);
}

#[test]
fn test_repeated_template_gets_distinct_outputs() {
    let (_dir, store) = store_with_templates(&[("letter", build_docx(&letter_body()))]);

    let mut other = letter_replacements();
    other.insert("CLIENT NAME".to_string(), "Borealis PLC".to_string());

    let jobs = vec![
        GenerationJob::new("letter", letter_replacements()),
        GenerationJob::new("letter", other),
    ];
    let results = run_batch(&store, &jobs);

    assert!(results.iter().all(|r| r.success));
    let first_ref = results[0].output_ref.as_deref().unwrap();
    let second_ref = results[1].output_ref.as_deref().unwrap();
    assert_ne!(first_ref, second_ref);

    let first = std::fs::read(store.outputs_dir().join(first_ref)).unwrap();
    let second = std::fs::read(store.outputs_dir().join(second_ref)).unwrap();

    let first_body = DocxContainer::open(&first)
        .unwrap()
        .read_part(BODY_PART)
        .unwrap();
    let second_body = DocxContainer::open(&second)
        .unwrap()
        .read_part(BODY_PART)
        .unwrap();
    assert!(first_body.contains("Acme Ltd"));
    assert!(second_body.contains("Borealis PLC"));
}

#[test]
fn test_parallel_batch_against_real_store() {
    let (_dir, store) = store_with_templates(&[
        ("letter", build_docx(&letter_body())),
        ("notice", build_docx(&letter_body())),
    ]);

    let jobs = vec![
        GenerationJob::new("letter", letter_replacements()),
        GenerationJob::new("notice", letter_replacements()),
        GenerationJob::new("absent", letter_replacements()),
    ];
    let results = run_batch_parallel(&store, &jobs);

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].template_id, "letter");
    assert_eq!(results[1].template_id, "notice");
    assert_eq!(results[2].template_id, "absent");
    assert!(results[0].success);
    assert!(results[1].success);
    assert!(!results[2].success);
}
