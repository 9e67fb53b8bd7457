//! Template resolution and output persistence.
//!
//! Batch drivers never touch paths or URLs directly. They go through the
//! [`TemplateStore`] trait, which maps opaque template identities to
//! container bytes and persists generated documents under opaque output
//! references. [`DirTemplateStore`] is the filesystem implementation.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use docfill_core::{DocfillError, Result};
use log::debug;

/// Resolves template identities and persists generated documents.
///
/// Implementations must be safe to share across threads so a single store
/// instance can serve a parallel batch.
pub trait TemplateStore: Send + Sync {
    /// Resolve a template identity to container bytes.
    ///
    /// # Errors
    ///
    /// Returns [`DocfillError::TemplateNotFound`] if the identity does not
    /// resolve to a stored template, or an I/O error from the backing
    /// storage.
    fn open_template(&self, template_id: &str) -> Result<Vec<u8>>;

    /// Persist a generated document and return an opaque output reference.
    ///
    /// The template identity is passed so implementations can derive a
    /// meaningful name for the artifact. Callers treat the returned
    /// reference as opaque.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be written.
    fn persist(&self, template_id: &str, bytes: &[u8]) -> Result<String>;
}

/// Filesystem-backed template store.
///
/// Templates are resolved as `{templates_dir}/{id}.docx`. Generated
/// documents land in `outputs_dir` under a name built from the template
/// identity, a millisecond timestamp, and a process-wide sequence number,
/// so concurrent jobs against the same template never collide.
///
/// # Example
///
/// ```no_run
/// use docfill_batch::{DirTemplateStore, TemplateStore};
///
/// let store = DirTemplateStore::new("templates", "outputs");
/// let bytes = store.open_template("offer_letter")?;
/// # Ok::<(), docfill_core::DocfillError>(())
/// ```
#[derive(Debug)]
pub struct DirTemplateStore {
    templates_dir: PathBuf,
    outputs_dir: PathBuf,
    sequence: AtomicU64,
}

impl DirTemplateStore {
    /// Creates a store reading templates from `templates_dir` and writing
    /// generated documents to `outputs_dir`.
    ///
    /// Neither directory is required to exist yet; the output directory is
    /// created on first persist.
    #[must_use = "the store must be used to resolve templates"]
    pub fn new(templates_dir: impl Into<PathBuf>, outputs_dir: impl Into<PathBuf>) -> Self {
        Self {
            templates_dir: templates_dir.into(),
            outputs_dir: outputs_dir.into(),
            sequence: AtomicU64::new(0),
        }
    }

    /// Directory templates are resolved in.
    pub fn templates_dir(&self) -> &Path {
        &self.templates_dir
    }

    /// Directory generated documents are written to.
    pub fn outputs_dir(&self) -> &Path {
        &self.outputs_dir
    }
}

/// Identities map straight onto file names, so reject anything that could
/// escape the template directory.
fn validate_id(template_id: &str) -> Result<()> {
    let well_formed = !template_id.is_empty()
        && template_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if well_formed {
        Ok(())
    } else {
        Err(DocfillError::TemplateNotFound(template_id.to_string()))
    }
}

impl TemplateStore for DirTemplateStore {
    fn open_template(&self, template_id: &str) -> Result<Vec<u8>> {
        validate_id(template_id)?;

        let path = self.templates_dir.join(format!("{template_id}.docx"));
        if !path.is_file() {
            return Err(DocfillError::TemplateNotFound(template_id.to_string()));
        }

        debug!("Opening template '{template_id}' from {}", path.display());
        Ok(std::fs::read(path)?)
    }

    fn persist(&self, template_id: &str, bytes: &[u8]) -> Result<String> {
        std::fs::create_dir_all(&self.outputs_dir)?;

        let timestamp = chrono::Utc::now().timestamp_millis();
        let sequence = self.sequence.fetch_add(1, Ordering::SeqCst);
        let output_name = format!("{template_id}_{timestamp}_{sequence}.docx");

        std::fs::write(self.outputs_dir.join(&output_name), bytes)?;
        debug!("Persisted {} bytes as '{output_name}'", bytes.len());
        Ok(output_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_with_template(template_id: &str, bytes: &[u8]) -> (TempDir, DirTemplateStore) {
        let dir = TempDir::new().unwrap();
        let templates_dir = dir.path().join("templates");
        std::fs::create_dir_all(&templates_dir).unwrap();
        std::fs::write(templates_dir.join(format!("{template_id}.docx")), bytes).unwrap();
        let store = DirTemplateStore::new(templates_dir, dir.path().join("outputs"));
        (dir, store)
    }

    #[test]
    fn test_open_template_reads_bytes() {
        let (_dir, store) = store_with_template("offer", b"template bytes");
        let bytes = store.open_template("offer").unwrap();
        assert_eq!(bytes, b"template bytes");
    }

    #[test]
    fn test_open_template_unknown_id() {
        let (_dir, store) = store_with_template("offer", b"template bytes");
        let error = store.open_template("missing").unwrap_err();
        assert!(matches!(error, DocfillError::TemplateNotFound(_)));
        assert!(format!("{error}").contains("missing"));
    }

    #[test]
    fn test_open_template_rejects_path_like_ids() {
        let (_dir, store) = store_with_template("offer", b"template bytes");
        for bad in ["../offer", "a/b", "offer.docx", ""] {
            let error = store.open_template(bad).unwrap_err();
            assert!(
                matches!(error, DocfillError::TemplateNotFound(_)),
                "id {bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_persist_writes_file() {
        let (dir, store) = store_with_template("offer", b"template bytes");
        let output_ref = store.persist("offer", b"generated").unwrap();

        assert!(output_ref.starts_with("offer_"));
        assert!(output_ref.ends_with(".docx"));
        let written = std::fs::read(dir.path().join("outputs").join(&output_ref)).unwrap();
        assert_eq!(written, b"generated");
    }

    #[test]
    fn test_persist_refs_are_unique() {
        let (_dir, store) = store_with_template("offer", b"template bytes");
        let first = store.persist("offer", b"one").unwrap();
        let second = store.persist("offer", b"two").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_persist_creates_output_dir() {
        let (dir, store) = store_with_template("offer", b"template bytes");
        assert!(!dir.path().join("outputs").exists());
        store.persist("offer", b"generated").unwrap();
        assert!(dir.path().join("outputs").is_dir());
    }
}
