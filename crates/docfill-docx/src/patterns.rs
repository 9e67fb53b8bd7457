//! Literal pattern forms derived from replacement-map keys.
//!
//! Template authors write the same token several ways: `[CLIENT NAME]`,
//! `CLIENT NAME`, or `client name`. Each replacement key therefore compiles
//! to three literal forms, every one anchored to the entire content of a
//! single text leaf (no partial-leaf matching, no matching across leaves).
//! Leaf content is compared after trimming, mirroring the trimmed keys the
//! scanner reports.

use docfill_core::ReplacementMap;

/// The literal textual forms one replacement key may take inside a leaf.
///
/// Given a raw key, all bracket characters are stripped to obtain the bare
/// token `K`; the forms are then `[K]` (bracketed-exact), `K`
/// (unbracketed-exact), and `K` compared case-insensitively.
///
/// # Examples
///
/// ```rust
/// use docfill_docx::CompiledPattern;
///
/// let pattern = CompiledPattern::compile("[CLIENT NAME]").unwrap();
/// assert_eq!(pattern.bracketed(), "[CLIENT NAME]");
/// assert_eq!(pattern.exact(), "CLIENT NAME");
///
/// // Keys that are empty once brackets are stripped cannot match anything.
/// assert!(CompiledPattern::compile("[]").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledPattern {
    key: String,
    bracketed: String,
    exact: String,
    folded: String,
}

impl CompiledPattern {
    /// Derives the three literal forms for one key.
    ///
    /// Returns `None` when the key is empty (or whitespace) once bracket
    /// characters are stripped; such a key can never match a leaf.
    #[must_use = "returns the compiled forms for the key"]
    pub fn compile(key: &str) -> Option<Self> {
        let bare: String = key.chars().filter(|&c| c != '[' && c != ']').collect();
        if bare.trim().is_empty() {
            return None;
        }

        Some(Self {
            key: key.to_string(),
            bracketed: format!("[{bare}]"),
            folded: bare.to_lowercase(),
            exact: bare,
        })
    }

    /// The original replacement-map key this pattern was derived from.
    #[inline]
    #[must_use = "returns the source key"]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The bracketed-exact form, `[K]`.
    #[inline]
    #[must_use = "returns the bracketed form"]
    pub fn bracketed(&self) -> &str {
        &self.bracketed
    }

    /// The unbracketed-exact form, `K`.
    #[inline]
    #[must_use = "returns the unbracketed form"]
    pub fn exact(&self) -> &str {
        &self.exact
    }

    fn matches_bracketed(&self, content: &str) -> bool {
        content == self.bracketed
    }

    fn matches_exact(&self, content: &str) -> bool {
        content == self.exact
    }

    /// `folded_content` must already be lowercased by the caller.
    fn matches_folded(&self, folded_content: &str) -> bool {
        folded_content == self.folded
    }
}

#[derive(Debug, Clone)]
struct PatternEntry {
    pattern: CompiledPattern,
    value: String,
}

/// Every usable pattern for one replacement map, in deterministic order.
///
/// Entries with empty values are skipped entirely (no substitution is
/// attempted for them, no error), as are keys that compile to nothing.
/// Remaining entries are sorted by key so classification does not depend on
/// map iteration order.
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
    entries: Vec<PatternEntry>,
}

impl PatternSet {
    /// Compiles the usable entries of a replacement map.
    #[must_use = "returns the compiled pattern set"]
    pub fn compile(map: &ReplacementMap) -> Self {
        let mut keys: Vec<&String> = map.keys().collect();
        keys.sort();

        let mut entries = Vec::with_capacity(keys.len());
        for key in keys {
            let value = &map[key];
            if value.is_empty() {
                continue;
            }
            if let Some(pattern) = CompiledPattern::compile(key) {
                entries.push(PatternEntry {
                    pattern,
                    value: value.clone(),
                });
            }
        }

        Self { entries }
    }

    /// Returns `true` if the map compiled to no usable patterns.
    #[inline]
    #[must_use = "returns whether the set is empty"]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of usable compiled entries.
    #[inline]
    #[must_use = "returns the entry count"]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Matches a text leaf's unescaped content against the whole set.
    ///
    /// Content is trimmed before comparison. Form priority is fixed:
    /// bracketed-exact first, then unbracketed-exact, then
    /// case-insensitive; within a form, ties go to the lexicographically
    /// smallest key. Returns the winning key and its replacement value.
    #[must_use = "returns the matched key and value, if any"]
    pub fn classify(&self, content: &str) -> Option<(&str, &str)> {
        let content = content.trim();
        if content.is_empty() {
            return None;
        }

        for entry in &self.entries {
            if entry.pattern.matches_bracketed(content) {
                return Some((entry.pattern.key(), entry.value.as_str()));
            }
        }
        for entry in &self.entries {
            if entry.pattern.matches_exact(content) {
                return Some((entry.pattern.key(), entry.value.as_str()));
            }
        }

        let folded = content.to_lowercase();
        for entry in &self.entries {
            if entry.pattern.matches_folded(&folded) {
                return Some((entry.pattern.key(), entry.value.as_str()));
            }
        }

        None
    }
}
