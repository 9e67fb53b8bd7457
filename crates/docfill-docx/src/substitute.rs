//! Single-pass placeholder substitution over raw body XML.
//!
//! The engine walks the XML once with a namespace-aware pull parser,
//! computing the byte span of every pure text leaf (wordprocessingml `t`
//! content with no child markup, under whatever prefix the document binds).
//! Each leaf's unescaped content is classified against the compiled pattern
//! set; matched spans are spliced with the XML-escaped replacement value.
//! Everything outside matched spans is carried over untouched, so a pass
//! that matches nothing returns the input byte-for-byte.

use docfill_core::{DocfillError, ReplacementMap, Result};
use quick_xml::escape::escape;
use quick_xml::events::Event;
use quick_xml::name::{Namespace, QName, ResolveResult};
use quick_xml::NsReader;

use crate::patterns::PatternSet;
use crate::WORDPROCESSINGML_NS;

const TEXT_LEAF: &[u8] = b"t";

/// Outcome of one substitution pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubstitutionOutcome {
    /// The body XML after replacement; byte-identical to the input when
    /// `replacement_count` is zero.
    pub body_xml: String,

    /// Number of text leaves replaced across the whole document.
    pub replacement_count: usize,

    /// Keys that matched at least one leaf, in first-match order.
    pub matched_keys: Vec<String>,
}

/// State of the text leaf currently being read.
struct LeafState {
    /// Byte offset just past the leaf's opening tag.
    content_start: usize,
    /// Accumulated unescaped character data.
    text: String,
    /// False once any child markup (elements, CDATA, comments) appears;
    /// patterns anchor to leaves whose entire content is character data.
    pure: bool,
}

impl LeafState {
    fn begin(content_start: usize) -> Self {
        Self {
            content_start,
            text: String::new(),
            pure: true,
        }
    }
}

/// Element test against the wordprocessingml namespace, prefix-independent.
fn is_wp_text_leaf(reader: &NsReader<&[u8]>, name: QName) -> bool {
    let (ns, local) = reader.resolve_element(name);
    local.as_ref() == TEXT_LEAF
        && ns == ResolveResult::Bound(Namespace(WORDPROCESSINGML_NS.as_bytes()))
}

/// Replaces the content of every text leaf that matches a compiled pattern.
///
/// Replacement is global (every matching leaf, not just the first) and never
/// fails on keys without a matching leaf or on leaves without a matching
/// key. Text leaves are resolved by namespace, so any prefix the document
/// binds to the wordprocessingml namespace is honored and `t` elements from
/// other vocabularies are left alone. Values are XML-escaped (`& < > " '`
/// become entity forms) before splicing, so substitution cannot break
/// well-formedness. Each leaf is replaced at most once, which makes the
/// operation naturally idempotent: substituted text no longer carries the
/// original token form.
///
/// # Errors
///
/// Returns [`DocfillError::MalformedXml`] if the body XML cannot be walked.
///
/// # Examples
///
/// ```rust
/// use docfill_core::ReplacementMap;
/// use docfill_docx::{substitute, WORDPROCESSINGML_NS};
///
/// let body = format!(
///     r#"<w:p xmlns:w="{WORDPROCESSINGML_NS}"><w:r><w:t>[NAME]</w:t></w:r></w:p>"#
/// );
/// let mut replacements = ReplacementMap::new();
/// replacements.insert("NAME".to_string(), "O'Brien & Co".to_string());
///
/// let outcome = substitute(&body, &replacements).unwrap();
/// assert_eq!(outcome.replacement_count, 1);
/// assert!(outcome.body_xml.contains("O&apos;Brien &amp; Co"));
/// ```
pub fn substitute(body_xml: &str, replacements: &ReplacementMap) -> Result<SubstitutionOutcome> {
    let patterns = PatternSet::compile(replacements);
    if patterns.is_empty() {
        return Ok(SubstitutionOutcome {
            body_xml: body_xml.to_string(),
            replacement_count: 0,
            matched_keys: Vec::new(),
        });
    }

    let mut reader = NsReader::from_str(body_xml);
    // Leaf whitespace is significant and span math needs untouched offsets.
    reader.trim_text(false);
    let mut buf = Vec::new();

    // Ascending, non-overlapping (start, end, replacement) spans into body_xml.
    let mut splices: Vec<(usize, usize, String)> = Vec::new();
    let mut matched_keys: Vec<String> = Vec::new();

    let mut leaf: Option<LeafState> = None;
    let mut prev_pos = 0usize;

    loop {
        let event = match reader.read_event_into(&mut buf) {
            Ok(event) => event,
            Err(e) => {
                return Err(DocfillError::MalformedXml(format!(
                    "parse error at byte {}: {e}",
                    reader.buffer_position()
                )))
            }
        };

        match event {
            Event::Start(ref e) => {
                if leaf.is_none() && is_wp_text_leaf(&reader, e.name()) {
                    leaf = Some(LeafState::begin(reader.buffer_position()));
                } else if let Some(state) = leaf.as_mut() {
                    state.pure = false;
                }
            }
            Event::Text(ref e) => {
                if let Some(state) = leaf.as_mut() {
                    let text = e.unescape().map_err(|e| {
                        DocfillError::MalformedXml(format!("XML unescape error: {e}"))
                    })?;
                    state.text.push_str(&text);
                }
            }
            Event::End(ref e) => {
                if is_wp_text_leaf(&reader, e.name()) {
                    if let Some(state) = leaf.take() {
                        if state.pure {
                            if let Some((key, value)) = patterns.classify(&state.text) {
                                // prev_pos is the offset of this closing tag,
                                // so the span covers exactly the leaf content.
                                splices.push((
                                    state.content_start,
                                    prev_pos,
                                    escape(value).into_owned(),
                                ));
                                if !matched_keys.iter().any(|k| k == key) {
                                    matched_keys.push(key.to_string());
                                }
                            }
                        }
                    }
                }
            }
            Event::Empty(_) | Event::CData(_) | Event::Comment(_) | Event::PI(_) => {
                if let Some(state) = leaf.as_mut() {
                    state.pure = false;
                }
            }
            Event::Eof => break,
            _ => {}
        }

        prev_pos = reader.buffer_position();
        buf.clear();
    }

    if splices.is_empty() {
        return Ok(SubstitutionOutcome {
            body_xml: body_xml.to_string(),
            replacement_count: 0,
            matched_keys: Vec::new(),
        });
    }

    let mut output = String::with_capacity(body_xml.len());
    let mut cursor = 0usize;
    for (start, end, replacement) in &splices {
        output.push_str(&body_xml[cursor..*start]);
        output.push_str(replacement);
        cursor = *end;
    }
    output.push_str(&body_xml[cursor..]);

    Ok(SubstitutionOutcome {
        replacement_count: splices.len(),
        body_xml: output,
        matched_keys,
    })
}
