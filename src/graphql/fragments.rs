//! Fragment bookkeeping applied to every parsed document.
//!
//! Within one document a fragment definition whose normalized text repeats an
//! earlier one is dropped. Across a pass, fragment names are expected to be
//! unique: a name that shows up again with different text is reported.

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::warn;

use super::ast::{Definition, Document};

/// Normalized fragment texts seen so far, per fragment name.
#[derive(Debug, Default)]
pub struct FragmentSources {
    by_name: FxHashMap<String, FxHashSet<String>>,
}

impl FragmentSources {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `text` for `name`. Returns false when the name was already
    /// seen with a different text.
    pub fn record(&mut self, name: &str, text: String) -> bool {
        match self.by_name.get_mut(name) {
            Some(texts) => {
                let known = texts.contains(&text);
                texts.insert(text);
                known
            }
            None => {
                self.by_name
                    .entry(name.to_string())
                    .or_default()
                    .insert(text);
                true
            }
        }
    }

    /// Number of distinct texts recorded for `name`.
    pub fn variants(&self, name: &str) -> usize {
        self.by_name.get(name).map_or(0, FxHashSet::len)
    }
}

/// Collapses runs of whitespace and commas into one space and trims.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;
    for c in text.chars() {
        if c.is_whitespace() || c == ',' {
            pending_space = true;
            continue;
        }
        if pending_space && !out.is_empty() {
            out.push(' ');
        }
        pending_space = false;
        out.push(c);
    }
    out
}

/// Deduplicates fragment definitions in `document` and records their names.
///
/// Returns the fragment names that were warned about, which is always empty
/// when `warn_on_conflict` is false.
pub fn process_fragments(
    document: &mut Document,
    sources: &mut FragmentSources,
    warn_on_conflict: bool,
) -> Vec<String> {
    let body = &document.loc.source.body;
    let mut seen = FxHashSet::default();
    let mut warned = Vec::new();

    document.definitions.retain(|definition| {
        let Definition::Fragment(fragment) = definition else {
            return true;
        };

        let (start, end) = fragment.span;
        let key = normalize(body.get(start..end).unwrap_or_default());

        if !sources.record(&fragment.name.value, key.clone()) && warn_on_conflict {
            warn!(
                fragment = %fragment.name.value,
                "fragment with name {} already exists; fragment names are expected to be unique",
                fragment.name.value
            );
            warned.push(fragment.name.value.clone());
        }

        seen.insert(key)
    });

    warned
}
