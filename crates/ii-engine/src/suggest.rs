//! Fallback suggestions when no pattern matches.

use crate::catalog::Catalog;
use crate::similarity::fuzzy_match;

/// Examples scoring at or below this are never suggested.
pub const MIN_SUGGESTION_SCORE: f64 = 0.3;
/// Maximum number of suggestions returned for free text.
pub const MAX_SUGGESTIONS: usize = 5;
/// Maximum number of examples returned for a context listing.
pub const MAX_CONTEXT_EXAMPLES: usize = 15;

/// Up to five catalog examples closest to `text`, best first.
///
/// Equal scores keep catalog order.
pub fn suggest(catalog: &Catalog, text: &str) -> Vec<String> {
    let mut scored: Vec<(&str, f64)> = catalog
        .patterns()
        .flat_map(|p| p.examples.iter())
        .map(|example| (example.as_str(), fuzzy_match(text, example)))
        .filter(|(_, score)| *score > MIN_SUGGESTION_SCORE)
        .collect();

    scored.sort_by(|a, b| b.1.total_cmp(&a.1));
    scored
        .into_iter()
        .take(MAX_SUGGESTIONS)
        .map(|(example, _)| example.to_string())
        .collect()
}

/// Examples for one context (or the whole catalog when `None`), in catalog
/// order, no scoring. An unknown context id yields nothing.
pub fn context_examples(catalog: &Catalog, context_id: Option<&str>) -> Vec<String> {
    catalog
        .contexts()
        .iter()
        .filter(|c| context_id.is_none_or(|id| c.id == id))
        .flat_map(|c| c.patterns.iter())
        .flat_map(|p| p.examples.iter().cloned())
        .take(MAX_CONTEXT_EXAMPLES)
        .collect()
}
