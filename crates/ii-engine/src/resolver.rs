//! Intent resolution: pick the best-scoring pattern for a command text.
//!
//! Every pattern in every context is tried (catalog order). Matches become
//! candidates, the highest confidence wins, and ties go to the pattern
//! declared first. When nothing matches, closest catalog examples are
//! returned as suggestions.

use chrono::Utc;

use ii_protocol::{FailureKind, Intent, Resolution};

use crate::catalog::{Catalog, Pattern};
use crate::extract::extract;
use crate::score;
use crate::suggest;

pub const EMPTY_INPUT_MESSAGE: &str = "empty input";

pub const NO_MATCH_HINT: &str = "No matching infrastructure operation found. \
     Try commands like \"restart kafka node on server-01\" or \"clean disks on storage-02\"";

/// A pattern that structurally matched, with its confidence.
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'c> {
    pub pattern: &'c Pattern,
    pub confidence: f64,
}

/// Resolves command text against a catalog. Holds no mutable state.
#[derive(Debug, Clone, Copy)]
pub struct IntentResolver<'c> {
    catalog: &'c Catalog,
}

impl IntentResolver<'static> {
    /// Resolver over the built-in catalog.
    pub fn builtin() -> Self {
        Self::new(Catalog::builtin())
    }
}

impl<'c> IntentResolver<'c> {
    pub fn new(catalog: &'c Catalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &'c Catalog {
        self.catalog
    }

    /// Resolve `text` into an intent, or a failure with suggestions.
    pub fn resolve(&self, text: &str) -> Resolution {
        if text.trim().is_empty() {
            tracing::debug!("empty input, skipping catalog scan");
            return Resolution::Unresolved {
                reason: FailureKind::EmptyInput,
                error: EMPTY_INPUT_MESSAGE.to_string(),
                suggestions: Vec::new(),
            };
        }

        let candidates = self.ranked_candidates(text);
        let Some(best) = candidates.first() else {
            let suggestions = suggest::suggest(self.catalog, text);
            tracing::debug!(suggestions = suggestions.len(), "no pattern matched");
            return Resolution::Unresolved {
                reason: FailureKind::NoMatch,
                error: NO_MATCH_HINT.to_string(),
                suggestions,
            };
        };

        let pattern = best.pattern;
        tracing::debug!(
            intent = %pattern.intent,
            context = %pattern.context,
            confidence = best.confidence,
            candidates = candidates.len(),
            "resolved"
        );

        Resolution::Resolved {
            intent: Intent {
                intent_id: pattern.intent.clone(),
                confidence: best.confidence,
                context: pattern.context.clone(),
                action: pattern.action,
                parameters: extract(text, pattern),
                timestamp: Utc::now(),
                api: pattern.api.clone(),
            },
        }
    }

    /// All matching patterns, best first. Equal confidence keeps catalog order.
    pub fn ranked_candidates(&self, text: &str) -> Vec<Candidate<'c>> {
        let mut candidates: Vec<Candidate<'c>> = self
            .catalog
            .patterns()
            .filter_map(|pattern| {
                let breakdown = score::explain(text, pattern)?;
                tracing::trace!(intent = %pattern.intent, context = %pattern.context, ?breakdown, "candidate");
                Some(Candidate {
                    pattern,
                    confidence: breakdown.confidence,
                })
            })
            .collect();

        // Stable: ties stay in scan order.
        candidates.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
        candidates
    }

    pub fn suggest(&self, text: &str) -> Vec<String> {
        suggest::suggest(self.catalog, text)
    }

    pub fn context_examples(&self, context_id: Option<&str>) -> Vec<String> {
        suggest::context_examples(self.catalog, context_id)
    }
}
