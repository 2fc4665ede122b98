//! Aggregate statistics over recorded intents.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::intent::Intent;

/// Confidence at or above which an intent counts as high confidence.
pub const HIGH_CONFIDENCE: f64 = 0.8;
/// Confidence at or above which an intent counts as medium confidence.
pub const MEDIUM_CONFIDENCE: f64 = 0.6;

/// Count of intents per confidence band.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfidenceDistribution {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl ConfidenceDistribution {
    fn add(&mut self, confidence: f64) {
        if confidence >= HIGH_CONFIDENCE {
            self.high += 1;
        } else if confidence >= MEDIUM_CONFIDENCE {
            self.medium += 1;
        } else {
            self.low += 1;
        }
    }
}

/// Usage summary over a set of resolved intents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsSummary {
    pub total_commands: usize,
    pub avg_confidence: f64,
    pub context_stats: BTreeMap<String, usize>,
    pub action_stats: BTreeMap<String, usize>,
    pub confidence_distribution: ConfidenceDistribution,
}

impl AnalyticsSummary {
    /// Summarize intents. No intents yields an all-zero summary.
    pub fn from_intents<'a>(intents: impl IntoIterator<Item = &'a Intent>) -> Self {
        let mut summary = Self::default();
        let mut total_confidence = 0.0;

        for intent in intents {
            summary.total_commands += 1;
            total_confidence += intent.confidence;
            *summary
                .context_stats
                .entry(intent.context.clone())
                .or_default() += 1;
            *summary
                .action_stats
                .entry(intent.action.as_str().to_string())
                .or_default() += 1;
            summary.confidence_distribution.add(intent.confidence);
        }

        if summary.total_commands > 0 {
            summary.avg_confidence = total_confidence / summary.total_commands as f64;
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intent::{Action, ApiDescriptor, HttpMethod, ParameterSet};
    use chrono::Utc;

    fn intent(context: &str, action: Action, confidence: f64) -> Intent {
        Intent {
            intent_id: "test_intent".into(),
            confidence,
            context: context.into(),
            action,
            parameters: ParameterSet::new(),
            timestamp: Utc::now(),
            api: ApiDescriptor::new("https://api.test/op", HttpMethod::Post),
        }
    }

    #[test]
    fn empty_summary_is_zeroed() {
        let summary = AnalyticsSummary::from_intents(std::iter::empty());
        assert_eq!(summary.total_commands, 0);
        assert_eq!(summary.avg_confidence, 0.0);
        assert!(summary.context_stats.is_empty());
        assert_eq!(summary.confidence_distribution, ConfidenceDistribution::default());
    }

    #[test]
    fn counts_contexts_actions_and_bands() {
        let intents = vec![
            intent("kafka", Action::Restart, 0.96),
            intent("kafka", Action::Restart, 0.7),
            intent("storage", Action::Clean, 0.5),
        ];
        let summary = AnalyticsSummary::from_intents(&intents);

        assert_eq!(summary.total_commands, 3);
        assert!((summary.avg_confidence - (0.96 + 0.7 + 0.5) / 3.0).abs() < 1e-9);
        assert_eq!(summary.context_stats["kafka"], 2);
        assert_eq!(summary.context_stats["storage"], 1);
        assert_eq!(summary.action_stats["restart"], 2);
        assert_eq!(summary.action_stats["clean"], 1);
        assert_eq!(
            summary.confidence_distribution,
            ConfidenceDistribution {
                high: 1,
                medium: 1,
                low: 1
            }
        );
    }

    #[test]
    fn band_boundaries_are_inclusive() {
        let intents = vec![
            intent("kafka", Action::Restart, HIGH_CONFIDENCE),
            intent("kafka", Action::Restart, MEDIUM_CONFIDENCE),
        ];
        let summary = AnalyticsSummary::from_intents(&intents);
        assert_eq!(summary.confidence_distribution.high, 1);
        assert_eq!(summary.confidence_distribution.medium, 1);
    }
}
