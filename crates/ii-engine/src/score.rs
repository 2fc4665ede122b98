//! Confidence scoring for a structurally matched pattern.
//!
//! Starts from [`BASE_CONFIDENCE`], adds keyword, context-term and parameter
//! boosts, subtracts a penalty when a host is expected but not named, then
//! clamps to at most 1.0. There is no lower clamp.

use std::sync::LazyLock;

use regex::Regex;

use crate::catalog::Pattern;
use crate::extract::try_extract;

pub const BASE_CONFIDENCE: f64 = 0.85;
pub const ACTION_KEYWORD_BOOST: f64 = 0.03;
pub const CONTEXT_TERM_BOOST: f64 = 0.02;
pub const PARAMETER_BOOST: f64 = 0.01;
pub const MISSING_HOST_PENALTY: f64 = 0.1;

const ACTION_KEYWORDS: [&str; 12] = [
    "restart", "start", "stop", "create", "delete", "scale", "backup", "restore", "clean", "wipe",
    "bounce", "reboot",
];

static HOST_MENTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?:on|host|server)\s+[\w\-\.]+").unwrap());

/// Vocabulary that hints at a context. Unlisted contexts have none.
fn context_terms(context: &str) -> &'static [&'static str] {
    match context {
        "kafka" => &["kafka", "broker", "node", "datanode", "consumer", "producer"],
        "storage" => &["storage", "disk", "box", "rack", "cleanup", "maintenance"],
        "service" => &["service", "daemon", "process"],
        _ => &[],
    }
}

/// How a confidence value was reached.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreBreakdown {
    /// Distinct action keywords found in the input.
    pub action_hits: usize,
    /// Distinct context terms found in the input.
    pub context_hits: usize,
    /// Parameters extracted for the pattern.
    pub parameter_count: usize,
    /// Whether the missing-host penalty applied.
    pub host_penalty: bool,
    /// Final clamped confidence.
    pub confidence: f64,
}

/// Score `text` against `pattern`, or `None` if the rule does not match.
pub fn explain(text: &str, pattern: &Pattern) -> Option<ScoreBreakdown> {
    let params = try_extract(text, pattern)?;
    let lower = text.to_lowercase();

    let action_hits = ACTION_KEYWORDS
        .iter()
        .filter(|k| lower.contains(*k))
        .count();
    let context_hits = context_terms(&pattern.context)
        .iter()
        .filter(|t| lower.contains(*t))
        .count();
    let parameter_count = params.len();
    let host_penalty = pattern.expects("hostname") && !HOST_MENTION.is_match(text);

    let mut confidence = BASE_CONFIDENCE;
    confidence += action_hits as f64 * ACTION_KEYWORD_BOOST;
    confidence += context_hits as f64 * CONTEXT_TERM_BOOST;
    confidence += parameter_count as f64 * PARAMETER_BOOST;
    if host_penalty {
        confidence -= MISSING_HOST_PENALTY;
    }

    Some(ScoreBreakdown {
        action_hits,
        context_hits,
        parameter_count,
        host_penalty,
        confidence: confidence.min(1.0),
    })
}

/// Confidence of `pattern` for `text`; 0.0 when the rule does not match.
pub fn score(text: &str, pattern: &Pattern) -> f64 {
    explain(text, pattern).map_or(0.0, |b| b.confidence)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    fn pattern(intent: &str) -> &'static Pattern {
        Catalog::builtin()
            .patterns()
            .find(|p| p.intent == intent)
            .unwrap()
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn kafka_restart_breakdown() {
        let b = explain("restart kafka node on server-01", pattern("restart_kafka_node")).unwrap();
        // "restart" also contains "start".
        assert_eq!(b.action_hits, 2);
        assert_eq!(b.context_hits, 2);
        assert_eq!(b.parameter_count, 1);
        assert!(!b.host_penalty);
        assert!(approx(b.confidence, 0.96));
    }

    #[test]
    fn non_match_scores_zero() {
        assert_eq!(score("clean disks", pattern("restart_kafka_node")), 0.0);
        assert!(explain("clean disks", pattern("restart_kafka_node")).is_none());
    }

    #[test]
    fn missing_host_is_penalized() {
        let b = explain("restart kafka", pattern("restart_kafka_node")).unwrap();
        assert!(b.host_penalty);
        // 0.85 + 2 * 0.03 + 1 * 0.02 - 0.1
        assert!(approx(b.confidence, 0.83));
    }

    #[test]
    fn keywords_count_once_each() {
        let once = score("restart kafka node on server-01", pattern("restart_kafka_node"));
        let twice = score(
            "restart kafka node on server-01 restart",
            pattern("restart_kafka_node"),
        );
        assert!(approx(once, twice));
    }

    #[test]
    fn clamped_to_one() {
        let text = "stop create delete scale backup restore wipe bounce: \
                    restart kafka node on server-01 broker consumer producer";
        let b = explain(text, pattern("restart_kafka_node")).unwrap();
        assert_eq!(b.confidence, 1.0);
    }

    #[test]
    fn unlisted_context_gets_no_term_boost() {
        assert!(context_terms("database").is_empty());
    }
}
