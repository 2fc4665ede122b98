use serde::{Deserialize, Serialize};

use crate::intent::Intent;

/// Why resolution produced no intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Input was empty or whitespace only; the catalog was never scanned.
    EmptyInput,
    /// No pattern structurally matched the input.
    NoMatch,
}

/// Outcome of resolving one command text.
///
/// Failure is data, not an error: every unresolved outcome carries a
/// human-readable message and (for `NoMatch`) alternative phrasings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Resolution {
    Resolved {
        intent: Intent,
    },
    Unresolved {
        reason: FailureKind,
        error: String,
        #[serde(default)]
        suggestions: Vec<String>,
    },
}

impl Resolution {
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved { .. })
    }

    pub fn intent(&self) -> Option<&Intent> {
        match self {
            Self::Resolved { intent } => Some(intent),
            Self::Unresolved { .. } => None,
        }
    }

    pub fn into_intent(self) -> Option<Intent> {
        match self {
            Self::Resolved { intent } => Some(intent),
            Self::Unresolved { .. } => None,
        }
    }

    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            Self::Resolved { .. } => None,
            Self::Unresolved { reason, .. } => Some(*reason),
        }
    }

    pub fn suggestions(&self) -> &[String] {
        match self {
            Self::Resolved { .. } => &[],
            Self::Unresolved { suggestions, .. } => suggestions,
        }
    }
}

/// Business-rule check result for a resolved intent. Never fatal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<String>,
}

impl ValidationReport {
    pub fn from_errors(errors: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unresolved_serialization() {
        let resolution = Resolution::Unresolved {
            reason: FailureKind::NoMatch,
            error: "no match".into(),
            suggestions: vec!["restart kafka node on server-01".into()],
        };
        let json = serde_json::to_value(&resolution).unwrap();
        assert_eq!(json["outcome"], "unresolved");
        assert_eq!(json["reason"], "no_match");
        assert_eq!(json["suggestions"][0], "restart kafka node on server-01");
    }

    #[test]
    fn unresolved_without_suggestions_deserializes() {
        let json = r#"{"outcome": "unresolved", "reason": "empty_input", "error": "empty input"}"#;
        let resolution: Resolution = serde_json::from_str(json).unwrap();
        assert_eq!(resolution.failure_kind(), Some(FailureKind::EmptyInput));
        assert!(resolution.suggestions().is_empty());
        assert!(resolution.intent().is_none());
    }

    #[test]
    fn validation_report_valid_iff_no_errors() {
        assert!(ValidationReport::from_errors(vec![]).valid);
        let report = ValidationReport::from_errors(vec!["Service name is required".into()]);
        assert!(!report.valid);
        assert_eq!(report.errors.len(), 1);
    }
}
