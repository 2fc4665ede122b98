//! Parameter extraction: positional capture groups to a typed `ParameterSet`.

use ii_protocol::{ParamValue, ParameterSet};

use crate::catalog::Pattern;

/// Parameters whose capture is itself the signal; captured text is discarded.
const FLAG_PARAMETERS: [&str; 2] = ["force", "dry_run"];

/// Parameters parsed as integers besides the `*_id` family.
const INTEGER_PARAMETERS: [&str; 2] = ["port", "replicas"];

/// Extract parameters for `pattern` from `text`.
///
/// A structural non-match yields an empty set. Use [`try_extract`] to tell
/// that apart from a match that captured nothing.
pub fn extract(text: &str, pattern: &Pattern) -> ParameterSet {
    try_extract(text, pattern).unwrap_or_default()
}

/// Extract parameters, or `None` if the rule does not match `text`.
pub fn try_extract(text: &str, pattern: &Pattern) -> Option<ParameterSet> {
    let caps = pattern.captures(text)?;
    let mut params = ParameterSet::new();

    for (i, name) in pattern.parameters.iter().enumerate() {
        let Some(group) = caps.get(i + 1) else {
            continue;
        };
        let value = group.as_str().trim();
        if value.is_empty() {
            continue;
        }
        params.insert(name.as_str(), coerce(name, value));
    }

    apply_text_flags(text, &mut params);
    Some(params)
}

/// Coerce a trimmed, non-empty capture for parameter `name`.
///
/// Never fails: an integer-typed parameter that does not parse as an `i64`
/// (including values outside its range) keeps its string form.
pub fn coerce(name: &str, value: &str) -> ParamValue {
    if FLAG_PARAMETERS.contains(&name) {
        return ParamValue::Bool(true);
    }
    if value.contains(',') {
        return ParamValue::List(value.split(',').map(|s| s.trim().to_string()).collect());
    }
    if name.ends_with("_id") || INTEGER_PARAMETERS.contains(&name) {
        return value
            .parse::<i64>()
            .map(ParamValue::Integer)
            .unwrap_or_else(|_| ParamValue::Text(value.to_string()));
    }
    ParamValue::Text(value.to_string())
}

/// Set `force` / `dry_run` when the text mentions them anywhere, even outside
/// a capture group. Already-set keys are left alone.
fn apply_text_flags(text: &str, params: &mut ParameterSet) {
    let lower = text.to_lowercase();
    if lower.contains("force") && !params.contains("force") {
        params.insert("force", true);
    }
    if (lower.contains("dry run") || lower.contains("dry-run")) && !params.contains("dry_run") {
        params.insert("dry_run", true);
    }
}
