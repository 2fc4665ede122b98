use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Canonical action an intent performs on its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Restart,
    Start,
    Stop,
    Clean,
    Create,
    Delete,
    Scale,
    /// Catch-all when no trigger word maps to a known action.
    #[default]
    Execute,
}

/// Trigger words mapped to actions, checked in order.
///
/// `restart` precedes `start` so "restart" never reads as a plain start.
const TRIGGER_ACTIONS: [(&str, Action); 11] = [
    ("restart", Action::Restart),
    ("bounce", Action::Restart),
    ("reboot", Action::Restart),
    ("start", Action::Start),
    ("stop", Action::Stop),
    ("clean", Action::Clean),
    ("wipe", Action::Clean),
    ("clear", Action::Clean),
    ("create", Action::Create),
    ("delete", Action::Delete),
    ("scale", Action::Scale),
];

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Restart => "restart",
            Self::Start => "start",
            Self::Stop => "stop",
            Self::Clean => "clean",
            Self::Create => "create",
            Self::Delete => "delete",
            Self::Scale => "scale",
            Self::Execute => "execute",
        }
    }

    /// Derive the action from a trigger phrase ("bounce kafka" → `Restart`).
    pub fn from_trigger(trigger: &str) -> Self {
        let lower = trigger.to_lowercase();
        TRIGGER_ACTIONS
            .iter()
            .find(|(word, _)| lower.contains(word))
            .map(|(_, action)| *action)
            .unwrap_or_default()
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// HTTP verb of a target API call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    #[default]
    Post,
    Put,
    Patch,
    Delete,
}

/// Describes the automation API call an intent maps to. Never invoked here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiDescriptor {
    pub url: String,
    #[serde(default)]
    pub method: HttpMethod,
}

impl ApiDescriptor {
    pub fn new(url: impl Into<String>, method: HttpMethod) -> Self {
        Self {
            url: url.into(),
            method,
        }
    }
}

// ── Parameters ────────────────────────────────────────────────

/// A single extracted parameter value.
///
/// Booleans only ever appear as `true`: an unset flag is absent from the
/// `ParameterSet` rather than stored as `false`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    Integer(i64),
    List(Vec<String>),
    Text(String),
}

impl ParamValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn is_true(&self) -> bool {
        matches!(self, Self::Bool(true))
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

/// Parameter name → typed value, iterated in name order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterSet(BTreeMap<String, ParamValue>);

impl ParameterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<ParamValue>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>, V: Into<ParamValue>> FromIterator<(K, V)> for ParameterSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

// ── Intent ────────────────────────────────────────────────────

/// Fully resolved interpretation of one operator command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Intent {
    /// Intent identifier of the winning pattern (e.g., "restart_kafka_node").
    #[serde(rename = "intent")]
    pub intent_id: String,
    /// Heuristic match quality, at most 1.0 (no lower bound).
    pub confidence: f64,
    /// Context the winning pattern belongs to.
    pub context: String,
    pub action: Action,
    #[serde(default)]
    pub parameters: ParameterSet,
    /// When the intent was created. Callers recording history overwrite it.
    pub timestamp: DateTime<Utc>,
    pub api: ApiDescriptor,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_serialization() {
        assert_eq!(
            serde_json::to_string(&Action::Restart).unwrap(),
            r#""restart""#
        );
        assert_eq!(
            serde_json::to_string(&Action::Execute).unwrap(),
            r#""execute""#
        );
    }

    #[test]
    fn action_from_trigger() {
        assert_eq!(Action::from_trigger("restart kafka"), Action::Restart);
        assert_eq!(Action::from_trigger("Bounce service"), Action::Restart);
        assert_eq!(Action::from_trigger("start broker"), Action::Start);
        assert_eq!(Action::from_trigger("wipe disks"), Action::Clean);
        assert_eq!(Action::from_trigger("scale deployment"), Action::Scale);
        assert_eq!(Action::from_trigger("rotate certificates"), Action::Execute);
    }

    #[test]
    fn http_method_is_uppercase_on_the_wire() {
        let api = ApiDescriptor::new("https://api.test/kafka/restart", HttpMethod::Post);
        let json = serde_json::to_value(&api).unwrap();
        assert_eq!(json["method"], "POST");
    }

    #[test]
    fn param_values_serialize_untagged() {
        let params: ParameterSet = [
            ("hostname", ParamValue::from("server-01")),
            ("replicas", ParamValue::from(3_i64)),
            ("force", ParamValue::from(true)),
            (
                "disk_paths",
                ParamValue::from(vec!["/tmp".to_string(), "/var/log".to_string()]),
            ),
        ]
        .into_iter()
        .collect();

        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(json["hostname"], "server-01");
        assert_eq!(json["replicas"], 3);
        assert_eq!(json["force"], true);
        assert_eq!(json["disk_paths"][1], "/var/log");
    }

    #[test]
    fn param_values_deserialize_to_matching_variant() {
        let json = r#"{"port": 9092, "force": true, "hostname": "web-01", "disk_paths": ["/tmp"]}"#;
        let params: ParameterSet = serde_json::from_str(json).unwrap();
        assert_eq!(params.get("port").and_then(ParamValue::as_i64), Some(9092));
        assert!(params.get("force").unwrap().is_true());
        assert_eq!(params.get("hostname").and_then(ParamValue::as_str), Some("web-01"));
        assert_eq!(params.get("disk_paths").unwrap().as_list().unwrap().len(), 1);
    }

    #[test]
    fn parameter_set_iterates_in_name_order() {
        let mut params = ParameterSet::new();
        params.insert("hostname", "server-01");
        params.insert("cluster", "prod");
        let keys: Vec<_> = params.keys().collect();
        assert_eq!(keys, vec!["cluster", "hostname"]);
    }

    #[test]
    fn intent_uses_intent_key_on_the_wire() {
        let intent = Intent {
            intent_id: "restart_kafka_node".into(),
            confidence: 0.96,
            context: "kafka".into(),
            action: Action::Restart,
            parameters: ParameterSet::new(),
            timestamp: Utc::now(),
            api: ApiDescriptor::new("https://api.test/kafka/restart", HttpMethod::Post),
        };
        let json = serde_json::to_value(&intent).unwrap();
        assert_eq!(json["intent"], "restart_kafka_node");
        assert_eq!(json["action"], "restart");
        assert!(json.get("intent_id").is_none());
    }
}
