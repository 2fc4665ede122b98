//! API definition mapper. Turns an automation's JSON API definition into
//! catalog contexts.
//!
//! Each API context becomes one pattern. Patterns are grouped into catalog
//! contexts by domain (kafka, storage, service, ...), in first-seen order.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use ii_protocol::{Action, ApiDescriptor};

use crate::catalog::{Context, ContextSpec, PatternSpec};
use crate::error::{CatalogError, CatalogResult};

/// Tags that name a domain outright.
const PRIMARY_DOMAINS: [&str; 5] = ["kafka", "storage", "service", "database", "kubernetes"];

const GENERAL_DOMAIN: &str = "general";

/// Maximum generated examples per pattern.
const MAX_EXAMPLES: usize = 4;

// ── Definition format ─────────────────────────────────────────

/// A published automation API, as onboarded from JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiDefinition {
    pub automation_id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub version: String,
    pub api_base_url: String,
    pub contexts: Vec<ApiContext>,
    #[serde(default)]
    pub common_parameters: BTreeMap<String, ParameterDefinition>,
}

/// One operation exposed by the automation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiContext {
    pub id: String,
    pub name: String,
    /// Command phrasings; the first one drives action and examples.
    pub triggers: Vec<String>,
    #[serde(default)]
    pub context_tags: Vec<String>,
    #[serde(default)]
    pub parameters: Vec<ParameterDefinition>,
    pub api: ApiDescriptor,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParameterDefinition {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub default: Option<serde_json::Value>,
    #[serde(rename = "enum", default)]
    pub allowed: Vec<String>,
    #[serde(default)]
    pub description: String,
}

impl ApiDefinition {
    pub fn from_json_str(contents: &str) -> CatalogResult<Self> {
        serde_json::from_str(contents).map_err(|e| CatalogError::Format(e.to_string()))
    }

    /// Load a definition from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> CatalogResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| CatalogError::Io(format!("{}: {e}", path.display())))?;
        Self::from_json_str(&contents)
    }
}

// ── Mapping ───────────────────────────────────────────────────

/// Map a definition to compiled catalog contexts, one per domain.
pub fn map_definition(definition: &ApiDefinition) -> CatalogResult<Vec<Context>> {
    let mut groups: Vec<(&'static str, Vec<&ApiContext>)> = Vec::new();
    for api_context in &definition.contexts {
        let domain = domain_of(api_context);
        match groups.iter_mut().find(|(d, _)| *d == domain) {
            Some((_, members)) => members.push(api_context),
            None => groups.push((domain, vec![api_context])),
        }
    }

    let mut contexts = Vec::with_capacity(groups.len());
    for (domain, members) in groups {
        let patterns = members
            .iter()
            .map(|c| pattern_spec(c, &definition.api_base_url))
            .collect::<CatalogResult<Vec<_>>>()?;

        let operations: Vec<String> = members.iter().map(|c| c.name.to_lowercase()).collect();
        contexts.push(Context::compile(ContextSpec {
            id: domain.to_string(),
            name: context_name(domain),
            description: format!(
                "Infrastructure operations including {}",
                operations.join(", ")
            ),
            color: context_color(domain).to_string(),
            icon: context_icon(domain).to_string(),
            patterns,
        })?);
    }

    tracing::info!(
        automation_id = %definition.automation_id,
        version = %definition.version,
        contexts = contexts.len(),
        "mapped API definition"
    );
    Ok(contexts)
}

/// Domain an API context belongs to: a primary tag, else a hint in its id.
pub fn domain_of(api_context: &ApiContext) -> &'static str {
    for tag in &api_context.context_tags {
        let tag = tag.to_lowercase();
        if let Some(domain) = PRIMARY_DOMAINS.iter().find(|d| **d == tag) {
            return *domain;
        }
    }

    let id = api_context.id.to_lowercase();
    if id.contains("kafka") {
        "kafka"
    } else if id.contains("storage") || id.contains("disk") {
        "storage"
    } else if id.contains("service") {
        "service"
    } else {
        GENERAL_DOMAIN
    }
}

pub fn context_name(domain: &str) -> String {
    match domain {
        "kafka" => "Apache Kafka".into(),
        "storage" => "Storage Management".into(),
        "service" => "Service Management".into(),
        "database" => "Database Operations".into(),
        "kubernetes" => "Kubernetes".into(),
        "general" => "General Operations".into(),
        other => capitalize(other),
    }
}

fn context_color(domain: &str) -> &'static str {
    match domain {
        "kafka" => "from-orange-500 to-red-500",
        "storage" => "from-blue-500 to-cyan-500",
        "service" => "from-green-500 to-emerald-500",
        "database" => "from-purple-500 to-indigo-500",
        "kubernetes" => "from-indigo-500 to-purple-500",
        _ => "from-gray-500 to-gray-600",
    }
}

fn context_icon(domain: &str) -> &'static str {
    match domain {
        "kafka" => "Zap",
        "storage" | "database" => "Database",
        "service" => "Container",
        "kubernetes" => "Boxes",
        _ => "Settings",
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

fn pattern_spec(api_context: &ApiContext, base_url: &str) -> CatalogResult<PatternSpec> {
    let Some(first_trigger) = api_context.triggers.first() else {
        return Err(CatalogError::ApiDefinition(format!(
            "context '{}' has no triggers",
            api_context.id
        )));
    };

    let mut names = Vec::with_capacity(api_context.parameters.len());
    for (i, param) in api_context.parameters.iter().enumerate() {
        match param.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => names.push(name.to_string()),
            _ => {
                return Err(CatalogError::ApiDefinition(format!(
                    "context '{}' parameter #{} has no name",
                    api_context.id,
                    i + 1
                )));
            }
        }
    }

    Ok(PatternSpec {
        intent: api_context.id.clone(),
        action: Action::from_trigger(first_trigger),
        rule: build_rule(&api_context.triggers, &api_context.parameters),
        examples: generate_examples(first_trigger, &api_context.id, &names),
        parameters: names,
        api: ApiDescriptor::new(
            resolve_url(base_url, &api_context.api.url),
            api_context.api.method,
        ),
    })
}

/// Trigger alternation followed by one optional capture group per parameter.
pub fn build_rule(triggers: &[String], parameters: &[ParameterDefinition]) -> String {
    let alternatives: Vec<String> = triggers
        .iter()
        .map(|t| {
            t.split_whitespace()
                .map(regex::escape)
                .collect::<Vec<_>>()
                .join(r"\s+")
        })
        .collect();

    let mut rule = format!("(?:{})", alternatives.join("|"));
    for param in parameters {
        rule.push_str(&parameter_group(param));
    }
    rule
}

fn parameter_group(param: &ParameterDefinition) -> String {
    let group = match param.name.as_deref().unwrap_or_default() {
        "hostname" => r"(?:\s+(?:on|host)\s+(\S+))?",
        "service_name" => r"(?:\s+(?:service\s+)?(\S+))?",
        "cluster" => r"(?:\s+(?:in\s+)?cluster\s+(\S+))?",
        "rack_id" => r"(?:\s+rack\s+(\S+))?",
        "disk_paths" => r"(?:\s+paths?\s+([^,\s]+(?:,\s*[^,\s]+)*))?",
        "cleanup_type" => r"(?:\s+(temp_files|log_files|cache|all))?",
        "dry_run" => r"(?:\s+(dry[_\s]?run))?",
        "force" => r"(?:\s+(force))?",
        _ if !param.allowed.is_empty() => {
            let values: Vec<String> = param.allowed.iter().map(|v| regex::escape(v)).collect();
            return format!(r"(?:\s+({}))?", values.join("|"));
        }
        _ => r"(?:\s+(\S+))?",
    };
    group.to_string()
}

fn generate_examples(trigger: &str, intent: &str, names: &[String]) -> Vec<String> {
    let has = |name: &str| names.iter().any(|n| n == name);
    let mut examples = Vec::new();

    if has("hostname") {
        examples.push(format!("{trigger} on server-01"));
        examples.push(format!("{trigger} on host-prod-02"));
    }
    if has("service_name") {
        examples.push(format!("{trigger} nginx on web-01"));
        examples.push(format!("{trigger} api-gateway on server-02"));
    }
    if has("cluster") {
        examples.push(format!("{trigger} on server-01 in production"));
    }
    if intent.contains("clean_disks") {
        examples.push(format!("{trigger} on storage-01 temp_files"));
        examples.push(format!("{trigger} on server-02 paths /tmp,/var/log dry run"));
    }

    examples.truncate(MAX_EXAMPLES);
    examples
}

fn resolve_url(base_url: &str, url: &str) -> String {
    if url.starts_with('/') {
        format!("{}{url}", base_url.trim_end_matches('/'))
    } else {
        url.to_string()
    }
}
