//! Shared fixtures for E2E integration tests.
//!
//! Small purpose-built catalogs plus helpers that drive the real resolver,
//! validator and CLI session across crate boundaries.

#![allow(dead_code)]

use std::path::PathBuf;

use ii_engine::{Catalog, IntentResolver};
use ii_protocol::{Intent, Resolution};

/// Two contexts declaring the identical rule, so both candidates score the same.
pub const TIE_BREAK_CATALOG: &str = r#"
[[contexts]]
id = "network"
name = "Network"

[[contexts.patterns]]
intent = "ping_host"
action = "execute"
rule = 'ping\s+(\S+)'
parameters = ["target"]
examples = ["ping server-01"]
api = { url = "https://api.test/network/ping", method = "GET" }

[[contexts]]
id = "monitoring"
name = "Monitoring"

[[contexts.patterns]]
intent = "probe_host"
action = "execute"
rule = 'ping\s+(\S+)'
parameters = ["target"]
examples = ["ping monitor-01"]
api = { url = "https://api.test/monitoring/probe", method = "GET" }
"#;

/// A deployment-scaling catalog exercising integer coercion.
pub const SCALE_CATALOG: &str = r#"
[[contexts]]
id = "kubernetes"
name = "Kubernetes"

[[contexts.patterns]]
intent = "scale_deployment"
action = "scale"
rule = 'scale\s+(\S+)\s+to\s+(\S+)'
parameters = ["deployment", "replicas"]
examples = ["scale web to 3"]
api = { url = "https://api.test/k8s/scale", method = "PATCH" }
"#;

/// A minimal API definition for onboarding tests.
pub const API_DEFINITION: &str = r#"{
    "automation_id": "db-ops",
    "name": "Database Operations",
    "description": "Database maintenance automation",
    "version": "0.3.0",
    "api_base_url": "https://db-automation.test/v1",
    "contexts": [
        {
            "id": "failover_database",
            "name": "Failover Database",
            "triggers": ["failover database", "promote replica"],
            "context_tags": ["database"],
            "parameters": [
                {"name": "hostname", "type": "string", "required": true},
                {"name": "force", "type": "boolean", "required": false}
            ],
            "api": {"url": "/db/failover", "method": "POST"}
        }
    ]
}"#;

pub fn catalog(toml: &str) -> Catalog {
    Catalog::from_toml_str(toml).expect("fixture catalog must compile")
}

/// Resolve against the built-in catalog.
pub fn resolve(text: &str) -> Resolution {
    IntentResolver::builtin().resolve(text)
}

/// Resolve against the built-in catalog, panicking if nothing matched.
pub fn resolve_intent(text: &str) -> Intent {
    match resolve(text) {
        Resolution::Resolved { intent } => intent,
        Resolution::Unresolved { error, .. } => panic!("expected '{text}' to resolve: {error}"),
    }
}

/// Write `contents` to a uniquely named file in the temp dir.
pub fn temp_file(extension: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("ii-e2e-{}.{extension}", uuid::Uuid::now_v7()));
    std::fs::write(&path, contents).expect("write temp fixture");
    path
}
