//! Post-resolution business rules. Findings are warnings, never failures.

use ii_protocol::{Intent, ValidationReport};

/// Intents that act on a specific host.
const HOST_REQUIRED_INTENTS: [&str; 4] = [
    "restart_kafka_node",
    "restart_storage_node",
    "clean_disks",
    "restart_service",
];

pub const CLEANUP_TYPES: [&str; 4] = ["temp_files", "log_files", "cache", "all"];

/// Check a resolved intent's parameters. Every applicable rule reports.
pub fn validate(intent: &Intent) -> ValidationReport {
    let params = &intent.parameters;
    let id = intent.intent_id.as_str();
    let mut errors = Vec::new();

    if HOST_REQUIRED_INTENTS.contains(&id) && !params.contains("hostname") {
        errors.push("Hostname is required for infrastructure operations".to_string());
    }

    if id == "restart_service" && !params.contains("service_name") {
        errors.push("Service name is required".to_string());
    }

    if id == "clean_disks"
        && let Some(cleanup_type) = params.get("cleanup_type")
        && !cleanup_type
            .as_str()
            .is_some_and(|t| CLEANUP_TYPES.contains(&t))
    {
        errors.push(format!(
            "Invalid cleanup type. Must be one of: {}",
            CLEANUP_TYPES.join(", ")
        ));
    }

    ValidationReport::from_errors(errors)
}
