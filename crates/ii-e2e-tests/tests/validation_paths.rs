//! E2E tests for resolve → validate: structural success with business-rule
//! warnings.

mod helpers;

use ii_engine::validate;
use ii_engine::validate::CLEANUP_TYPES;

use helpers::resolve_intent;

/// A restart without a service name still resolves but fails validation.
#[test]
fn e2e_missing_service_name_is_reported() {
    let intent = resolve_intent("restart service on web-01");
    assert_eq!(intent.intent_id, "restart_service");
    assert!(!intent.parameters.contains("service_name"));

    let report = validate(&intent);
    assert!(!report.valid);
    assert!(
        report
            .errors
            .iter()
            .any(|e| e == "Service name is required")
    );
}

/// An out-of-range cleanup type is reported with every allowed value.
#[test]
fn e2e_invalid_cleanup_type() {
    let mut intent = resolve_intent("clean disks on storage-01 all");
    assert!(validate(&intent).valid);

    intent.parameters.insert("cleanup_type", "banana");
    let report = validate(&intent);
    assert!(!report.valid);
    assert_eq!(report.errors.len(), 1);
    for allowed in CLEANUP_TYPES {
        assert!(report.errors[0].contains(allowed), "{}", report.errors[0]);
    }
}

/// Host-targeted intents without a host get the hostname warning.
#[test]
fn e2e_missing_hostname_is_reported() {
    let intent = resolve_intent("restart kafka");
    assert_eq!(intent.intent_id, "restart_kafka_node");

    let report = validate(&intent);
    assert!(!report.valid);
    assert_eq!(
        report.errors,
        vec!["Hostname is required for infrastructure operations"]
    );
}

/// Fully specified commands validate cleanly.
#[test]
fn e2e_complete_commands_are_valid() {
    for text in [
        "restart kafka node on server-01",
        "restart service nginx on web-01",
        "bounce service api-gateway on server-02 in cluster production",
        "clear disk space on host-03 temp_files",
        "restart storage node on storage-01",
    ] {
        let report = validate(&resolve_intent(text));
        assert!(report.valid, "{text}: {:?}", report.errors);
    }
}
