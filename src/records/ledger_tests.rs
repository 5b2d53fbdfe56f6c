use super::EnrichmentLedger;
use crate::component::{Component, ComponentType, SkipMarker};
use crate::records::{
    ContentBundle, EnrichmentRecord, EnrichmentRequestBody, EnrichmentResponse, EnrichmentStatus,
    PLACEHOLDER_MAX_TOKENS, PLACEHOLDER_METADATA_TYPE,
};
use std::collections::{BTreeMap, BTreeSet};

fn lwc(name: &str) -> Component {
    Component::new("LightningComponentBundle", name).with_xml(format!("{name}.js-meta.xml"))
}

fn skips(markers: &[(&str, &str)]) -> BTreeSet<SkipMarker> {
    markers
        .iter()
        .map(|(type_name, name)| SkipMarker::new(*type_name, *name))
        .collect()
}

fn real_request(name: &str) -> EnrichmentRequestBody {
    let mut files = BTreeMap::new();
    files.insert(format!("{name}.js"), "export default class {}".to_string());
    EnrichmentRequestBody {
        content_bundles: vec![ContentBundle {
            resource_name: name.to_string(),
            files,
        }],
        metadata_type: "LightningComponentBundle".to_string(),
        max_tokens: 120,
    }
}

fn result(name: &str, description: Option<&str>, message: Option<&str>) -> EnrichmentRecord {
    EnrichmentRecord {
        component_name: name.to_string(),
        component_type: ComponentType::new("LightningComponentBundle"),
        request_body: real_request(name),
        response: description.map(|text| EnrichmentResponse {
            description: text.to_string(),
            description_source: None,
        }),
        message: message.map(str::to_string),
        status: EnrichmentStatus::NotProcessed,
    }
}

#[test]
fn from_components_seeds_not_processed_records_with_placeholder_request() {
    let ledger =
        EnrichmentLedger::from_components(&[lwc("MyCmp"), Component::new("ApexClass", "MyClass")]);

    assert_eq!(ledger.len(), 2);
    let record = ledger.get("MyCmp").expect("record for MyCmp");
    assert_eq!(record.status, EnrichmentStatus::NotProcessed);
    assert_eq!(record.component_type.name, "LightningComponentBundle");
    assert!(record.request_body.content_bundles.is_empty());
    assert_eq!(record.request_body.metadata_type, PLACEHOLDER_METADATA_TYPE);
    assert_eq!(record.request_body.max_tokens, PLACEHOLDER_MAX_TOKENS);
    assert!(record.response.is_none());
    assert!(record.message.is_none());
}

#[test]
fn from_components_excludes_components_without_name_or_type() {
    let nameless = Component {
        component_type: Some(ComponentType::new("ApexClass")),
        ..Component::default()
    };
    let typeless = Component {
        name: Some("Orphan".to_string()),
        ..Component::default()
    };
    let ledger = EnrichmentLedger::from_components(&[nameless, typeless]);
    assert!(ledger.is_empty());
}

#[test]
fn add_skipped_inserts_reduced_skipped_records() {
    let mut ledger = EnrichmentLedger::default();
    ledger.add_skipped(&skips(&[("LightningComponentBundle", "MissingCmp")]));

    let record = ledger.get("MissingCmp").expect("skipped record");
    assert_eq!(record.status, EnrichmentStatus::Skipped);
    assert_eq!(record.component_type, ComponentType::new("LightningComponentBundle"));
    assert_eq!(record.request_body, EnrichmentRequestBody::placeholder());
}

#[test]
fn add_skipped_never_duplicates_existing_records() {
    let mut ledger = EnrichmentLedger::from_components(&[lwc("MyCmp")]);
    let markers = skips(&[("LightningComponentBundle", "MyCmp"), ("ApexClass", "")]);
    ledger.add_skipped(&markers);
    ledger.add_skipped(&markers);

    assert_eq!(ledger.len(), 1);
    assert_eq!(
        ledger.get("MyCmp").expect("record").status,
        EnrichmentStatus::NotProcessed
    );
}

#[test]
fn mark_status_flips_only_named_records() {
    let mut ledger =
        EnrichmentLedger::from_components(&[lwc("Keep"), Component::new("ApexClass", "MyClass")]);
    ledger.mark_status(&skips(&[("ApexClass", "MyClass")]), EnrichmentStatus::Skipped);

    assert_eq!(ledger.get("MyClass").expect("record").status, EnrichmentStatus::Skipped);
    assert_eq!(ledger.get("Keep").expect("record").status, EnrichmentStatus::NotProcessed);
}

#[test]
fn merge_replaces_request_and_marks_success_when_response_present() {
    let mut ledger = EnrichmentLedger::from_components(&[lwc("MyCmp")]);
    ledger.merge_results(vec![result("MyCmp", Some("A card"), None)]);

    let record = ledger.get("MyCmp").expect("record");
    assert_eq!(record.status, EnrichmentStatus::Success);
    assert_eq!(record.request_body, real_request("MyCmp"));
    assert_eq!(
        record.response.as_ref().map(|response| response.description.as_str()),
        Some("A card")
    );
}

#[test]
fn merge_marks_fail_when_response_missing() {
    let mut ledger = EnrichmentLedger::from_components(&[lwc("MyCmp")]);
    ledger.merge_results(vec![result("MyCmp", None, Some("service unavailable"))]);

    let record = ledger.get("MyCmp").expect("record");
    assert_eq!(record.status, EnrichmentStatus::Fail);
    assert_eq!(record.message.as_deref(), Some("service unavailable"));
}

#[test]
fn merge_never_changes_skipped_status() {
    let mut ledger = EnrichmentLedger::from_components(&[Component::new("ApexClass", "MyClass")]);
    let markers = skips(&[("ApexClass", "MyClass")]);
    ledger.mark_status(&markers, EnrichmentStatus::Skipped);

    ledger.merge_results(vec![result("MyClass", Some("should not count"), Some("late"))]);
    let record = ledger.get("MyClass").expect("record");
    assert_eq!(record.status, EnrichmentStatus::Skipped);
    assert!(record.response.is_some());
    assert_eq!(record.message.as_deref(), Some("late"));

    ledger.merge_results(vec![result("MyClass", None, None)]);
    assert_eq!(ledger.get("MyClass").expect("record").status, EnrichmentStatus::Skipped);
}

#[test]
fn merge_is_not_monotonic_for_processed_records() {
    let mut ledger = EnrichmentLedger::from_components(&[lwc("MyCmp")]);
    ledger.merge_results(vec![result("MyCmp", Some("A card"), None)]);
    assert_eq!(ledger.get("MyCmp").expect("record").status, EnrichmentStatus::Success);

    ledger.merge_results(vec![result("MyCmp", None, Some("write failed"))]);
    let record = ledger.get("MyCmp").expect("record");
    assert_eq!(record.status, EnrichmentStatus::Fail);
    assert!(record.response.is_none());
}

#[test]
fn merge_leaves_unmentioned_records_and_ignores_unknown_results() {
    let mut ledger = EnrichmentLedger::from_components(&[lwc("First"), lwc("Second")]);
    ledger.merge_results(vec![
        result("First", Some("one"), None),
        result("Stranger", Some("ignored"), None),
    ]);

    assert_eq!(ledger.len(), 2);
    assert!(ledger.get("Stranger").is_none());
    let untouched = ledger.get("Second").expect("record");
    assert_eq!(untouched.status, EnrichmentStatus::NotProcessed);
    assert_eq!(untouched.request_body, EnrichmentRequestBody::placeholder());
}

#[test]
fn snapshot_lists_every_record_once() {
    let mut ledger = EnrichmentLedger::from_components(&[lwc("B"), lwc("A")]);
    ledger.add_skipped(&skips(&[("ApexClass", "C")]));
    let names: Vec<&str> = ledger
        .snapshot()
        .iter()
        .map(|record| record.component_name.as_str())
        .collect();
    assert_eq!(names, vec!["A", "B", "C"]);
}
