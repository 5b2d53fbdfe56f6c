//! Outcome counts from the final ledger snapshot.
use crate::messages;
use crate::records::{EnrichmentRecord, EnrichmentStatus};
use serde::{Deserialize, Serialize};

/// One component listed under a status group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentOutcome {
    pub type_name: String,
    pub component_name: String,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusGroup {
    pub count: usize,
    pub components: Vec<ComponentOutcome>,
}

impl StatusGroup {
    fn push(&mut self, record: &EnrichmentRecord) {
        self.count += 1;
        self.components.push(ComponentOutcome {
            type_name: record.component_type.name.clone(),
            component_name: record.component_name.clone(),
            message: record.message.clone(),
        });
    }
}

/// Grouped counts over every record of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichmentMetrics {
    pub total: usize,
    pub success: StatusGroup,
    pub skipped: StatusGroup,
    pub fail: StatusGroup,
    pub not_processed: StatusGroup,
}

impl EnrichmentMetrics {
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a EnrichmentRecord>,
    {
        let mut metrics = Self::default();
        for record in records {
            metrics.total += 1;
            let group = match record.status {
                EnrichmentStatus::Success => &mut metrics.success,
                EnrichmentStatus::Skipped => &mut metrics.skipped,
                EnrichmentStatus::Fail => &mut metrics.fail,
                EnrichmentStatus::NotProcessed => &mut metrics.not_processed,
            };
            group.push(record);
        }
        metrics
    }
}

/// Emit a human-readable summary one line at a time.
pub fn log_metrics<F>(mut log: F, metrics: &EnrichmentMetrics)
where
    F: FnMut(&str),
{
    log(&format!("{}: {}", messages::METRICS_TOTAL, metrics.total));
    let mut sections = vec![
        (messages::METRICS_SUCCESS, &metrics.success),
        (messages::METRICS_SKIPPED, &metrics.skipped),
        (messages::METRICS_FAIL, &metrics.fail),
    ];
    if metrics.not_processed.count > 0 {
        sections.push((messages::METRICS_NOT_PROCESSED, &metrics.not_processed));
    }
    for (label, group) in sections {
        log("");
        log(&format!("{label}: {}", group.count));
        for component in &group.components {
            log(&format!(
                "  - {}:{}",
                component.type_name, component.component_name
            ));
            if let Some(message) = component.message.as_deref().filter(|m| !m.is_empty()) {
                log(&format!("    {message}"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{log_metrics, EnrichmentMetrics};
    use crate::component::ComponentType;
    use crate::records::{EnrichmentRecord, EnrichmentStatus};

    fn record(
        type_name: &str,
        name: &str,
        status: EnrichmentStatus,
        message: Option<&str>,
    ) -> EnrichmentRecord {
        let mut record = EnrichmentRecord::placeholder(name, ComponentType::new(type_name), status);
        record.message = message.map(str::to_string);
        record
    }

    fn logged(metrics: &EnrichmentMetrics) -> Vec<String> {
        let mut lines = Vec::new();
        log_metrics(|line| lines.push(line.to_string()), metrics);
        lines
    }

    #[test]
    fn groups_records_by_status() {
        let records = vec![
            record("LightningComponentBundle", "MyCmp", EnrichmentStatus::Success, None),
            record("ApexClass", "MyClass", EnrichmentStatus::Skipped, Some("Only LWC")),
            record("LightningComponentBundle", "Bad", EnrichmentStatus::Fail, Some("boom")),
            record("LightningComponentBundle", "Bad2", EnrichmentStatus::Fail, Some("boom")),
        ];
        let metrics = EnrichmentMetrics::from_records(&records);
        assert_eq!(metrics.total, 4);
        assert_eq!(metrics.success.count, 1);
        assert_eq!(metrics.skipped.count, 1);
        assert_eq!(metrics.fail.count, 2);
        assert_eq!(metrics.not_processed.count, 0);
        assert_eq!(metrics.skipped.components[0].message.as_deref(), Some("Only LWC"));
    }

    #[test]
    fn empty_metrics_still_log_every_section() {
        let lines = logged(&EnrichmentMetrics::default());
        assert_eq!(lines[0], "Total components: 0");
        assert!(lines.iter().any(|line| line == "Enriched: 0"));
        assert!(lines.iter().any(|line| line == "Skipped: 0"));
        assert!(lines.iter().any(|line| line == "Failed: 0"));
        assert!(!lines.iter().any(|line| line.starts_with("Not processed")));
    }

    #[test]
    fn component_bullets_carry_type_and_message() {
        let records = vec![
            record("LightningComponentBundle", "MyCmp", EnrichmentStatus::Success, None),
            record("ApexClass", "MyClass", EnrichmentStatus::Skipped, Some("Only LWC supported")),
        ];
        let lines = logged(&EnrichmentMetrics::from_records(&records));
        assert!(lines.contains(&"  - LightningComponentBundle:MyCmp".to_string()));
        assert!(lines.contains(&"  - ApexClass:MyClass".to_string()));
        assert!(lines.contains(&"    Only LWC supported".to_string()));
    }

    #[test]
    fn json_shape_uses_camel_case_groups() {
        let records = vec![record("ApexClass", "MyClass", EnrichmentStatus::Skipped, Some("x"))];
        let value = serde_json::to_value(EnrichmentMetrics::from_records(&records))
            .expect("serialize metrics");
        assert_eq!(value["total"], 1);
        assert_eq!(value["skipped"]["count"], 1);
        assert_eq!(value["skipped"]["components"][0]["componentName"], "MyClass");
        assert_eq!(value["notProcessed"]["count"], 0);
    }
}
