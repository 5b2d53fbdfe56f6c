//! The enrich workflow: setup, enrichment, and file update phases.
//!
//! Each phase runs to completion before the next, and the ledger is only
//! touched between phases with settled results.
use crate::cli::EnrichArgs;
use crate::component::eligibility::eligible_components;
use crate::component::{compute_skips, discover_components};
use crate::config;
use crate::enrichment::{enricher_from_config, Enricher};
use crate::files::update_metadata_files;
use crate::metrics::{log_metrics, EnrichmentMetrics};
use crate::project::Project;
use crate::records::{annotate_skip_reasons, EnrichmentLedger, EnrichmentRecord, EnrichmentStatus};
use crate::util::now_epoch_ms;
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Current schema version for the run report.
pub const REPORT_SCHEMA_VERSION: u32 = 1;

/// Final state of a run.
#[derive(Debug)]
pub struct EnrichRun {
    pub ledger: EnrichmentLedger,
    pub metrics: EnrichmentMetrics,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EnrichReport<'a> {
    schema_version: u32,
    generated_at_epoch_ms: u128,
    project_root: String,
    requested_entries: &'a [String],
    metrics: &'a EnrichmentMetrics,
    records: Vec<&'a EnrichmentRecord>,
}

pub fn run_enrich(args: EnrichArgs) -> Result<()> {
    let project = Project::resolve(args.project_dir.as_deref())?;
    let mut config = config::load_config(args.config.as_deref(), project.root())?;
    config::apply_env_overrides(&mut config);
    if let Some(command) = args.enricher.as_deref() {
        config.enricher_command = Some(command.to_string());
    }
    config::validate_config(&config)?;

    let run = execute(&project, &args.metadata, || enricher_from_config(&config))?;

    if let Some(path) = args.report.as_deref() {
        write_report(path, &project, &args.metadata, &run)?;
        tracing::info!(path = %path.display(), "wrote run report");
    }
    if args.json {
        let text =
            serde_json::to_string_pretty(&run.metrics).context("serialize enrichment metrics")?;
        println!("{text}");
    } else {
        log_metrics(|line| println!("{line}"), &run.metrics);
    }
    Ok(())
}

/// Run every phase against a project.
///
/// `connect` is only invoked when at least one component is eligible, so a
/// run where everything is skipped never needs a backend.
pub fn execute<F>(project: &Project, requested_entries: &[String], connect: F) -> Result<EnrichRun>
where
    F: FnOnce() -> Result<Box<dyn Enricher>>,
{
    tracing::info!(entries = requested_entries.len(), "setting up");
    let discovered = discover_components(project, requested_entries)?;
    let mut ledger = EnrichmentLedger::from_components(&discovered);
    let skips = compute_skips(&discovered, requested_entries, Some(project.root()));
    ledger.add_skipped(&skips);
    ledger.mark_status(&skips, EnrichmentStatus::Skipped);
    annotate_skip_reasons(&skips, &discovered, &mut ledger);
    let eligible = eligible_components(&discovered, &skips);
    if ledger.is_empty() {
        tracing::warn!("no components matched the requested entries");
    }
    tracing::info!(
        records = ledger.len(),
        discovered = discovered.len(),
        skipped = skips.len(),
        eligible = eligible.len(),
        "setup complete"
    );

    if !eligible.is_empty() {
        let enricher = connect()?;
        tracing::info!(
            backend = enricher.name(),
            components = eligible.len(),
            "executing enrichment"
        );
        let results = enricher.enrich(&eligible)?;
        ledger.merge_results(results);

        tracing::info!("updating metadata files");
        let file_results = update_metadata_files(&eligible, &ledger.snapshot());
        ledger.merge_results(file_results);
    }

    let metrics = EnrichmentMetrics::from_records(ledger.snapshot());
    if metrics.not_processed.count > 0 {
        tracing::warn!(
            count = metrics.not_processed.count,
            "components finished without an outcome"
        );
    }
    Ok(EnrichRun { ledger, metrics })
}

fn write_report(
    path: &Path,
    project: &Project,
    requested_entries: &[String],
    run: &EnrichRun,
) -> Result<()> {
    let report = EnrichReport {
        schema_version: REPORT_SCHEMA_VERSION,
        generated_at_epoch_ms: now_epoch_ms()?,
        project_root: project.root().display().to_string(),
        requested_entries,
        metrics: &run.metrics,
        records: run.ledger.snapshot(),
    };
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    let text = serde_json::to_string_pretty(&report).context("serialize run report")?;
    fs::write(path, text.as_bytes()).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "workflow_tests.rs"]
mod tests;
