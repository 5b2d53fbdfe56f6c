//! Local command enrichment backend.
//!
//! The command receives one request as JSON on stdin and must print the
//! response JSON on stdout. Any tool that speaks this protocol works, which
//! keeps offline runs and tests independent of an org.
use super::{enrich_each, Enricher};
use crate::component::Component;
use crate::records::{EnrichmentRecord, EnrichmentRequestBody, EnrichmentResponse};
use crate::util::truncate_string;
use anyhow::{anyhow, Context, Result};
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::time::Instant;

const STDERR_EXCERPT_BYTES: usize = 400;

/// Enricher that shells out to a user-configured command.
#[derive(Debug)]
pub struct CommandEnricher {
    program: PathBuf,
    args: Vec<String>,
    max_tokens: u32,
}

impl CommandEnricher {
    /// Parse `command` with shell quoting rules and resolve its program.
    pub fn new(command: &str, max_tokens: u32) -> Result<Self> {
        let mut argv = shell_words::split(command)
            .with_context(|| format!("parse enricher command: {command}"))?;
        if argv.is_empty() {
            return Err(anyhow!("enricher command is empty"));
        }
        let program = argv.remove(0);
        let resolved = which::which(&program)
            .with_context(|| format!("enricher command {program:?} not found"))?;
        Ok(Self {
            program: resolved,
            args: argv,
            max_tokens,
        })
    }

    fn invoke(
        &self,
        component_name: &str,
        request: &EnrichmentRequestBody,
    ) -> Result<EnrichmentResponse> {
        let payload = serde_json::to_vec(request).context("serialize enrichment request")?;
        let start = Instant::now();
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .with_context(|| format!("spawn {}", self.program.display()))?;
        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(&payload)
                .context("write request to enricher stdin")?;
        }
        let output = child.wait_with_output().context("wait for enricher")?;
        tracing::debug!(
            component = component_name,
            elapsed_ms = start.elapsed().as_millis() as u64,
            response_bytes = output.stdout.len(),
            "enricher command finished"
        );

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(anyhow!(
                "enricher exited with {}: {}",
                output.status,
                truncate_string(stderr.trim(), STDERR_EXCERPT_BYTES)
            ));
        }
        parse_response(&output.stdout)
    }
}

impl Enricher for CommandEnricher {
    fn name(&self) -> &'static str {
        "command"
    }

    fn enrich(&self, components: &[Component]) -> Result<Vec<EnrichmentRecord>> {
        Ok(enrich_each(components, self.max_tokens, |name, request| {
            self.invoke(name, request)
        }))
    }
}

/// Parse a response, tolerating surrounding whitespace and code fences.
pub(crate) fn parse_response(stdout: &[u8]) -> Result<EnrichmentResponse> {
    let text = String::from_utf8_lossy(stdout);
    let cleaned = strip_code_fences(&text);
    if cleaned.is_empty() {
        return Err(anyhow!("enricher produced no output"));
    }
    let response: EnrichmentResponse =
        serde_json::from_str(&cleaned).context("parse enricher response JSON")?;
    if response.description.trim().is_empty() {
        return Err(anyhow!("enricher returned an empty description"));
    }
    Ok(response)
}

fn strip_code_fences(raw: &str) -> String {
    let trimmed = raw.trim();
    if !trimmed.starts_with("```") {
        return trimmed.to_string();
    }
    let mut lines: Vec<&str> = trimmed.lines().collect();
    if lines
        .first()
        .is_some_and(|first| first.trim_start().starts_with("```"))
    {
        lines.remove(0);
    }
    if lines
        .last()
        .is_some_and(|last| last.trim_start().starts_with("```"))
    {
        lines.pop();
    }
    lines.join("\n").trim().to_string()
}
