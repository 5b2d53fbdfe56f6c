//! HTTP enrichment backend against an org instance.
use super::{enrich_each, Enricher};
use crate::component::Component;
use crate::config::{non_empty_env, EnrichConfig, ENV_ACCESS_TOKEN, ENV_INSTANCE_URL};
use crate::records::{EnrichmentRecord, EnrichmentRequestBody, EnrichmentResponse};
use anyhow::{anyhow, Context, Result};
use std::time::Duration;

/// Org instance URL plus the bearer token used to call it.
#[derive(Clone)]
pub struct Connection {
    instance_url: String,
    access_token: String,
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("instance_url", &self.instance_url)
            .finish_non_exhaustive()
    }
}

impl Connection {
    pub fn new(instance_url: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            instance_url: instance_url.into().trim_end_matches('/').to_string(),
            access_token: access_token.into(),
        }
    }

    /// Resolve the connection from config and environment. Missing pieces
    /// are fatal: nothing can be enriched without a connection.
    pub fn from_config(config: &EnrichConfig) -> Result<Self> {
        let instance_url = config
            .instance_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .ok_or_else(|| {
                anyhow!("no org instance URL; set instance_url in config or {ENV_INSTANCE_URL}")
            })?;
        check_scheme(instance_url)?;
        let access_token = non_empty_env(ENV_ACCESS_TOKEN)
            .ok_or_else(|| anyhow!("no access token; set {ENV_ACCESS_TOKEN}"))?;
        Ok(Self::new(instance_url, access_token))
    }

    pub fn instance_url(&self) -> &str {
        &self.instance_url
    }
}

const LOOPBACK_HOSTS: [&str; 3] = ["localhost", "127.0.0.1", "[::1]"];

/// The bearer token only travels over TLS; plain HTTP is allowed for
/// loopback hosts.
pub(super) fn check_scheme(instance_url: &str) -> Result<()> {
    if instance_url.starts_with("https://") {
        return Ok(());
    }
    let Some(rest) = instance_url.strip_prefix("http://") else {
        return Err(anyhow!("instance URL must start with https:// (got {instance_url:?})"));
    };
    let authority = rest.split('/').next().unwrap_or_default();
    let host = match authority.strip_prefix('[') {
        Some(_) => authority.split(']').next().map(|host| format!("{host}]")),
        None => authority.split(':').next().map(str::to_string),
    }
    .unwrap_or_default();
    if LOOPBACK_HOSTS.contains(&host.as_str()) {
        tracing::warn!(url = instance_url, "using plain HTTP against a loopback instance");
        return Ok(());
    }
    Err(anyhow!(
        "instance URL must use https:// to carry the access token (got {instance_url:?})"
    ))
}

/// Posts one request per component to the org's enrichment endpoint.
pub struct HttpEnricher {
    connection: Connection,
    endpoint: String,
    max_tokens: u32,
    agent: ureq::Agent,
}

impl HttpEnricher {
    pub fn new(connection: Connection, config: &EnrichConfig) -> Self {
        let endpoint = format!("{}{}", connection.instance_url(), config.enrichment_path);
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(config.timeout_secs)))
            .build()
            .into();
        Self {
            connection,
            endpoint,
            max_tokens: config.max_tokens,
            agent,
        }
    }

    fn post(&self, request: &EnrichmentRequestBody) -> Result<EnrichmentResponse> {
        let mut response = self
            .agent
            .post(&self.endpoint)
            .header(
                "Authorization",
                format!("Bearer {}", self.connection.access_token),
            )
            .send_json(request)
            .with_context(|| format!("POST {}", self.endpoint))?;
        let body: EnrichmentResponse = response
            .body_mut()
            .read_json()
            .context("parse enrichment response JSON")?;
        Ok(body)
    }
}

impl Enricher for HttpEnricher {
    fn name(&self) -> &'static str {
        "http"
    }

    fn enrich(&self, components: &[Component]) -> Result<Vec<EnrichmentRecord>> {
        tracing::debug!(endpoint = %self.endpoint, "enriching over HTTP");
        Ok(enrich_each(components, self.max_tokens, |_, request| {
            self.post(request)
        }))
    }
}
