//! Proxy adapters for the cloud provider pricing APIs.
//!
//! Each adapter translates a normalized filter request into the provider's
//! native query format and reshapes the response. All outbound calls share
//! one client carrying an explicit request timeout; a provider returning
//! zero matches is `UpstreamNoData`, transport and decode failures are
//! `Upstream` with the detail kept in the server-side log.

pub mod aws;
pub mod azure;
pub mod gcp;

use std::time::Duration;

use crate::errors::ServiceError;

#[derive(Clone)]
pub struct PricingClient {
    pub http: reqwest::Client,
    pub gcp_api_key: Option<String>,
}

impl PricingClient {
    pub fn new(cfg: &configs::PricingConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.request_timeout_secs))
            .build()?;
        Ok(Self { http, gcp_api_key: cfg.gcp_api_key.clone() })
    }
}

pub(crate) fn upstream_err(provider: &str, e: impl std::fmt::Display) -> ServiceError {
    tracing::error!(provider, error = %e, "pricing upstream call failed");
    ServiceError::Upstream(format!("{} pricing request failed", provider))
}
