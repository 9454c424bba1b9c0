//! Liveness probe client.
//!
//! Used by the `healthcheck` binary (container `HEALTHCHECK`) to ask a
//! running instance whether it is alive.

use reqwest::StatusCode;
use thiserror::Error;

use crate::health::HealthStatus;

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("unexpected status {0}")]
    Status(StatusCode),

    #[error("service reported status '{0}'")]
    Unhealthy(String),
}

/// URL of the health endpoint under `base_url`.
pub fn health_url(base_url: &str) -> String {
    format!("{}/health", base_url.trim_end_matches('/'))
}

/// Probe `{base_url}/health`. Succeeds only on a 2xx with `status == "ok"`.
pub async fn probe(client: &reqwest::Client, base_url: &str) -> Result<HealthStatus, ProbeError> {
    let response = client.get(health_url(base_url)).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(ProbeError::Status(status));
    }

    let report: HealthStatus = response.json().await?;
    if !report.is_ok() {
        return Err(ProbeError::Unhealthy(report.status));
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_url() {
        assert_eq!(health_url("http://127.0.0.1:8000"), "http://127.0.0.1:8000/health");
        assert_eq!(health_url("http://api.local/"), "http://api.local/health");
    }
}
