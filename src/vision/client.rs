//! HTTP adapter for the external vision-classification endpoint.
//!
//! The endpoint accepts a base64/data-URL image and answers with a label,
//! seal flag and confidence. Everything that goes wrong on the wire
//! (unreachable host, non-success status, undecodable body) collapses into
//! [`VisionError::ServiceUnavailable`]; policy for what to do about it lives
//! with the caller (fallback on explicit capture, silence in live mode).

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::verdict::{SealStatus, VisionVerdict};
use super::PackageAnalyzer;

const REQUEST_TIMEOUT_SECS: u64 = 15;

#[derive(Debug, Error)]
pub enum VisionError {
    #[error("vision service unavailable: {0}")]
    ServiceUnavailable(String),
}

#[derive(Serialize)]
struct PredictRequest<'a> {
    image: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PredictResponse {
    #[serde(default)]
    package_detected: bool,
    #[serde(default)]
    is_sealed: bool,
    status: Option<String>,
    confidence: Option<String>,
}

pub struct VisionClient {
    http_client: reqwest::Client,
    endpoint: String,
}

impl VisionClient {
    pub fn new(endpoint: impl Into<String>) -> Result<Self, VisionError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|err| VisionError::ServiceUnavailable(err.to_string()))?;

        Ok(Self {
            http_client,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl PackageAnalyzer for VisionClient {
    async fn analyze(&self, image: &str) -> Result<VisionVerdict, VisionError> {
        let response = self
            .http_client
            .post(&self.endpoint)
            .json(&PredictRequest { image })
            .send()
            .await
            .map_err(|err| VisionError::ServiceUnavailable(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(VisionError::ServiceUnavailable(format!(
                "endpoint returned {status}"
            )));
        }

        let body: PredictResponse = response
            .json()
            .await
            .map_err(|err| VisionError::ServiceUnavailable(format!("invalid response: {err}")))?;

        let status = SealStatus::from_label(body.status.as_deref());
        Ok(VisionVerdict::new(
            body.package_detected,
            body.is_sealed,
            status,
            body.confidence.unwrap_or_else(|| "0.0%".to_string()),
        ))
    }
}
