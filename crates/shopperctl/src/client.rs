//! HTTP client for talking to a running shopperd.

use anyhow::{Context, Result};
use reqwest::StatusCode;
use shopper_common::{ErrorResponse, PredictionResult, PredictionTrace, SessionFeatures};
use std::time::Duration;
use thiserror::Error;

/// What the daemon answered: a result, or a typed rejection.
#[derive(Debug)]
pub enum Answer<T> {
    Ok(T),
    Rejected(ErrorResponse),
}

impl<T> Answer<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Answer<U> {
        match self {
            Answer::Ok(value) => Answer::Ok(f(value)),
            Answer::Rejected(err) => Answer::Rejected(err),
        }
    }
}

/// A request that got no usable answer.
#[derive(Debug, Error)]
pub enum ClientError {
    /// No HTTP exchange completed.
    #[error("Cannot reach shopperd at {url}: {source}")]
    Unreachable {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Something answered, but not with a shopperd response.
    #[error("Unexpected response from {url} ({status}): {detail}")]
    InvalidResponse {
        url: String,
        status: StatusCode,
        detail: String,
    },
}

pub struct ShopperdClient {
    base_url: String,
    http: reqwest::Client,
}

impl ShopperdClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn predict(
        &self,
        features: &SessionFeatures,
    ) -> Result<Answer<PredictionResult>, ClientError> {
        self.post("/v1/predict", features).await
    }

    pub async fn explain(
        &self,
        features: &SessionFeatures,
    ) -> Result<Answer<PredictionTrace>, ClientError> {
        self.post("/v1/explain", features).await
    }

    async fn post<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        features: &SessionFeatures,
    ) -> Result<Answer<T>, ClientError> {
        let url = self.endpoint(path);
        let cannot_reach = |source| ClientError::Unreachable {
            url: self.base_url.clone(),
            source,
        };

        let response = self
            .http
            .post(&url)
            .json(features)
            .send()
            .await
            .map_err(cannot_reach)?;
        let status = response.status();
        let body = response.bytes().await.map_err(cannot_reach)?;

        let invalid = |detail: String| ClientError::InvalidResponse {
            url: url.clone(),
            status,
            detail,
        };

        if status.is_success() {
            return serde_json::from_slice::<T>(&body)
                .map(Answer::Ok)
                .map_err(|e| invalid(e.to_string()));
        }

        serde_json::from_slice::<ErrorResponse>(&body)
            .map(Answer::Rejected)
            .map_err(|_| invalid(String::from_utf8_lossy(&body).trim().to_string()))
    }
}
