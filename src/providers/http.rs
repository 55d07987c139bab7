//! Blocking JSON client shared by all HTTP providers
//!
//! Wraps `reqwest::blocking` with a request timeout, retry with exponential
//! backoff for transient failures, and error wrapping into [`TransportError`].
//! Endpoints are logged and reported without their query string so API keys
//! never reach logs or error messages.

use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use rand::RngExt;
use reqwest::StatusCode;
use reqwest::blocking::{Client, Response};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::config::HttpConfig;

const MAX_ERROR_BODY_CHARS: usize = 200;

/// Failure of a single provider call
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransportError {
    #[error("Request to {endpoint} timed out")]
    Timeout { endpoint: String },

    #[error("Network error calling {endpoint}: {message}")]
    Network { endpoint: String, message: String },

    #[error("HTTP {status} error from {endpoint}: {body}")]
    Status {
        endpoint: String,
        status: u16,
        body: String,
    },

    #[error("Invalid response from {endpoint}: {message}")]
    InvalidBody { endpoint: String, message: String },

    #[error("No data from {endpoint}: {message}")]
    NoData { endpoint: String, message: String },
}

impl TransportError {
    pub fn invalid_body<E: Into<String>, M: Into<String>>(endpoint: E, message: M) -> Self {
        Self::InvalidBody {
            endpoint: endpoint.into(),
            message: message.into(),
        }
    }

    pub fn no_data<E: Into<String>, M: Into<String>>(endpoint: E, message: M) -> Self {
        Self::NoData {
            endpoint: endpoint.into(),
            message: message.into(),
        }
    }

    fn from_reqwest(endpoint: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout {
                endpoint: endpoint.to_string(),
            }
        } else {
            Self::Network {
                endpoint: endpoint.to_string(),
                message: err.without_url().to_string(),
            }
        }
    }

    /// Whether a later attempt could plausibly succeed
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Timeout { .. } | Self::Network { .. } => true,
            Self::Status { status, .. } => {
                StatusCode::from_u16(*status).is_ok_and(is_retryable_status)
            }
            Self::InvalidBody { .. } | Self::NoData { .. } => false,
        }
    }
}

fn is_retryable_status(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}

/// Join a base URL and a path with exactly one slash between them
#[must_use]
pub fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// HTTP client with timeout and retry settings
#[derive(Debug, Clone)]
pub struct JsonClient {
    client: Client,
    max_retries: u32,
    retry_base_delay: Duration,
}

impl JsonClient {
    /// Create a new client from the `[http]` configuration section
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent(config.user_agent.clone())
            .build()
            .with_context(|| "Failed to create HTTP client")?;

        Ok(Self {
            client,
            max_retries: config.max_retries,
            retry_base_delay: Duration::from_millis(config.retry_base_delay_ms),
        })
    }

    /// GET `endpoint` with `query` parameters and decode the JSON body
    #[instrument(skip(self, query), level = "debug")]
    pub fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> Result<T, TransportError> {
        let response = self.send_with_retry(endpoint, query)?;

        let body = response
            .text()
            .map_err(|e| TransportError::from_reqwest(endpoint, e))?;

        serde_json::from_str(&body)
            .map_err(|e| TransportError::invalid_body(endpoint, format!("invalid JSON: {e}")))
    }

    fn send_with_retry(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> Result<Response, TransportError> {
        let request_start = Instant::now();
        let max_attempts = self.max_retries + 1;
        let mut attempt = 0;

        loop {
            debug!(
                "Making HTTP request to {} (attempt {}/{})",
                endpoint,
                attempt + 1,
                max_attempts
            );

            let (error, retry_after) = match self.client.get(endpoint).query(query).send() {
                Ok(response) if response.status().is_success() => {
                    debug!(
                        "Successful request to {} in {:.3}s",
                        endpoint,
                        request_start.elapsed().as_secs_f64()
                    );
                    return Ok(response);
                }
                Ok(response) => {
                    let status = response.status();
                    let retry_after = retry_after_header(&response);
                    let body = response.text().unwrap_or_default();
                    let error = TransportError::Status {
                        endpoint: endpoint.to_string(),
                        status: status.as_u16(),
                        body: truncate_chars(body.trim(), MAX_ERROR_BODY_CHARS),
                    };
                    (error, retry_after)
                }
                Err(e) => (TransportError::from_reqwest(endpoint, e), None),
            };

            if !error.is_transient() || attempt + 1 >= max_attempts {
                return Err(error);
            }

            let wait = retry_after.unwrap_or_else(|| self.backoff(attempt));
            warn!(
                "Attempt {} failed: {}. Retrying in {:.1}s",
                attempt + 1,
                error,
                wait.as_secs_f64()
            );
            thread::sleep(wait);
            attempt += 1;
        }
    }

    fn backoff(&self, attempt: u32) -> Duration {
        let jitter: f64 = rand::rng().random_range(0.9..1.1);
        self.retry_base_delay
            .saturating_mul(2_u32.saturating_pow(attempt))
            .mul_f64(jitter)
    }
}

fn retry_after_header(response: &Response) -> Option<Duration> {
    response
        .headers()
        .get("retry-after")
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.trim().parse::<u64>().ok())
        .map(|secs| Duration::from_secs(secs.min(60)))
}

fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
