//! Prediction-style image API client: submit a job, then poll it until it reaches a terminal
//! status or the deadline passes. Replicate-compatible request and response shapes.

use crate::error::ImageGenerationError;
use crate::generator::{mask_api_key, prompt_preview, validate_prompt, GeneratedImage, ImageGenerator};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use std::future::Future;
use tokio::time::{sleep, timeout_at, Instant};
use tracing::{debug, info, instrument, warn};

pub const DEFAULT_POLLING_BASE_URL: &str = "https://api.replicate.com/v1";
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Clone)]
pub struct PollingConfig {
    pub api_key: String,
    pub base_url: String,
    /// Sent as `model` in the job body when set.
    pub model: Option<String>,
    pub poll_interval: Duration,
    /// Measured from job submission.
    pub timeout: Duration,
}

impl PollingConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_POLLING_BASE_URL.to_string(),
            model: None,
            poll_interval: DEFAULT_POLL_INTERVAL,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

#[derive(Debug, Serialize)]
struct CreatePrediction<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<&'a str>,
    input: PredictionInput<'a>,
}

#[derive(Debug, Serialize)]
struct PredictionInput<'a> {
    prompt: &'a str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
enum PredictionStatus {
    Starting,
    Processing,
    Succeeded,
    Failed,
    Canceled,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Deserialize)]
struct PredictionUrls {
    get: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Prediction {
    id: String,
    status: PredictionStatus,
    #[serde(default)]
    output: Option<Value>,
    #[serde(default)]
    error: Option<Value>,
    #[serde(default)]
    urls: Option<PredictionUrls>,
}

impl Prediction {
    /// `output` is either a URL or a list of URLs; the first one wins.
    fn first_output_url(&self) -> Option<String> {
        match self.output.as_ref()? {
            Value::String(url) if !url.is_empty() => Some(url.clone()),
            Value::Array(items) => items
                .iter()
                .filter_map(Value::as_str)
                .find(|url| !url.is_empty())
                .map(str::to_string),
            _ => None,
        }
    }

    fn failure_message(&self) -> String {
        match &self.error {
            Some(Value::String(msg)) if !msg.is_empty() => msg.clone(),
            Some(Value::Null) | None => format!("prediction {}", status_name(self.status)),
            Some(other) => other.to_string(),
        }
    }
}

fn status_name(status: PredictionStatus) -> &'static str {
    match status {
        PredictionStatus::Starting => "starting",
        PredictionStatus::Processing => "processing",
        PredictionStatus::Succeeded => "succeeded",
        PredictionStatus::Failed => "failed",
        PredictionStatus::Canceled => "canceled",
        PredictionStatus::Unknown => "unknown",
    }
}

/// Polling client. Owns one `reqwest::Client`; dropping the client releases its connections.
#[derive(Clone)]
pub struct PollingImageClient {
    http: reqwest::Client,
    config: PollingConfig,
}

impl PollingImageClient {
    pub fn new(config: PollingConfig) -> Result<Self, ImageGenerationError> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .build()?;
        let config = PollingConfig {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            ..config
        };
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &PollingConfig {
        &self.config
    }

    /// Runs one request, giving up once the deadline measured from `started` passes.
    async fn before_deadline<T, F>(&self, started: Instant, request: F) -> Result<T, ImageGenerationError>
    where
        F: Future<Output = Result<T, ImageGenerationError>>,
    {
        match timeout_at(started + self.config.timeout, request).await {
            Ok(result) => result,
            Err(_) => {
                let elapsed = started.elapsed();
                warn!(
                    elapsed_ms = elapsed.as_millis() as u64,
                    "Image API request still pending at deadline"
                );
                Err(ImageGenerationError::Timeout { elapsed })
            }
        }
    }

    async fn read_prediction(response: reqwest::Response) -> Result<Prediction, ImageGenerationError> {
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(ImageGenerationError::Api {
                status: status.as_u16(),
                message: body.chars().take(300).collect(),
            });
        }
        serde_json::from_str(&body).map_err(|e| ImageGenerationError::InvalidResponse(e.to_string()))
    }

    async fn submit(&self, prompt: &str) -> Result<Prediction, ImageGenerationError> {
        let body = CreatePrediction {
            model: self.config.model.as_deref(),
            input: PredictionInput { prompt },
        };
        let response = self
            .http
            .post(format!("{}/predictions", self.config.base_url))
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?;
        Self::read_prediction(response).await
    }

    async fn fetch(&self, poll_url: &str) -> Result<Prediction, ImageGenerationError> {
        let response = self
            .http
            .get(poll_url)
            .bearer_auth(&self.config.api_key)
            .send()
            .await?;
        Self::read_prediction(response).await
    }
}

#[async_trait]
impl ImageGenerator for PollingImageClient {
    fn name(&self) -> &'static str {
        "polling"
    }

    #[instrument(skip(self, prompt))]
    async fn generate_image(&self, prompt: &str) -> Result<GeneratedImage, ImageGenerationError> {
        let prompt = validate_prompt(prompt)?;

        info!(
            model = ?self.config.model,
            prompt_preview = %prompt_preview(prompt),
            api_key = %mask_api_key(&self.config.api_key),
            "Image generation request"
        );

        let started = Instant::now();
        let mut prediction = self.before_deadline(started, self.submit(prompt)).await?;
        let poll_url = prediction
            .urls
            .as_ref()
            .and_then(|u| u.get.clone())
            .unwrap_or_else(|| format!("{}/predictions/{}", self.config.base_url, prediction.id));

        debug!(prediction_id = %prediction.id, poll_url = %poll_url, "Prediction submitted");

        loop {
            match prediction.status {
                PredictionStatus::Succeeded => {
                    let url = prediction
                        .first_output_url()
                        .ok_or(ImageGenerationError::EmptyOutput)?;
                    info!(
                        prediction_id = %prediction.id,
                        elapsed_ms = started.elapsed().as_millis() as u64,
                        image_url = %url,
                        "Image generation completed"
                    );
                    return Ok(GeneratedImage {
                        url,
                        prompt: prompt.to_string(),
                    });
                }
                PredictionStatus::Failed | PredictionStatus::Canceled => {
                    let message = prediction.failure_message();
                    warn!(prediction_id = %prediction.id, error = %message, "Image generation failed");
                    return Err(ImageGenerationError::Failed(message));
                }
                PredictionStatus::Starting
                | PredictionStatus::Processing
                | PredictionStatus::Unknown => {}
            }

            let elapsed = started.elapsed();
            if elapsed >= self.config.timeout {
                warn!(
                    prediction_id = %prediction.id,
                    elapsed_ms = elapsed.as_millis() as u64,
                    "Image generation deadline passed"
                );
                return Err(ImageGenerationError::Timeout { elapsed });
            }

            sleep(self.config.poll_interval.min(self.config.timeout - elapsed)).await;
            prediction = self.before_deadline(started, self.fetch(&poll_url)).await?;
            debug!(
                prediction_id = %prediction.id,
                status = status_name(prediction.status),
                "Prediction polled"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn prediction(value: Value) -> Prediction {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_output_string_or_array() {
        let p = prediction(json!({"id": "1", "status": "succeeded", "output": "https://x/a.png"}));
        assert_eq!(p.first_output_url().as_deref(), Some("https://x/a.png"));

        let p = prediction(json!({"id": "1", "status": "succeeded", "output": ["", "https://x/b.png"]}));
        assert_eq!(p.first_output_url().as_deref(), Some("https://x/b.png"));

        let p = prediction(json!({"id": "1", "status": "succeeded", "output": null}));
        assert_eq!(p.first_output_url(), None);
    }

    #[test]
    fn test_unknown_status_is_not_terminal() {
        let p = prediction(json!({"id": "1", "status": "queued"}));
        assert_eq!(p.status, PredictionStatus::Unknown);
    }

    #[test]
    fn test_failure_message() {
        let p = prediction(json!({"id": "1", "status": "failed", "error": "NSFW content"}));
        assert_eq!(p.failure_message(), "NSFW content");

        let p = prediction(json!({"id": "1", "status": "canceled", "error": null}));
        assert_eq!(p.failure_message(), "prediction canceled");
    }

    #[test]
    fn test_create_body_skips_missing_model() {
        let body = CreatePrediction {
            model: None,
            input: PredictionInput { prompt: "cat" },
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"input": {"prompt": "cat"}})
        );
    }

    #[test]
    fn test_new_trims_base_url() {
        let mut config = PollingConfig::new("key");
        config.base_url = "http://localhost:1/v1/".to_string();
        let client = PollingImageClient::new(config).unwrap();
        assert_eq!(client.config().base_url, "http://localhost:1/v1");
        assert_eq!(client.config().poll_interval, DEFAULT_POLL_INTERVAL);
    }
}
