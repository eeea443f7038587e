//! Environment-driven configuration for the bots. Token and Telegram API URL come from
//! [`TelegramConfig`]; everything else is read here.

use anyhow::{bail, Context, Result};
use clap::ValueEnum;
use image_generation_client::{
    ImageGenerator, OpenAiImageClient, PollingConfig, PollingImageClient,
    DEFAULT_POLLING_BASE_URL, DEFAULT_POLL_INTERVAL, DEFAULT_TIMEOUT as DEFAULT_IMAGE_TIMEOUT,
};
use instagram_client::{InstagramConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT as DEFAULT_IG_TIMEOUT};
use relay_telegram::TelegramConfig;
use std::env;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

/// Settings every bot needs.
#[derive(Debug, Clone)]
pub struct BaseConfig {
    pub telegram: TelegramConfig,
    pub log_file: String,
    /// Empty admits everybody.
    pub allowed_user_ids: Vec<i64>,
}

impl BaseConfig {
    /// `bot_name` picks the default log file `logs/relaybot-{bot_name}.log`.
    pub fn load(token: Option<String>, bot_name: &str) -> Result<Self> {
        let telegram = TelegramConfig::from_env(token)?;
        let log_file = telegram
            .log_file
            .clone()
            .unwrap_or_else(|| format!("logs/relaybot-{}.log", bot_name));
        let allowed_user_ids = match non_empty_var("ALLOWED_USER_IDS") {
            Some(raw) => parse_user_ids(&raw).context("Invalid ALLOWED_USER_IDS")?,
            None => Vec::new(),
        };
        Ok(Self {
            telegram,
            log_file,
            allowed_user_ids,
        })
    }
}

/// Parses a comma-separated list of Telegram user ids. Blank entries are skipped.
pub fn parse_user_ids(raw: &str) -> Result<Vec<i64>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<i64>()
                .with_context(|| format!("'{}' is not a numeric user id", s))
        })
        .collect()
}

#[derive(Debug, Clone)]
pub struct InstagramSettings {
    pub base_url: String,
    pub timeout: Duration,
}

impl InstagramSettings {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            base_url: non_empty_var("INSTAGRAM_BASE_URL")
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            timeout: env_secs("INSTAGRAM_TIMEOUT_SECS", DEFAULT_IG_TIMEOUT)?,
        })
    }

    pub fn client_config(&self) -> InstagramConfig {
        InstagramConfig {
            base_url: self.base_url.clone(),
            timeout: self.timeout,
            ..InstagramConfig::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ImageProvider {
    /// Submit a job, then poll until it finishes.
    Polling,
    /// OpenAI images endpoint, answers synchronously.
    #[value(name = "openai")]
    OpenAi,
}

impl FromStr for ImageProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "polling" => Ok(ImageProvider::Polling),
            "openai" => Ok(ImageProvider::OpenAi),
            other => bail!("Unknown image provider '{}' (expected polling or openai)", other),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ImageSettings {
    pub provider: ImageProvider,
    pub api_key: String,
    /// None means the provider's default endpoint.
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub poll_interval: Duration,
    pub timeout: Duration,
}

impl ImageSettings {
    /// `provider` overrides IMAGE_PROVIDER. The openai provider also accepts OPENAI_API_KEY.
    pub fn from_env(provider: Option<ImageProvider>) -> Result<Self> {
        let provider = match provider {
            Some(p) => p,
            None => non_empty_var("IMAGE_PROVIDER")
                .map(|raw| raw.parse::<ImageProvider>())
                .transpose()
                .context("Invalid IMAGE_PROVIDER")?
                .unwrap_or(ImageProvider::Polling),
        };

        let api_key = match provider {
            ImageProvider::Polling => non_empty_var("IMAGE_API_KEY"),
            ImageProvider::OpenAi => {
                non_empty_var("IMAGE_API_KEY").or_else(|| non_empty_var("OPENAI_API_KEY"))
            }
        };
        let Some(api_key) = api_key else {
            bail!("IMAGE_API_KEY is required for the image bot. Set it in .env or environment.");
        };

        let poll_interval = env_secs("IMAGE_POLL_INTERVAL_SECS", DEFAULT_POLL_INTERVAL)?;
        let timeout = env_secs("IMAGE_TIMEOUT_SECS", DEFAULT_IMAGE_TIMEOUT)?;
        if poll_interval.is_zero() {
            bail!("IMAGE_POLL_INTERVAL_SECS must be greater than zero");
        }

        Ok(Self {
            provider,
            api_key,
            base_url: non_empty_var("IMAGE_API_BASE_URL"),
            model: non_empty_var("IMAGE_MODEL"),
            poll_interval,
            timeout,
        })
    }

    pub fn build_generator(&self) -> Result<Arc<dyn ImageGenerator>> {
        match self.provider {
            ImageProvider::Polling => {
                let config = PollingConfig {
                    api_key: self.api_key.clone(),
                    base_url: self
                        .base_url
                        .clone()
                        .unwrap_or_else(|| DEFAULT_POLLING_BASE_URL.to_string()),
                    model: self.model.clone(),
                    poll_interval: self.poll_interval,
                    timeout: self.timeout,
                };
                let client =
                    PollingImageClient::new(config).context("Failed to build image client")?;
                Ok(Arc::new(client))
            }
            ImageProvider::OpenAi => {
                let mut client = match &self.base_url {
                    Some(url) => OpenAiImageClient::with_base_url(self.api_key.clone(), url.clone()),
                    None => OpenAiImageClient::new(self.api_key.clone()),
                };
                if let Some(model) = &self.model {
                    client = client.with_model(model.clone());
                }
                Ok(Arc::new(client))
            }
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Whole seconds from `key`, or `default` when unset.
fn env_secs(key: &str, default: Duration) -> Result<Duration> {
    match non_empty_var(key) {
        Some(raw) => raw
            .trim()
            .parse::<u64>()
            .map(Duration::from_secs)
            .with_context(|| format!("{} must be a whole number of seconds, got '{}'", key, raw)),
        None => Ok(default),
    }
}
