use crate::error::ImageGenerationError;
use async_trait::async_trait;

/// A finished image: where to fetch it and the prompt it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    pub url: String,
    pub prompt: String,
}

/// Turns a prompt into an image URL.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Backend name for logs.
    fn name(&self) -> &'static str;

    async fn generate_image(&self, prompt: &str) -> Result<GeneratedImage, ImageGenerationError>;
}

/// `sk-abcd***wxyz`; keys of 11 chars or fewer become `***`.
pub fn mask_api_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 11 {
        return "***".to_string();
    }
    let head: String = chars[..7].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}***{}", head, tail)
}

/// First 100 chars of the prompt, for log lines.
pub fn prompt_preview(prompt: &str) -> String {
    prompt.chars().take(100).collect()
}

/// Trims the prompt and rejects empty ones.
pub(crate) fn validate_prompt(prompt: &str) -> Result<&str, ImageGenerationError> {
    let prompt = prompt.trim();
    if prompt.is_empty() {
        Err(ImageGenerationError::InvalidPrompt)
    } else {
        Ok(prompt)
    }
}
