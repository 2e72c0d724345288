use anyhow::{Context, Result};
use std::path::PathBuf;

/// Settings for one run, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    // OpenAI
    pub openai_api_key: String,
    pub openai_organization: String,
    pub openai_model: String,
    pub openai_api_url: String,
    pub openai_temperature: f32,
    pub openai_max_tokens: u32,

    // Resources
    pub lang_dir: PathBuf,

    // Translation
    pub concurrency: usize,
}

impl Config {
    /// Build the config from environment variables.
    ///
    /// # Returns
    /// An error if `OPENAI_API_KEY` or `OPENAI_ORG` is unset or blank.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            // OpenAI
            openai_api_key: std::env::var("OPENAI_API_KEY")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .context("OPENAI_API_KEY not set")?,
            openai_organization: std::env::var("OPENAI_ORG")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .context("OPENAI_ORG not set")?,
            openai_model: std::env::var("OPENAI_MODEL")
                .unwrap_or_else(|_| "gpt-4".to_string()),
            openai_api_url: std::env::var("OPENAI_API_URL")
                .unwrap_or_else(|_| "https://api.openai.com/v1/chat/completions".to_string()),
            openai_temperature: std::env::var("OPENAI_TEMPERATURE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(0.3),
            openai_max_tokens: std::env::var("OPENAI_MAX_TOKENS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(500),

            // Resources
            lang_dir: std::env::var("LANG_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("resources/lang")),

            // Translation
            concurrency: std::env::var("TRANSLATE_CONCURRENCY")
                .ok()
                .and_then(|v| v.parse::<usize>().ok())
                .unwrap_or(1)
                .max(1),
        })
    }
}
