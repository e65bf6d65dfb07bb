//! OpenAI client configuration with sensible defaults.

use crate::config::ProviderSettings;
use async_openai::{config::OpenAIConfig, Client};
use std::time::Duration;

/// Default timeout for OpenAI API requests (5 minutes).
const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Create an OpenAI client from provider settings.
///
/// Falls back to the `OPENAI_API_KEY` environment variable when no key is
/// configured. Uses a 5-minute timeout by default to prevent hung API calls.
pub fn create_client(provider: &ProviderSettings) -> Client<OpenAIConfig> {
    let timeout = if provider.timeout_seconds == 0 {
        Duration::from_secs(DEFAULT_TIMEOUT_SECS)
    } else {
        Duration::from_secs(provider.timeout_seconds)
    };

    let http_client = reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .expect("Failed to create HTTP client");

    let mut config = OpenAIConfig::default();
    if let Some(key) = &provider.api_key {
        config = config.with_api_key(key);
    }
    if let Some(base) = &provider.api_base {
        config = config.with_api_base(base);
    }

    Client::with_config(config).with_http_client(http_client)
}
