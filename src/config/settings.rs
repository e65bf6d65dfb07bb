//! Configuration settings for Svar.

use crate::error::{Result, SvarError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Settings {
    pub provider: ProviderSettings,
    pub embedding: EmbeddingSettings,
    pub generation: GenerationSettings,
    pub chunking: ChunkingSettings,
    pub retrieval: RetrievalSettings,
    pub sessions: SessionSettings,
    pub prompts: PromptSettings,
}


/// Provider connection settings.
///
/// Credentials are passed through to the provider client untouched. The
/// `Debug` impl redacts the API key so it never reaches logs.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderSettings {
    /// API key. Falls back to `OPENAI_API_KEY` when unset.
    pub api_key: Option<String>,
    /// Base URL override for OpenAI-compatible endpoints.
    pub api_base: Option<String>,
    /// Request timeout in seconds (0 uses the built-in default).
    pub timeout_seconds: u64,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base: None,
            timeout_seconds: 300,
        }
    }
}

impl std::fmt::Debug for ProviderSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderSettings")
            .field("api_key", &self.api_key.as_ref().map(|_| "[redacted]"))
            .field("api_base", &self.api_base)
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

/// Embedding generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingSettings {
    /// Embedding model to use.
    pub model: String,
    /// Embedding dimensions.
    pub dimensions: u32,
}

impl Default for EmbeddingSettings {
    fn default() -> Self {
        Self {
            model: "text-embedding-3-small".to_string(),
            dimensions: 1536,
        }
    }
}

/// Response generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationSettings {
    /// LLM model for grounded answers.
    pub model: String,
    /// LLM model for plain chat without retrieval.
    pub chat_model: String,
    /// Sampling temperature.
    pub temperature: f32,
    /// Completion length cap. None leaves it to the provider.
    pub max_tokens: Option<u32>,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            chat_model: "gpt-4.1-mini".to_string(),
            temperature: 0.7,
            max_tokens: None,
        }
    }
}

/// Document chunking settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkingSettings {
    /// Window size in characters.
    pub chunk_size: u32,
    /// Characters shared between adjacent chunks.
    pub overlap: u32,
}

impl Default for ChunkingSettings {
    fn default() -> Self {
        Self {
            chunk_size: 1000,
            overlap: 200,
        }
    }
}

/// Retrieval settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalSettings {
    /// Number of context chunks to retrieve per query.
    pub top_k: u32,
}

impl Default for RetrievalSettings {
    fn default() -> Self {
        Self { top_k: 3 }
    }
}

/// Session lifecycle settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    /// Maximum live sessions; registering past this evicts the least
    /// recently used one. 0 disables the bound.
    pub max_sessions: u32,
    /// Idle seconds before a session is eligible for `evict_idle_sessions`.
    /// 0 disables idle eviction.
    pub idle_timeout_seconds: u64,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            max_sessions: 256,
            idle_timeout_seconds: 3600,
        }
    }
}

/// Prompt customization settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct PromptSettings {
    /// Directory for custom prompts (overrides defaults).
    pub custom_dir: Option<String>,
    /// Custom variables available in all prompts as {{variable_name}}.
    pub variables: std::collections::HashMap<String, String>,
}


impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Save settings to the default configuration file.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::default_config_path())
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| SvarError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("svar")
            .join("config.toml")
    }

    /// Check the settings for values the pipeline cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.chunking.chunk_size == 0 {
            return Err(SvarError::Config(
                "chunking.chunk_size must be at least 1".to_string(),
            ));
        }
        if self.chunking.overlap >= self.chunking.chunk_size {
            return Err(SvarError::Config(format!(
                "chunking.overlap ({}) must be smaller than chunk_size ({})",
                self.chunking.overlap, self.chunking.chunk_size
            )));
        }
        if self.embedding.dimensions == 0 {
            return Err(SvarError::Config(
                "embedding.dimensions must be at least 1".to_string(),
            ));
        }
        if self.retrieval.top_k == 0 {
            return Err(SvarError::Config(
                "retrieval.top_k must be at least 1".to_string(),
            ));
        }
        if !(0.0..=2.0).contains(&self.generation.temperature) {
            return Err(SvarError::Config(format!(
                "generation.temperature ({}) must be between 0.0 and 2.0",
                self.generation.temperature
            )));
        }
        if let Some(base) = &self.provider.api_base {
            url::Url::parse(base)
                .map_err(|e| SvarError::Config(format!("provider.api_base: {}", e)))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.embedding.model, "text-embedding-3-small");
        assert_eq!(settings.embedding.dimensions, 1536);
        assert_eq!(settings.generation.model, "gpt-4o-mini");
        assert_eq!(settings.generation.chat_model, "gpt-4.1-mini");
        assert_eq!(settings.chunking.chunk_size, 1000);
        assert_eq!(settings.chunking.overlap, 200);
        assert_eq!(settings.retrieval.top_k, 3);
        assert_eq!(settings.sessions.max_sessions, 256);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_incoherent_chunking() {
        let mut settings = Settings::default();
        settings.chunking.chunk_size = 0;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.chunking.overlap = settings.chunking.chunk_size;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_limits() {
        let mut settings = Settings::default();
        settings.retrieval.top_k = 0;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.embedding.dimensions = 0;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.generation.temperature = 3.5;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.provider.api_base = Some("not a url".to_string());
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.provider.api_base = Some("http://localhost:11434/v1".to_string());
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let settings: Settings = toml::from_str(
            r#"
            [chunking]
            chunk_size = 500
            "#,
        )
        .unwrap();
        assert_eq!(settings.chunking.chunk_size, 500);
        assert_eq!(settings.chunking.overlap, 200);
        assert_eq!(settings.retrieval.top_k, 3);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut settings = Settings::default();
        settings.provider.api_key = Some("sk-test".to_string());
        settings.retrieval.top_k = 5;
        settings.save_to(&path).unwrap();

        let loaded = Settings::load_from(Some(&path)).unwrap();
        assert_eq!(loaded.retrieval.top_k, 5);
        assert_eq!(loaded.provider.api_key.as_deref(), Some("sk-test"));
    }

    #[test]
    fn test_api_key_redacted_in_debug() {
        let mut settings = Settings::default();
        settings.provider.api_key = Some("sk-very-secret".to_string());
        let rendered = format!("{:?}", settings.provider);
        assert!(!rendered.contains("sk-very-secret"));
        assert!(rendered.contains("[redacted]"));
    }
}
