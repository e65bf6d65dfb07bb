//! OpenAI chat completion streaming.

use super::{fuse_on_error, FragmentStream, GenerationRequest, Generator};
use crate::config::ProviderSettings;
use crate::error::{Result, SvarError};
use crate::openai::create_client;
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
};
use async_trait::async_trait;
use futures::StreamExt;
use tracing::{debug, instrument};

/// Streams chat completions from an OpenAI-compatible endpoint.
pub struct OpenAIGenerator {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
}

impl OpenAIGenerator {
    /// Create a new generator from provider settings.
    pub fn new(provider: &ProviderSettings) -> Self {
        Self {
            client: create_client(provider),
        }
    }
}

#[async_trait]
impl Generator for OpenAIGenerator {
    #[instrument(skip(self, request), fields(model = %request.model))]
    async fn stream_complete(&self, request: GenerationRequest) -> Result<FragmentStream> {
        let messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(request.system)
                .build()
                .map_err(|e| SvarError::GenerationInterrupted(e.to_string()))?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(request.user)
                .build()
                .map_err(|e| SvarError::GenerationInterrupted(e.to_string()))?
                .into(),
        ];

        let mut request_args = CreateChatCompletionRequestArgs::default();
        request_args
            .model(&request.model)
            .messages(messages)
            .temperature(request.temperature)
            .stream(true);
        if let Some(max_tokens) = request.max_tokens {
            request_args.max_tokens(max_tokens);
        }
        let completion_request = request_args
            .build()
            .map_err(|e| SvarError::GenerationInterrupted(e.to_string()))?;

        debug!("Starting completion stream");
        let stream = self
            .client
            .chat()
            .create_stream(completion_request)
            .await
            .map_err(|e| {
                SvarError::GenerationInterrupted(format!("Failed to start stream: {}", e))
            })?;

        let fragments = stream.filter_map(|chunk| async move {
            match chunk {
                Ok(response) => response
                    .choices
                    .first()
                    .and_then(|choice| choice.delta.content.clone())
                    .filter(|content| !content.is_empty())
                    .map(Ok),
                Err(e) => Some(Err(SvarError::GenerationInterrupted(e.to_string()))),
            }
        });

        Ok(fuse_on_error(Box::pin(fragments)))
    }
}
