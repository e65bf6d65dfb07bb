//! Streaming answer generation.
//!
//! Generators yield answer fragments as they arrive so callers can forward
//! tokens immediately. Dropping the stream cancels the request.

mod openai;

pub use openai::OpenAIGenerator;

use std::pin::Pin;

use crate::error::Result;
use async_trait::async_trait;
use futures::{Stream, StreamExt};

/// A stream of answer fragments in arrival order.
pub type FragmentStream = Pin<Box<dyn Stream<Item = Result<String>> + Send>>;

/// A fully rendered generation request.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub system: String,
    pub user: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: Option<u32>,
}

/// Trait for streaming completion backends.
#[async_trait]
pub trait Generator: Send + Sync {
    /// Start a completion and return its fragment stream.
    async fn stream_complete(&self, request: GenerationRequest) -> Result<FragmentStream>;
}

/// End a fragment stream after its first error.
///
/// Consumers see at most one `Err`, then the stream terminates.
pub fn fuse_on_error(stream: FragmentStream) -> FragmentStream {
    Box::pin(stream.scan(false, |errored, item| {
        let next = if *errored {
            None
        } else {
            *errored = item.is_err();
            Some(item)
        };
        async move { next }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SvarError;
    use futures::stream;

    #[tokio::test]
    async fn test_fuse_on_error_stops_after_first_error() {
        let items: Vec<Result<String>> = vec![
            Ok("one".to_string()),
            Err(SvarError::GenerationInterrupted("boom".to_string())),
            Ok("two".to_string()),
        ];

        let fused = fuse_on_error(Box::pin(stream::iter(items)));
        let collected: Vec<_> = fused.collect().await;

        assert_eq!(collected.len(), 2);
        assert_eq!(collected[0].as_deref().unwrap(), "one");
        assert!(collected[1].is_err());
    }

    #[tokio::test]
    async fn test_fuse_on_error_passes_clean_streams_through() {
        let items: Vec<Result<String>> =
            vec![Ok("a".to_string()), Ok("b".to_string()), Ok("c".to_string())];

        let fused = fuse_on_error(Box::pin(stream::iter(items)));
        let collected: Vec<String> = fused.map(|item| item.unwrap()).collect().await;

        assert_eq!(collected, vec!["a", "b", "c"]);
    }
}
