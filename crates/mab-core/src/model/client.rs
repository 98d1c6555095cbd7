use async_trait::async_trait;

use crate::Result;

use super::types::CompletionRequest;

/// Completion client interface used by the assistant.
///
/// Implementations return the generated text, or `Error::Upstream` on any
/// transport/API failure. Callers never retry.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, req: &CompletionRequest) -> Result<String>;
}
