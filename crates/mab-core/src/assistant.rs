use std::sync::Arc;

use crate::{
    config::Config,
    domain::{Turn, UserId},
    enrich::PageFetcher,
    history::ConversationStore,
    model::client::CompletionClient,
    prompt::PromptComposer,
    Result,
};

/// Request pipeline: history + enrichment + composition + completion.
///
/// Holds explicit handles to its collaborators so tests can swap in fakes.
pub struct Assistant {
    store: Arc<dyn ConversationStore>,
    model: Arc<dyn CompletionClient>,
    fetcher: Arc<dyn PageFetcher>,
    composer: PromptComposer,
}

impl Assistant {
    pub fn new(
        store: Arc<dyn ConversationStore>,
        model: Arc<dyn CompletionClient>,
        fetcher: Arc<dyn PageFetcher>,
        composer: PromptComposer,
    ) -> Self {
        Self {
            store,
            model,
            fetcher,
            composer,
        }
    }

    pub fn from_config(
        cfg: &Config,
        store: Arc<dyn ConversationStore>,
        model: Arc<dyn CompletionClient>,
        fetcher: Arc<dyn PageFetcher>,
    ) -> Self {
        let composer = PromptComposer::new(cfg.history_prompt_turns, cfg.max_prompt_chars);
        Self::new(store, model, fetcher, composer)
    }

    pub async fn reset(&self, user: UserId) {
        self.store.clear(user).await;
    }

    pub async fn history(&self, user: UserId) -> Vec<Turn> {
        self.store.history(user).await
    }

    /// Summarize `url` into a context block.
    ///
    /// Best-effort: a failed fetch is logged and yields `None`, so the exchange
    /// continues with the raw message.
    pub async fn enrich_url(&self, url: &str) -> Option<String> {
        match self.fetcher.summarize(url).await {
            Ok(summary) => {
                tracing::debug!(url, headings = summary.headings.len(), "page summarized");
                Some(summary.as_context())
            }
            Err(e) => {
                tracing::warn!(url, error = %e, "page enrichment failed; continuing without it");
                None
            }
        }
    }

    /// Run one exchange and record it on success.
    ///
    /// The stored user turn is the raw `text`, never the enriched prompt. On
    /// any error the history is left untouched.
    pub async fn ask(&self, user: UserId, text: &str, enrichment: Option<&str>) -> Result<String> {
        let history = self.store.history(user).await;
        let req = self.composer.compose(&history, text, enrichment)?;
        tracing::debug!(
            user = user.0,
            messages = req.messages.len(),
            chars = req.char_len(),
            "requesting completion"
        );

        let answer = self.model.complete(&req).await?;

        self.store
            .record_exchange(user, text.to_string(), answer.clone())
            .await;
        Ok(answer)
    }
}
