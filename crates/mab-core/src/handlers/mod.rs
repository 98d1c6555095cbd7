//! Per-event handlers.
//!
//! Each handler:
//! - takes the user's lock when it touches history
//! - builds a prompt (possibly enriched)
//! - runs the exchange and replies in chunks

use std::sync::Arc;

use tokio::{sync::oneshot, task::JoinHandle};

use crate::{
    domain::{ChatId, UserId},
    errors::Error,
    formatting::split_chunks,
    messaging::{port::MessagingPort, types::ChatAction},
    router::EventRouter,
    texts, Result,
};

pub mod callback;
pub mod commands;
pub mod document;
pub mod photo;
pub mod text;

#[cfg(test)]
pub(crate) mod testing;

/// Send `text` as sequential chunks within the router's length limit.
pub(crate) async fn reply_chunked(router: &EventRouter, chat_id: ChatId, text: &str) -> Result<()> {
    for chunk in split_chunks(text, router.chunk_limit) {
        router.messenger.send_text(chat_id, &chunk).await?;
    }
    Ok(())
}

/// Run one exchange and deliver the answer.
///
/// Upstream failures and oversized prompts are answered here; anything else
/// bubbles up to the router boundary.
pub(crate) async fn run_exchange(
    router: &EventRouter,
    chat_id: ChatId,
    user_id: UserId,
    text: &str,
    enrichment: Option<&str>,
) -> Result<()> {
    match router.assistant.ask(user_id, text, enrichment).await {
        Ok(answer) => reply_chunked(router, chat_id, &answer).await,
        Err(Error::Upstream(msg)) => {
            tracing::error!(user_id = user_id.0, error = %msg, "completion failed");
            router
                .messenger
                .send_text(chat_id, &texts::upstream_failure(&msg))
                .await?;
            Ok(())
        }
        Err(e @ Error::PromptTooLarge { .. }) => {
            tracing::warn!(user_id = user_id.0, error = %e, "prompt rejected");
            router
                .messenger
                .send_text(chat_id, texts::PROMPT_TOO_LARGE)
                .await?;
            Ok(())
        }
        Err(e) => Err(e),
    }
}

/// Repeats the typing indicator until stopped (best-effort).
pub(crate) struct TypingIndicator {
    stop_tx: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

impl TypingIndicator {
    pub(crate) fn start(messenger: Arc<dyn MessagingPort>, chat_id: ChatId) -> Self {
        let (stop_tx, mut stop_rx) = oneshot::channel::<()>();
        let task = tokio::spawn(async move {
            let mut tick = tokio::time::interval(std::time::Duration::from_secs(4));
            loop {
                tokio::select! {
                    _ = tick.tick() => {
                        let _ = messenger.send_chat_action(chat_id, ChatAction::Typing).await;
                    }
                    _ = &mut stop_rx => break,
                }
            }
        });
        Self { stop_tx, task }
    }

    pub(crate) async fn stop(self) {
        let _ = self.stop_tx.send(());
        let _ = self.task.await;
    }
}
