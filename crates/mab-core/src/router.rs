use std::sync::Arc;

use crate::{
    assistant::Assistant,
    domain::{ChatId, UserId},
    handlers,
    history::UserLocks,
    messaging::{port::MessagingPort, types::IncomingUpdate},
    texts,
};

/// Transport-neutral event router.
///
/// Owns the per-user locks and handles to the messenger and the assistant.
/// Every handler failure stops here: it is logged and answered with a fixed
/// apology, never propagated to the transport loop.
pub struct EventRouter {
    pub(crate) messenger: Arc<dyn MessagingPort>,
    pub(crate) assistant: Arc<Assistant>,
    pub(crate) locks: UserLocks,
    pub(crate) chunk_limit: usize,
}

impl EventRouter {
    pub fn new(
        messenger: Arc<dyn MessagingPort>,
        assistant: Arc<Assistant>,
        chunk_limit: usize,
    ) -> Self {
        let max_len = messenger.capabilities().max_message_len;
        Self {
            messenger,
            assistant,
            locks: UserLocks::default(),
            chunk_limit: chunk_limit.clamp(1, max_len.max(1)),
        }
    }

    pub fn assistant(&self) -> &Arc<Assistant> {
        &self.assistant
    }

    pub async fn handle(&self, update: IncomingUpdate) {
        let kind = update.kind();
        let chat_id = update.chat_id();
        let UserId(user_id) = update.user_id();
        tracing::debug!(kind, user_id, "update received");

        if let Err(e) = self.dispatch(update).await {
            tracing::error!(kind, user_id, error = %e, "handler failed");
            if let Some(chat_id) = chat_id {
                self.reply_failure(chat_id).await;
            }
        }
    }

    async fn dispatch(&self, update: IncomingUpdate) -> crate::Result<()> {
        match update {
            IncomingUpdate::Command(cmd) => handlers::commands::handle_command(self, cmd).await,
            IncomingUpdate::Text(msg) => handlers::text::handle_text(self, msg).await,
            IncomingUpdate::Photo(msg) => handlers::photo::handle_photo(self, msg).await,
            IncomingUpdate::Document(msg) => handlers::document::handle_document(self, msg).await,
            IncomingUpdate::Callback(q) => handlers::callback::handle_callback(self, q).await,
        }
    }

    async fn reply_failure(&self, chat_id: ChatId) {
        if let Err(e) = self
            .messenger
            .send_text(chat_id, texts::GENERIC_FAILURE)
            .await
        {
            tracing::warn!(chat_id = chat_id.0, error = %e, "failed to deliver apology");
        }
    }
}
