use async_trait::async_trait;

use crate::{
    domain::{ChatId, MessageRef},
    messaging::types::{ChatAction, InlineKeyboard, MessagingCapabilities},
    Result,
};

/// Outbound side of the chat transport.
#[async_trait]
pub trait MessagingPort: Send + Sync {
    fn capabilities(&self) -> MessagingCapabilities;

    /// Send plain text (no parse mode). Callers keep it under the length limit.
    async fn send_text(&self, chat_id: ChatId, text: &str) -> Result<MessageRef>;

    async fn send_chat_action(&self, chat_id: ChatId, action: ChatAction) -> Result<()>;

    async fn send_inline_keyboard(
        &self,
        chat_id: ChatId,
        text: &str,
        keyboard: InlineKeyboard,
    ) -> Result<MessageRef>;

    async fn answer_callback_query(&self, callback_id: &str) -> Result<()>;

    /// Download a file previously received from the transport.
    async fn download_file(&self, file_id: &str) -> Result<Vec<u8>>;
}
