use crate::{messaging::types::PhotoMessage, router::EventRouter, texts, Result};

use super::{run_exchange, TypingIndicator};

pub async fn handle_photo(router: &EventRouter, msg: PhotoMessage) -> Result<()> {
    let PhotoMessage {
        chat_id,
        user_id,
        file_id,
        caption,
    } = msg;

    router
        .messenger
        .send_text(chat_id, texts::ANALYZING_IMAGE)
        .await?;

    // The image itself is not sent to the model; only a fixed review prompt is.
    let bytes = router.messenger.download_file(&file_id).await?;
    tracing::debug!(user_id = user_id.0, size = bytes.len(), "photo downloaded");
    drop(bytes);

    let prompt = texts::photo_prompt(caption.as_deref());

    let _guard = router.locks.lock_user(user_id).await;
    let typing = TypingIndicator::start(router.messenger.clone(), chat_id);
    let result = run_exchange(router, chat_id, user_id, &prompt, None).await;
    typing.stop().await;
    result
}
