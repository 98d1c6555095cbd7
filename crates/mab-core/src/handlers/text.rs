use crate::{
    enrich::extract_first_url, messaging::types::TextMessage, router::EventRouter, texts, Result,
};

use super::{run_exchange, TypingIndicator};

pub async fn handle_text(router: &EventRouter, msg: TextMessage) -> Result<()> {
    let TextMessage {
        chat_id,
        user_id,
        text,
    } = msg;
    if text.trim().is_empty() {
        return Ok(());
    }

    let _guard = router.locks.lock_user(user_id).await;
    let typing = TypingIndicator::start(router.messenger.clone(), chat_id);

    let result = async {
        let mut enrichment = None;
        if let Some(url) = extract_first_url(&text) {
            router
                .messenger
                .send_text(chat_id, texts::ANALYZING_SITE)
                .await?;
            enrichment = router.assistant.enrich_url(&url).await;
        }
        run_exchange(router, chat_id, user_id, &text, enrichment.as_deref()).await
    }
    .await;

    typing.stop().await;
    result
}
