use crate::{messaging::types::CallbackQuery, router::EventRouter, texts, Result};

/// Example buttons: echo the stored example request back, no model call.
pub async fn handle_callback(router: &EventRouter, q: CallbackQuery) -> Result<()> {
    // Always acknowledge so the client stops its spinner.
    if let Err(e) = router
        .messenger
        .answer_callback_query(&q.callback_id)
        .await
    {
        tracing::warn!(error = %e, "failed to answer callback query");
    }

    let Some(chat_id) = q.chat_id else {
        return Ok(());
    };
    let Some(example) = texts::example_prompt(&q.data) else {
        tracing::debug!(data = %q.data, "unknown callback data");
        return Ok(());
    };

    router
        .messenger
        .send_text(chat_id, &texts::example_reply(example))
        .await?;
    Ok(())
}
