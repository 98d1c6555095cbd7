use crate::{messaging::types::DocumentMessage, router::EventRouter, texts, Result};

use super::{run_exchange, TypingIndicator};

/// Documents are never downloaded or read: the reply is generic advice keyed
/// on the file name and caption.
pub async fn handle_document(router: &EventRouter, msg: DocumentMessage) -> Result<()> {
    let DocumentMessage {
        chat_id,
        user_id,
        file_name,
        mime_type,
        caption,
        ..
    } = msg;

    router
        .messenger
        .send_text(chat_id, texts::ANALYZING_DOCUMENT)
        .await?;
    tracing::debug!(
        user_id = user_id.0,
        file_name = file_name.as_deref().unwrap_or(""),
        mime_type = mime_type.as_deref().unwrap_or(""),
        "document received"
    );

    let prompt = texts::document_prompt(file_name.as_deref(), caption.as_deref());

    let _guard = router.locks.lock_user(user_id).await;
    let typing = TypingIndicator::start(router.messenger.clone(), chat_id);
    let result = run_exchange(router, chat_id, user_id, &prompt, None).await;
    typing.stop().await;
    result
}

#[cfg(test)]
mod tests {
    use crate::{
        domain::{ChatId, UserId},
        handlers::testing::Harness,
        messaging::types::{DocumentMessage, IncomingUpdate},
        texts,
    };

    #[tokio::test]
    async fn document_uses_name_and_caption_only() {
        let h = Harness::new("Советы");
        h.router
            .handle(IncomingUpdate::Document(DocumentMessage {
                chat_id: ChatId(10),
                user_id: UserId(1),
                file_id: "doc".to_string(),
                file_name: Some("brief.docx".to_string()),
                mime_type: None,
                caption: Some("проверь бриф".to_string()),
            }))
            .await;

        assert!(h.messenger.downloads().is_empty());
        assert_eq!(
            h.messenger.texts(),
            vec![texts::ANALYZING_DOCUMENT.to_string(), "Советы".to_string()]
        );
        let req = h.model.last_request();
        assert_eq!(
            req.messages.last().unwrap().content,
            texts::document_prompt(Some("brief.docx"), Some("проверь бриф"))
        );
        let history = h.router.assistant().history(UserId(1)).await;
        assert_eq!(history.len(), 2);
    }
}
