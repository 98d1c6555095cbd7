//! Telegram update → `IncomingUpdate` translation.

use teloxide::types::{CallbackQuery, Message};

use mab_core::{
    domain::{ChatId, UserId},
    messaging::types::{
        CallbackQuery as PortCallback, Command, DocumentMessage, IncomingUpdate, PhotoMessage,
        TextMessage,
    },
};

/// Translate a message; `None` for kinds the bot does not handle.
pub fn from_message(msg: &Message) -> Option<IncomingUpdate> {
    let user = msg.from()?;
    let user_id = UserId(user.id.0 as i64);
    let chat_id = ChatId(msg.chat.id.0);
    let caption = msg.caption().map(str::to_string);

    if let Some(text) = msg.text() {
        if text.trim_start().starts_with('/') {
            return Command::parse(chat_id, user_id, &user.first_name, text)
                .map(IncomingUpdate::Command);
        }
        return Some(IncomingUpdate::Text(TextMessage {
            chat_id,
            user_id,
            text: text.to_string(),
        }));
    }

    if let Some(photos) = msg.photo() {
        // Telegram lists sizes smallest first.
        let largest = photos.last()?;
        return Some(IncomingUpdate::Photo(PhotoMessage {
            chat_id,
            user_id,
            file_id: largest.file.id.clone(),
            caption,
        }));
    }

    if let Some(doc) = msg.document() {
        return Some(IncomingUpdate::Document(DocumentMessage {
            chat_id,
            user_id,
            file_id: doc.file.id.clone(),
            file_name: doc.file_name.clone(),
            mime_type: doc.mime_type.as_ref().map(|m| m.to_string()),
            caption,
        }));
    }

    None
}

pub fn from_callback(q: &CallbackQuery) -> IncomingUpdate {
    IncomingUpdate::Callback(PortCallback {
        chat_id: q.message.as_ref().map(|m| ChatId(m.chat.id.0)),
        user_id: UserId(q.from.id.0 as i64),
        callback_id: q.id.clone(),
        data: q.data.clone().unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn message(extra: serde_json::Value) -> Message {
        let mut v = json!({
            "message_id": 5,
            "date": 1_700_000_000,
            "chat": { "id": 42, "type": "private", "first_name": "Анна" },
            "from": { "id": 7, "is_bot": false, "first_name": "Анна" }
        });
        if let (Some(obj), Some(extra)) = (v.as_object_mut(), extra.as_object()) {
            obj.extend(extra.clone());
        }
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn text_and_commands_are_split() {
        match from_message(&message(json!({ "text": "/clear" }))) {
            Some(IncomingUpdate::Command(c)) => {
                assert_eq!(c.name, "clear");
                assert_eq!(c.user_id, UserId(7));
                assert_eq!(c.chat_id, ChatId(42));
            }
            other => panic!("unexpected: {other:?}"),
        }
        match from_message(&message(json!({ "text": "привет" }))) {
            Some(IncomingUpdate::Text(t)) => assert_eq!(t.text, "привет"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn photo_picks_largest_size() {
        let msg = message(json!({
            "caption": "оцени",
            "photo": [
                { "file_id": "small", "file_unique_id": "s", "width": 90, "height": 90, "file_size": 1000 },
                { "file_id": "large", "file_unique_id": "l", "width": 1280, "height": 1280, "file_size": 90000 }
            ]
        }));
        match from_message(&msg) {
            Some(IncomingUpdate::Photo(p)) => {
                assert_eq!(p.file_id, "large");
                assert_eq!(p.caption.as_deref(), Some("оцени"));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn document_keeps_name() {
        let msg = message(json!({
            "document": {
                "file_id": "doc1", "file_unique_id": "d1", "file_size": 2048,
                "file_name": "brief.pdf", "mime_type": "application/pdf"
            }
        }));
        match from_message(&msg) {
            Some(IncomingUpdate::Document(d)) => {
                assert_eq!(d.file_name.as_deref(), Some("brief.pdf"));
                assert_eq!(d.mime_type.as_deref(), Some("application/pdf"));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }
}
