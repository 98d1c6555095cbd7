use crate::domain::{ChatId, UserId};

/// Transport-neutral inbound event.
///
/// Telegram-specific fields stay in the Telegram adapter.
#[derive(Clone, Debug)]
pub enum IncomingUpdate {
    Command(Command),
    Text(TextMessage),
    Photo(PhotoMessage),
    Document(DocumentMessage),
    Callback(CallbackQuery),
}

impl IncomingUpdate {
    pub fn kind(&self) -> &'static str {
        match self {
            IncomingUpdate::Command(_) => "command",
            IncomingUpdate::Text(_) => "text",
            IncomingUpdate::Photo(_) => "photo",
            IncomingUpdate::Document(_) => "document",
            IncomingUpdate::Callback(_) => "callback",
        }
    }

    pub fn chat_id(&self) -> Option<ChatId> {
        match self {
            IncomingUpdate::Command(c) => Some(c.chat_id),
            IncomingUpdate::Text(t) => Some(t.chat_id),
            IncomingUpdate::Photo(p) => Some(p.chat_id),
            IncomingUpdate::Document(d) => Some(d.chat_id),
            IncomingUpdate::Callback(q) => q.chat_id,
        }
    }

    pub fn user_id(&self) -> UserId {
        match self {
            IncomingUpdate::Command(c) => c.user_id,
            IncomingUpdate::Text(t) => t.user_id,
            IncomingUpdate::Photo(p) => p.user_id,
            IncomingUpdate::Document(d) => d.user_id,
            IncomingUpdate::Callback(q) => q.user_id,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Command {
    pub chat_id: ChatId,
    pub user_id: UserId,
    pub first_name: String,
    /// Lowercased command name without `/` or `@botname`.
    pub name: String,
}

impl Command {
    /// Parse `/cmd@botname ...`; `None` when `text` is not a command.
    /// Anything after the command word is ignored.
    pub fn parse(chat_id: ChatId, user_id: UserId, first_name: &str, text: &str) -> Option<Self> {
        let text = text.trim();
        if !text.starts_with('/') {
            return None;
        }
        let first = text.split_whitespace().next().unwrap_or("");
        let name = first
            .trim_start_matches('/')
            .split('@')
            .next()
            .unwrap_or("")
            .to_lowercase();
        if name.is_empty() {
            return None;
        }

        Some(Self {
            chat_id,
            user_id,
            first_name: first_name.to_string(),
            name,
        })
    }
}

#[derive(Clone, Debug)]
pub struct TextMessage {
    pub chat_id: ChatId,
    pub user_id: UserId,
    pub text: String,
}

#[derive(Clone, Debug)]
pub struct PhotoMessage {
    pub chat_id: ChatId,
    pub user_id: UserId,
    /// Highest-resolution variant.
    pub file_id: String,
    pub caption: Option<String>,
}

#[derive(Clone, Debug)]
pub struct DocumentMessage {
    pub chat_id: ChatId,
    pub user_id: UserId,
    pub file_id: String,
    pub file_name: Option<String>,
    pub mime_type: Option<String>,
    pub caption: Option<String>,
}

#[derive(Clone, Debug)]
pub struct CallbackQuery {
    /// Chat of the message carrying the button, if Telegram still has it.
    pub chat_id: Option<ChatId>,
    pub user_id: UserId,
    pub callback_id: String,
    pub data: String,
}

/// Outgoing "chat action" (typing indicator, etc).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChatAction {
    Typing,
}

/// Inline keyboard, one button per row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InlineKeyboard {
    pub buttons: Vec<InlineButton>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InlineButton {
    pub label: String,
    pub callback_data: String,
}

impl InlineKeyboard {
    pub fn new(buttons: Vec<InlineButton>) -> Self {
        Self { buttons }
    }
}

/// Capabilities / feature flags of a messenger implementation.
#[derive(Clone, Copy, Debug)]
pub struct MessagingCapabilities {
    pub max_message_len: usize,
}
