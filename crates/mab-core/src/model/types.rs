use serde::Serialize;

use crate::domain::Turn;

/// Model selected for every completion.
pub const MODEL_ID: &str = "llama-3.3-70b-versatile";

/// Sampling policy for completions. These are product constants, not user settings.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CompletionParams {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub top_p: f32,
}

impl Default for CompletionParams {
    fn default() -> Self {
        Self {
            model: MODEL_ID.to_string(),
            temperature: 0.7,
            max_tokens: 2000,
            top_p: 0.9,
        }
    }
}

/// Normalized request for a single completion call.
///
/// `messages` always starts with the system turn (see `prompt::PromptComposer`).
#[derive(Clone, Debug)]
pub struct CompletionRequest {
    pub messages: Vec<Turn>,
    pub params: CompletionParams,
}

impl CompletionRequest {
    pub fn new(messages: Vec<Turn>) -> Self {
        Self {
            messages,
            params: CompletionParams::default(),
        }
    }

    /// Total characters across all message contents.
    pub fn char_len(&self) -> usize {
        self.messages.iter().map(|m| m.content.chars().count()).sum()
    }
}
