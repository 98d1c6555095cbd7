//! Prompt composition: system instruction + recent history + current turn.

use crate::{
    domain::Turn,
    errors::Error,
    formatting::take_chars,
    model::types::CompletionRequest,
    Result,
};

/// Fixed system instruction for the marketing assistant.
pub const SYSTEM_PROMPT: &str = "Ты - экспертный ИИ-помощник по digital маркетингу. Твоя задача:

1. Анализировать маркетинговые материалы, тексты, изображения и веб-сайты
2. Находить болевые точки в маркетинговых стратегиях
3. Предлагать конкретные, практические решения
4. Давать креативные идеи для продвижения
5. Помогать с копирайтингом, контент-стратегией, SMM, SEO, email-маркетингом

Отвечай профессионально, но понятно. Давай структурированные ответы с конкретными шагами действий.
Всегда фокусируйся на решении бизнес-задач и увеличении конверсии.

Отвечай на русском языке.";

const USER_REQUEST_LABEL: &str = "\n\nЗапрос пользователя: ";

pub const DEFAULT_HISTORY_TURNS: usize = 10;
pub const DEFAULT_MAX_PROMPT_CHARS: usize = 24_000;

#[derive(Clone, Debug)]
pub struct PromptComposer {
    pub system_prompt: String,
    /// How many of the most recent stored turns go into a request.
    pub history_turns: usize,
    /// Cap on the combined characters of every message in a request.
    pub max_prompt_chars: usize,
}

impl Default for PromptComposer {
    fn default() -> Self {
        Self {
            system_prompt: SYSTEM_PROMPT.to_string(),
            history_turns: DEFAULT_HISTORY_TURNS,
            max_prompt_chars: DEFAULT_MAX_PROMPT_CHARS,
        }
    }
}

impl PromptComposer {
    pub fn new(history_turns: usize, max_prompt_chars: usize) -> Self {
        Self {
            history_turns,
            max_prompt_chars,
            ..Self::default()
        }
    }

    /// Build the ordered message list for one completion call.
    ///
    /// Budget order when the cap is hit: the enrichment is shortened first,
    /// then the oldest history turns are dropped. The current user text is
    /// never cut; if it cannot fit next to the system prompt the request is
    /// rejected.
    pub fn compose(
        &self,
        history: &[Turn],
        text: &str,
        enrichment: Option<&str>,
    ) -> Result<CompletionRequest> {
        let limit = self.max_prompt_chars;
        let system_len = self.system_prompt.chars().count();
        let text_len = text.chars().count();

        let required = system_len + text_len;
        if required > limit {
            return Err(Error::PromptTooLarge {
                chars: required,
                limit,
            });
        }

        let start = history.len().saturating_sub(self.history_turns);
        let mut recent = &history[start..];
        let mut history_len: usize = recent.iter().map(|t| t.content.chars().count()).sum();
        while required + history_len > limit {
            let Some((oldest, rest)) = recent.split_first() else {
                break;
            };
            history_len -= oldest.content.chars().count();
            recent = rest;
        }

        let used = required + history_len;
        let context = enrichment
            .filter(|e| !e.trim().is_empty())
            .and_then(|e| {
                let overhead = USER_REQUEST_LABEL.chars().count();
                let budget = limit.checked_sub(used + overhead)?;
                if budget == 0 {
                    return None;
                }
                Some(take_chars(e, budget))
            });

        let current = match context {
            Some(ctx) => format!("{ctx}{USER_REQUEST_LABEL}{text}"),
            None => text.to_string(),
        };

        let mut messages = Vec::with_capacity(recent.len() + 2);
        messages.push(Turn::system(self.system_prompt.clone()));
        messages.extend(recent.iter().cloned());
        messages.push(Turn::user(current));

        Ok(CompletionRequest::new(messages))
    }
}
