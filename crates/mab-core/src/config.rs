use std::{env, fs, path::Path, time::Duration};

use crate::{errors::Error, prompt::SYSTEM_PROMPT, Result};

pub const DEFAULT_GROQ_API_URL: &str = "https://api.groq.com/openai/v1";

/// Telegram's hard per-message limit.
const TELEGRAM_MAX_MESSAGE: usize = 4096;

/// Smallest usable prompt cap: the system prompt plus one full user message.
pub fn min_prompt_chars() -> usize {
    SYSTEM_PROMPT.chars().count() + TELEGRAM_MAX_MESSAGE
}

/// Typed runtime configuration.
///
/// Secrets are required; every other knob has a default matching the
/// assistant's historical behavior.
#[derive(Clone, Debug)]
pub struct Config {
    // Secrets
    pub telegram_bot_token: String,
    pub groq_api_key: String,

    // Completion endpoint
    pub groq_api_url: String,

    // Conversation history
    pub history_max_turns: usize,
    pub history_prompt_turns: usize,
    pub max_prompt_chars: usize,

    // Context enrichment
    pub fetch_timeout: Duration,

    // Telegram limits
    pub telegram_safe_limit: usize,
}

impl Config {
    /// Load from the process environment, reading `.env` first if present.
    pub fn load() -> Result<Self> {
        load_dotenv_if_present(Path::new(".env"))?;
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (the process env in production).
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let telegram_bot_token = required(&get, "TELEGRAM_BOT_TOKEN")?;
        let groq_api_key = required(&get, "GROQ_API_KEY")?;

        let groq_api_url = get("GROQ_API_URL")
            .and_then(non_empty)
            .map(|s| s.trim().trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_GROQ_API_URL.to_string());

        let history_max_turns = parse_usize(&get, "HISTORY_MAX_TURNS").unwrap_or(20).max(2);
        let history_prompt_turns = parse_usize(&get, "HISTORY_PROMPT_TURNS")
            .unwrap_or(10)
            .min(history_max_turns);
        let max_prompt_chars = parse_usize(&get, "MAX_PROMPT_CHARS")
            .unwrap_or(24_000)
            .max(min_prompt_chars());

        let fetch_timeout = Duration::from_secs(
            get("FETCH_TIMEOUT_SECS")
                .and_then(|s| s.trim().parse::<u64>().ok())
                .unwrap_or(10),
        );

        // Never send chunks larger than Telegram accepts.
        let telegram_safe_limit = parse_usize(&get, "TELEGRAM_SAFE_LIMIT")
            .unwrap_or(4000)
            .clamp(200, TELEGRAM_MAX_MESSAGE);

        Ok(Self {
            telegram_bot_token,
            groq_api_key,
            groq_api_url,
            history_max_turns,
            history_prompt_turns,
            max_prompt_chars,
            fetch_timeout,
            telegram_safe_limit,
        })
    }
}

fn required(get: &impl Fn(&str) -> Option<String>, key: &str) -> Result<String> {
    get(key)
        .and_then(non_empty)
        .map(|s| s.trim().to_string())
        .ok_or_else(|| Error::Config(format!("{key} environment variable is required")))
}

fn parse_usize(get: &impl Fn(&str) -> Option<String>, key: &str) -> Option<usize> {
    get(key).and_then(|s| s.trim().parse::<usize>().ok())
}

fn load_dotenv_if_present(path: &Path) -> Result<()> {
    let contents = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(e.into()),
    };

    for raw in contents.lines() {
        let Some((key, val)) = parse_dotenv_line(raw) else {
            continue;
        };
        if env::var_os(&key).is_some() {
            continue; // do not override existing env
        }
        env::set_var(key, val);
    }
    Ok(())
}

fn parse_dotenv_line(raw: &str) -> Option<(String, String)> {
    let line = raw.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    let line = line.strip_prefix("export ").unwrap_or(line);

    let (k, v) = line.split_once('=')?;
    let key = k.trim();
    if key.is_empty() {
        return None;
    }

    let mut val = v.trim().to_string();
    // Strip optional surrounding quotes.
    if val.len() >= 2
        && ((val.starts_with('"') && val.ends_with('"'))
            || (val.starts_with('\'') && val.ends_with('\'')))
    {
        val = val[1..val.len() - 1].to_string();
    }

    Some((key.to_string(), val))
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}
