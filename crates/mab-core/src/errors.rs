/// Core error type.
///
/// Adapter crates map their specific errors into this type so the router can
/// decide what the user sees (fixed apology vs. best-effort continuation).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    /// The completion endpoint failed (transport, HTTP status or payload).
    #[error("upstream error: {0}")]
    Upstream(String),

    /// Page fetch/parse failed. Never fatal to an exchange.
    #[error("enrichment error: {0}")]
    Enrichment(String),

    #[error("prompt too large: {chars} chars exceeds limit of {limit}")]
    PromptTooLarge { chars: usize, limit: usize },

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("external error: {0}")]
    External(String),
}

pub type Result<T> = std::result::Result<T, Error>;
