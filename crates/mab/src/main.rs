use std::sync::Arc;

use mab_core::{assistant::Assistant, config::Config, history::InMemoryConversationStore};
use mab_groq::GroqClient;
use mab_web::WebPageFetcher;

#[tokio::main]
async fn main() -> Result<(), mab_core::Error> {
    mab_core::logging::init("mab")?;

    // Missing secrets stop the process here, before any polling starts.
    let cfg = Arc::new(Config::load()?);

    let store = Arc::new(InMemoryConversationStore::new(cfg.history_max_turns));
    let model = Arc::new(GroqClient::new(
        cfg.groq_api_key.clone(),
        cfg.groq_api_url.clone(),
    )?);
    let fetcher = Arc::new(WebPageFetcher::new(cfg.fetch_timeout)?);

    let assistant = Arc::new(Assistant::from_config(&cfg, store, model, fetcher));

    mab_telegram::router::run_polling(cfg, assistant)
        .await
        .map_err(|e| mab_core::Error::External(format!("telegram bot failed: {e}")))?;

    Ok(())
}
