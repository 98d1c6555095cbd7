use std::sync::Arc;

use teloxide::{dispatching::Dispatcher, dptree, prelude::*};

use mab_core::{
    assistant::Assistant, config::Config, messaging::port::MessagingPort, router::EventRouter,
};

use crate::handlers;
use crate::TelegramMessenger;

#[derive(Clone)]
pub struct AppState {
    pub router: Arc<EventRouter>,
}

pub async fn run_polling(cfg: Arc<Config>, assistant: Arc<Assistant>) -> anyhow::Result<()> {
    let bot = Bot::new(cfg.telegram_bot_token.clone());

    match bot.get_me().await {
        Ok(me) => tracing::info!(username = %me.username(), "bot started"),
        Err(e) => tracing::warn!(error = %e, "getMe failed; continuing"),
    }

    let messenger: Arc<dyn MessagingPort> = Arc::new(TelegramMessenger::new(bot.clone()));
    let router = Arc::new(EventRouter::new(
        messenger,
        assistant,
        cfg.telegram_safe_limit,
    ));

    let state = Arc::new(AppState { router });

    let handler = dptree::entry()
        .branch(Update::filter_callback_query().endpoint(handlers::handle_callback))
        .branch(Update::filter_message().endpoint(handlers::handle_message));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![state])
        .build()
        .dispatch()
        .await;

    tracing::info!("dispatcher stopped");
    Ok(())
}
