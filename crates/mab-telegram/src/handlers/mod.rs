//! Teloxide endpoints: translate and hand off to the core router.

use std::sync::Arc;

use teloxide::{
    prelude::*,
    types::{CallbackQuery, Message},
};

use crate::{convert, router::AppState};

pub async fn handle_callback(q: CallbackQuery, state: Arc<AppState>) -> ResponseResult<()> {
    state.router.handle(convert::from_callback(&q)).await;
    Ok(())
}

pub async fn handle_message(msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    match convert::from_message(&msg) {
        Some(update) => state.router.handle(update).await,
        None => tracing::debug!(chat_id = msg.chat.id.0, "ignoring unsupported message"),
    }
    Ok(())
}
