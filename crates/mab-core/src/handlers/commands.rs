use crate::{messaging::types::Command, router::EventRouter, texts, Result};

pub async fn handle_command(router: &EventRouter, cmd: Command) -> Result<()> {
    match cmd.name.as_str() {
        "start" | "menu" => {
            router
                .messenger
                .send_inline_keyboard(
                    cmd.chat_id,
                    &texts::welcome(&cmd.first_name),
                    texts::start_keyboard(),
                )
                .await?;
        }
        "help" => {
            router.messenger.send_text(cmd.chat_id, texts::HELP).await?;
        }
        "clear" => {
            // Waits for an in-flight exchange so it cannot re-add turns afterwards.
            let _guard = router.locks.lock_user(cmd.user_id).await;
            router.assistant.reset(cmd.user_id).await;
            tracing::info!(user_id = cmd.user_id.0, "history cleared");
            router.messenger.send_text(cmd.chat_id, texts::CLEARED).await?;
        }
        other => {
            tracing::debug!(command = other, "ignoring unknown command");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{ChatId, UserId},
        handlers::testing::Harness,
        messaging::types::IncomingUpdate,
    };

    fn command(text: &str) -> IncomingUpdate {
        IncomingUpdate::Command(Command::parse(ChatId(10), UserId(1), "Анна", text).unwrap())
    }

    #[tokio::test]
    async fn start_sends_welcome_with_keyboard() {
        let h = Harness::new("unused");
        h.router.handle(command("/start")).await;

        let kbs = h.messenger.keyboards();
        assert_eq!(kbs.len(), 1);
        assert!(kbs[0].1.starts_with("👋 Привет, Анна!"));
        assert_eq!(kbs[0].2, texts::start_keyboard());
    }

    #[tokio::test]
    async fn help_sends_guide() {
        let h = Harness::new("unused");
        h.router.handle(command("/help")).await;
        assert_eq!(h.messenger.texts(), vec![texts::HELP.to_string()]);
    }

    #[tokio::test]
    async fn clear_resets_history() {
        let h = Harness::new("answer");
        h.router
            .assistant()
            .ask(UserId(1), "hello", None)
            .await
            .unwrap();
        assert_eq!(h.router.assistant().history(UserId(1)).await.len(), 2);

        h.router.handle(command("/clear")).await;
        assert!(h.router.assistant().history(UserId(1)).await.is_empty());
        assert_eq!(h.messenger.texts(), vec![texts::CLEARED.to_string()]);
    }

    #[tokio::test]
    async fn unknown_command_is_ignored() {
        let h = Harness::new("unused");
        h.router.handle(command("/settings")).await;
        assert!(h.messenger.texts().is_empty());
        assert!(h.messenger.keyboards().is_empty());
    }
}
