//! Fakes shared by handler tests.

use std::sync::{
    atomic::{AtomicBool, AtomicI32, AtomicUsize, Ordering},
    Arc, Mutex,
};

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::{
    assistant::{
        tests::{CallLog, FakeFetcher, FakeModel},
        Assistant,
    },
    domain::{ChatId, MessageId, MessageRef},
    errors::Error,
    history::InMemoryConversationStore,
    messaging::{
        port::MessagingPort,
        types::{ChatAction, InlineKeyboard, MessagingCapabilities},
    },
    prompt::PromptComposer,
    router::EventRouter,
    Result,
};

#[derive(Default)]
pub(crate) struct FakeMessenger {
    next_id: AtomicI32,
    texts: Mutex<Vec<String>>,
    keyboards: Mutex<Vec<(ChatId, String, InlineKeyboard)>>,
    answered: Mutex<Vec<String>>,
    downloads: Mutex<Vec<String>>,
    failing_sends: AtomicUsize,
    failing_downloads: AtomicBool,
}

impl FakeMessenger {
    fn alloc(&self, chat_id: ChatId) -> MessageRef {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        MessageRef {
            chat_id,
            message_id: MessageId(id),
        }
    }

    pub(crate) fn texts(&self) -> Vec<String> {
        self.texts.lock().unwrap().clone()
    }

    pub(crate) fn keyboards(&self) -> Vec<(ChatId, String, InlineKeyboard)> {
        self.keyboards.lock().unwrap().clone()
    }

    pub(crate) fn answered(&self) -> Vec<String> {
        self.answered.lock().unwrap().clone()
    }

    pub(crate) fn downloads(&self) -> Vec<String> {
        self.downloads.lock().unwrap().clone()
    }

    pub(crate) fn fail_next_sends(&self, n: usize) {
        self.failing_sends.store(n, Ordering::SeqCst);
    }

    pub(crate) fn fail_downloads(&self) {
        self.failing_downloads.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl MessagingPort for FakeMessenger {
    fn capabilities(&self) -> MessagingCapabilities {
        MessagingCapabilities {
            max_message_len: 4096,
        }
    }

    async fn send_text(&self, chat_id: ChatId, text: &str) -> Result<MessageRef> {
        let failing = self
            .failing_sends
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failing {
            return Err(Error::External("telegram error: bad gateway".to_string()));
        }
        self.texts.lock().unwrap().push(text.to_string());
        Ok(self.alloc(chat_id))
    }

    async fn send_chat_action(&self, _chat_id: ChatId, _action: ChatAction) -> Result<()> {
        Ok(())
    }

    async fn send_inline_keyboard(
        &self,
        chat_id: ChatId,
        text: &str,
        keyboard: InlineKeyboard,
    ) -> Result<MessageRef> {
        self.keyboards
            .lock()
            .unwrap()
            .push((chat_id, text.to_string(), keyboard));
        Ok(self.alloc(chat_id))
    }

    async fn answer_callback_query(&self, callback_id: &str) -> Result<()> {
        self.answered.lock().unwrap().push(callback_id.to_string());
        Ok(())
    }

    async fn download_file(&self, file_id: &str) -> Result<Vec<u8>> {
        if self.failing_downloads.load(Ordering::SeqCst) {
            return Err(Error::External("telegram error: file is too big".to_string()));
        }
        self.downloads.lock().unwrap().push(file_id.to_string());
        Ok(vec![0xff, 0xd8, 0xff])
    }
}

pub(crate) struct Harness {
    pub router: Arc<EventRouter>,
    pub messenger: Arc<FakeMessenger>,
    pub model: Arc<FakeModel>,
    pub log: CallLog,
}

impl Harness {
    fn build(model: FakeModel, fail_fetch: bool, log: CallLog) -> Self {
        let messenger = Arc::new(FakeMessenger::default());
        let model = Arc::new(model);
        let assistant = Arc::new(Assistant::new(
            Arc::new(InMemoryConversationStore::default()),
            model.clone(),
            Arc::new(FakeFetcher {
                fail: fail_fetch,
                log: log.clone(),
            }),
            PromptComposer::default(),
        ));
        let router = Arc::new(EventRouter::new(messenger.clone(), assistant, 4000));
        Self {
            router,
            messenger,
            model,
            log,
        }
    }

    pub(crate) fn new(reply: &str) -> Self {
        let log = CallLog::default();
        Self::build(FakeModel::replying(reply, log.clone()), false, log)
    }

    pub(crate) fn with_failing_fetch(reply: &str) -> Self {
        let log = CallLog::default();
        Self::build(FakeModel::replying(reply, log.clone()), true, log)
    }

    /// Model calls block until `gate` is notified once per call.
    pub(crate) fn gated(reply: &str, gate: Arc<Notify>) -> Self {
        let log = CallLog::default();
        Self::build(FakeModel::gated(reply, log.clone(), gate), false, log)
    }

    /// Wait until the model has been called `n` times.
    pub(crate) async fn wait_for_model_calls(&self, n: usize) {
        for _ in 0..200 {
            if self.model.requests.lock().unwrap().len() >= n {
                return;
            }
            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        }
        panic!("model was not called {n} times");
    }

    pub(crate) fn failing_model(msg: &str) -> Self {
        let log = CallLog::default();
        Self::build(FakeModel::failing(msg, log.clone()), false, log)
    }
}
