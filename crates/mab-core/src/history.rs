//! Per-user rolling conversation history.
//!
//! History is process-local and in-memory only: a restart resets every user.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex as StdMutex},
};

use async_trait::async_trait;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::domain::{Role, Turn, UserId};

pub const DEFAULT_MAX_TURNS: usize = 20;

/// Session store port, injected into the router.
#[async_trait]
pub trait ConversationStore: Send + Sync {
    /// Append a turn, evicting the oldest ones beyond the limit.
    async fn append(&self, user: UserId, role: Role, content: String);

    /// Stored turns in insertion order (empty for unknown users).
    async fn history(&self, user: UserId) -> Vec<Turn>;

    /// Reset a user's history. Idempotent.
    async fn clear(&self, user: UserId);

    /// Append the user turn and the assistant reply as one unit.
    async fn record_exchange(&self, user: UserId, user_text: String, assistant_text: String);
}

pub struct InMemoryConversationStore {
    max_turns: usize,
    sessions: Mutex<HashMap<UserId, Vec<Turn>>>,
}

impl InMemoryConversationStore {
    pub fn new(max_turns: usize) -> Self {
        Self {
            max_turns: max_turns.max(1),
            sessions: Mutex::new(HashMap::new()),
        }
    }

    fn push_bounded(&self, turns: &mut Vec<Turn>, turn: Turn) {
        turns.push(turn);
        if turns.len() > self.max_turns {
            let excess = turns.len() - self.max_turns;
            turns.drain(..excess);
        }
    }
}

impl Default for InMemoryConversationStore {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_TURNS)
    }
}

#[async_trait]
impl ConversationStore for InMemoryConversationStore {
    async fn append(&self, user: UserId, role: Role, content: String) {
        let mut sessions = self.sessions.lock().await;
        let turns = sessions.entry(user).or_default();
        self.push_bounded(turns, Turn::new(role, content));
    }

    async fn history(&self, user: UserId) -> Vec<Turn> {
        self.sessions
            .lock()
            .await
            .get(&user)
            .cloned()
            .unwrap_or_default()
    }

    async fn clear(&self, user: UserId) {
        self.sessions.lock().await.insert(user, Vec::new());
    }

    async fn record_exchange(&self, user: UserId, user_text: String, assistant_text: String) {
        let mut sessions = self.sessions.lock().await;
        let turns = sessions.entry(user).or_default();
        self.push_bounded(turns, Turn::user(user_text));
        self.push_bounded(turns, Turn::assistant(assistant_text));
    }
}

type LockMap = Arc<StdMutex<HashMap<UserId, Arc<Mutex<()>>>>>;

/// Per-user async locks.
///
/// The router holds a user's lock for a whole exchange (read history, call the
/// model, record the reply), so overlapping messages from one user are applied
/// in arrival order. An entry is dropped once its last holder or waiter is gone.
#[derive(Default)]
pub struct UserLocks {
    inner: LockMap,
}

impl UserLocks {
    pub async fn lock_user(&self, user: UserId) -> UserLockGuard {
        let lock = {
            let mut map = self.inner.lock().unwrap_or_else(|p| p.into_inner());
            map.entry(user)
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .clone()
        };
        UserLockGuard {
            guard: Some(lock.lock_owned().await),
            user,
            map: self.inner.clone(),
        }
    }

    #[cfg(test)]
    fn tracked_users(&self) -> usize {
        self.inner.lock().unwrap().len()
    }
}

/// Held for the duration of one user's exchange.
pub struct UserLockGuard {
    guard: Option<OwnedMutexGuard<()>>,
    user: UserId,
    map: LockMap,
}

impl Drop for UserLockGuard {
    fn drop(&mut self) {
        // Release first so the map holds the only other reference when idle.
        self.guard.take();
        let mut map = self.map.lock().unwrap_or_else(|p| p.into_inner());
        if map.get(&self.user).is_some_and(|l| Arc::strong_count(l) == 1) {
            map.remove(&self.user);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn unknown_user_has_empty_history() {
        let store = InMemoryConversationStore::default();
        assert!(store.history(UserId(7)).await.is_empty());
    }

    #[tokio::test]
    async fn keeps_newest_twenty_in_order() {
        let store = InMemoryConversationStore::default();
        let u = UserId(1);
        for i in 0..25 {
            let role = if i % 2 == 0 { Role::User } else { Role::Assistant };
            store.append(u, role, format!("m{i}")).await;
        }

        let h = store.history(u).await;
        assert_eq!(h.len(), 20);
        let contents: Vec<_> = h.iter().map(|t| t.content.as_str()).collect();
        let expected: Vec<String> = (5..25).map(|i| format!("m{i}")).collect();
        assert_eq!(contents, expected.iter().map(String::as_str).collect::<Vec<_>>());
        assert_eq!(h[0].role, Role::Assistant);
    }

    #[tokio::test]
    async fn clear_resets_and_is_idempotent() {
        let store = InMemoryConversationStore::default();
        let u = UserId(1);
        store.clear(u).await;
        assert!(store.history(u).await.is_empty());

        store.append(u, Role::User, "hi".to_string()).await;
        store.clear(u).await;
        store.clear(u).await;
        assert!(store.history(u).await.is_empty());
    }

    #[tokio::test]
    async fn users_are_isolated() {
        let store = InMemoryConversationStore::default();
        store
            .record_exchange(UserId(1), "q".to_string(), "a".to_string())
            .await;
        assert!(store.history(UserId(2)).await.is_empty());
        assert_eq!(
            store.history(UserId(1)).await,
            vec![Turn::user("q"), Turn::assistant("a")]
        );
    }

    #[tokio::test]
    async fn exchange_respects_limit() {
        let store = InMemoryConversationStore::new(3);
        let u = UserId(1);
        store.record_exchange(u, "q1".into(), "a1".into()).await;
        store.record_exchange(u, "q2".into(), "a2".into()).await;
        assert_eq!(
            store.history(u).await,
            vec![Turn::assistant("a1"), Turn::user("q2"), Turn::assistant("a2")]
        );
    }

    #[tokio::test]
    async fn user_lock_serializes_same_user() {
        let locks = Arc::new(UserLocks::default());
        let guard = locks.lock_user(UserId(1)).await;

        let l2 = locks.clone();
        let waiter = tokio::spawn(async move {
            let _g = l2.lock_user(UserId(1)).await;
        });
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!waiter.is_finished());

        // Other users are not blocked.
        let _other = locks.lock_user(UserId(2)).await;

        drop(guard);
        waiter.await.unwrap();
    }

    #[tokio::test]
    async fn idle_user_locks_are_pruned() {
        let locks = Arc::new(UserLocks::default());
        let guard = locks.lock_user(UserId(1)).await;

        let l2 = locks.clone();
        let waiter = tokio::spawn(async move {
            let _g = l2.lock_user(UserId(1)).await;
        });
        tokio::time::sleep(Duration::from_millis(20)).await;

        // A waiter keeps the entry alive after the first holder leaves.
        drop(guard);
        assert_eq!(locks.tracked_users(), 1);
        waiter.await.unwrap();
        assert_eq!(locks.tracked_users(), 0);

        drop(locks.lock_user(UserId(2)).await);
        drop(locks.lock_user(UserId(3)).await);
        assert_eq!(locks.tracked_users(), 0);
    }
}
