use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, RwLock};
use tokio::time::Instant;
use tracing::info;
use uuid::Uuid;

use crate::session::state::SessionState;

pub type SessionId = Uuid;
pub type SessionHandle = Arc<Mutex<SessionState>>;

struct Entry {
    handle: SessionHandle,
    last_seen: Instant,
}

impl Entry {
    fn is_idle(&self, now: Instant, ttl: Duration) -> bool {
        now.duration_since(self.last_seen) >= ttl
    }
}

/// Process-local registry of live sessions. Nothing here outlives the
/// process.
///
/// Each session sits behind its own mutex; a render pass holds it for its
/// whole duration, so writes within one session are serialized. Sessions
/// untouched for `ttl` expire: lookups stop finding them and the next
/// `create` sweeps them out.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<SessionId, Entry>>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: Arc::default(),
            ttl,
        }
    }

    pub async fn create(&self, state: SessionState) -> (SessionId, SessionHandle) {
        let id = Uuid::new_v4();
        let handle = Arc::new(Mutex::new(state));
        let now = Instant::now();

        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, entry| !entry.is_idle(now, self.ttl));
        let expired = before - sessions.len();
        if expired > 0 {
            info!("Expired {expired} idle sessions");
        }

        sessions.insert(
            id,
            Entry {
                handle: handle.clone(),
                last_seen: now,
            },
        );
        info!("Session {id} created ({} live)", sessions.len());
        (id, handle)
    }

    /// Looks up a live session and marks it as used.
    pub async fn get(&self, id: &SessionId) -> Option<SessionHandle> {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;
        let entry = sessions.get_mut(id)?;
        if entry.is_idle(now, self.ttl) {
            sessions.remove(id);
            info!("Session {id} expired");
            return None;
        }
        entry.last_seen = now;
        Some(entry.handle.clone())
    }

    pub async fn remove(&self, id: &SessionId) -> bool {
        self.sessions.write().await.remove(id).is_some()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::state::Role;

    const TTL: Duration = Duration::from_secs(60);

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let store = SessionStore::new(TTL);
        let (a, handle_a) = store.create(SessionState::default()).await;
        let (b, _) = store.create(SessionState::default()).await;
        assert_ne!(a, b);

        handle_a.lock().await.role = Some(Role::Recruiter);

        let b_state = store.get(&b).await.unwrap();
        assert_eq!(b_state.lock().await.role, None);
        let a_state = store.get(&a).await.unwrap();
        assert_eq!(a_state.lock().await.role, Some(Role::Recruiter));
    }

    #[tokio::test]
    async fn test_remove_discards_session() {
        let store = SessionStore::new(TTL);
        let (id, _) = store.create(SessionState::default()).await;
        assert_eq!(store.len().await, 1);
        assert!(store.remove(&id).await);
        assert!(store.get(&id).await.is_none());
        assert!(!store.remove(&id).await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_idle_sessions_are_swept_on_create() {
        let store = SessionStore::new(TTL);
        let (idle, _) = store.create(SessionState::default()).await;
        let (active, _) = store.create(SessionState::default()).await;

        tokio::time::advance(Duration::from_secs(40)).await;
        assert!(store.get(&active).await.is_some());
        tokio::time::advance(Duration::from_secs(30)).await;

        store.create(SessionState::default()).await;
        assert_eq!(store.len().await, 2);
        assert!(store.get(&idle).await.is_none());
        assert!(store.get(&active).await.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_idle_session_lookup_expires_it() {
        let store = SessionStore::new(TTL);
        let (id, _) = store.create(SessionState::default()).await;
        tokio::time::advance(TTL).await;

        assert!(store.get(&id).await.is_none());
        assert_eq!(store.len().await, 0);
    }
}
