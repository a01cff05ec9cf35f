use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info};
use uuid::Uuid;

use crate::insights::InsightSlot;
use crate::models::record::ResumeRecord;

/// One editing session: the record being edited plus its per-session side state.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: Uuid,
    pub record: ResumeRecord,
    pub insights: InsightSlot,
    pub export_in_flight: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Monotonic twin of `updated_at`, used for idle expiry.
    #[serde(skip)]
    last_active: Instant,
}

impl Session {
    fn new(record: ResumeRecord) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            record,
            insights: InsightSlot::default(),
            export_in_flight: false,
            created_at: now,
            updated_at: now,
            last_active: Instant::now(),
        }
    }
}

/// In-memory session map shared through `AppState`.
///
/// Locks are held only for the synchronous closure passed to [`SessionStore::update`];
/// callers never hold one across an `.await`.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<Uuid, Session>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn create(&self, record: ResumeRecord) -> Session {
        let session = Session::new(record);
        self.inner.write().await.insert(session.id, session.clone());
        info!(session_id = %session.id, "Session created");
        session
    }

    /// A copy of the session as it is right now.
    pub async fn snapshot(&self, id: Uuid) -> Option<Session> {
        self.inner.read().await.get(&id).cloned()
    }

    pub async fn remove(&self, id: Uuid) -> bool {
        let removed = self.inner.write().await.remove(&id).is_some();
        if removed {
            info!(session_id = %id, "Session ended");
        }
        removed
    }

    /// Runs `f` against the session under the write lock. `None` when the id is unknown.
    pub async fn update<R>(&self, id: Uuid, f: impl FnOnce(&mut Session) -> R) -> Option<R> {
        let mut sessions = self.inner.write().await;
        let session = sessions.get_mut(&id)?;
        let out = f(session);
        session.updated_at = Utc::now();
        session.last_active = Instant::now();
        Some(out)
    }

    /// Claims the session's export slot. `Some(false)` when an export is already running.
    pub async fn begin_export(&self, id: Uuid) -> Option<bool> {
        self.update(id, |session| {
            if session.export_in_flight {
                false
            } else {
                session.export_in_flight = true;
                true
            }
        })
        .await
    }

    /// Releases the export slot. A session deleted mid-export is ignored.
    pub async fn finish_export(&self, id: Uuid) {
        if self
            .update(id, |session| session.export_in_flight = false)
            .await
            .is_none()
        {
            debug!(session_id = %id, "Session gone before export finished");
        }
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    /// Drops sessions untouched for longer than `ttl`. A session with an export running is kept.
    pub async fn evict_idle(&self, ttl: Duration) -> usize {
        let now = Instant::now();
        let mut sessions = self.inner.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| {
            session.export_in_flight || now.duration_since(session.last_active) <= ttl
        });
        let evicted = before - sessions.len();
        if evicted > 0 {
            info!(evicted, remaining = sessions.len(), "Expired idle sessions");
        }
        evicted
    }

    /// Runs [`SessionStore::evict_idle`] every `every` until the runtime shuts down.
    pub fn spawn_sweeper(&self, ttl: Duration, every: Duration) -> JoinHandle<()> {
        let store = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                store.evict_idle(ttl).await;
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_snapshot_remove() {
        let store = SessionStore::new();
        let session = store.create(ResumeRecord::default()).await;
        assert_eq!(store.len().await, 1);
        assert_eq!(store.snapshot(session.id).await.unwrap().id, session.id);
        assert!(store.remove(session.id).await);
        assert!(!store.remove(session.id).await);
        assert!(store.snapshot(session.id).await.is_none());
    }

    #[tokio::test]
    async fn test_update_unknown_session_is_none() {
        let store = SessionStore::new();
        assert!(store.update(Uuid::new_v4(), |_| ()).await.is_none());
    }

    #[tokio::test]
    async fn test_update_mutates_in_place() {
        let store = SessionStore::new();
        let id = store.create(ResumeRecord::default()).await.id;
        store
            .update(id, |s| s.record.personal_info.full_name = "Ada".to_string())
            .await
            .unwrap();
        assert_eq!(store.snapshot(id).await.unwrap().record.personal_info.full_name, "Ada");
    }

    #[tokio::test]
    async fn test_second_export_is_refused_until_finished() {
        let store = SessionStore::new();
        let id = store.create(ResumeRecord::default()).await.id;
        assert_eq!(store.begin_export(id).await, Some(true));
        assert_eq!(store.begin_export(id).await, Some(false));
        store.finish_export(id).await;
        assert_eq!(store.begin_export(id).await, Some(true));
        assert_eq!(store.begin_export(Uuid::new_v4()).await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_idle_sessions_expire_and_active_ones_stay() {
        let store = SessionStore::new();
        let idle = store.create(ResumeRecord::default()).await.id;
        let active = store.create(ResumeRecord::default()).await.id;

        tokio::time::advance(Duration::from_secs(50)).await;
        store.update(active, |_| ()).await.unwrap();
        tokio::time::advance(Duration::from_secs(20)).await;

        assert_eq!(store.evict_idle(Duration::from_secs(60)).await, 1);
        assert!(store.snapshot(idle).await.is_none());
        assert!(store.snapshot(active).await.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_session_with_running_export_is_not_expired() {
        let store = SessionStore::new();
        let id = store.create(ResumeRecord::default()).await.id;
        assert_eq!(store.begin_export(id).await, Some(true));
        tokio::time::advance(Duration::from_secs(120)).await;
        assert_eq!(store.evict_idle(Duration::from_secs(60)).await, 0);
        assert!(store.snapshot(id).await.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweeper_evicts_on_its_own() {
        let store = SessionStore::new();
        let id = store.create(ResumeRecord::default()).await.id;
        let sweeper = store.spawn_sweeper(Duration::from_secs(60), Duration::from_secs(10));

        tokio::time::sleep(Duration::from_secs(30)).await;
        assert!(store.snapshot(id).await.is_some());
        tokio::time::sleep(Duration::from_secs(45)).await;
        assert!(store.snapshot(id).await.is_none());
        sweeper.abort();
    }
}
