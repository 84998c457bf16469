//! In-memory registry of analyzed uploads.
//!
//! Each upload gets its own session holding an immutable [`Analysis`].
//! Lookups clone an `Arc`, so a reader never sees a half-built analysis and
//! a new upload never changes what another client is looking at.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use adlens_core::Analysis;
use chrono::{DateTime, TimeDelta, Utc};
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};

pub type SessionId = Uuid;

#[derive(Debug)]
pub struct Session {
    pub id: SessionId,
    pub analysis: Arc<Analysis>,
    pub created_at: DateTime<Utc>,
    /// Milliseconds since the epoch; updated under the read lock
    last_access_ms: AtomicI64,
}

impl Session {
    fn new(id: SessionId, analysis: Analysis, now: DateTime<Utc>) -> Self {
        Self {
            id,
            analysis: Arc::new(analysis),
            created_at: now,
            last_access_ms: AtomicI64::new(now.timestamp_millis()),
        }
    }

    pub fn last_access(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.last_access_ms.load(Ordering::Relaxed))
            .unwrap_or(self.created_at)
    }

    fn touch(&self, now: DateTime<Utc>) {
        self.last_access_ms
            .fetch_max(now.timestamp_millis(), Ordering::Relaxed);
    }

    fn is_expired(&self, now: DateTime<Utc>, ttl: Option<TimeDelta>) -> bool {
        ttl.is_some_and(|ttl| now - self.last_access() > ttl)
    }
}

#[derive(Debug)]
pub struct SessionStore {
    sessions: RwLock<HashMap<SessionId, Arc<Session>>>,
    ttl: Option<TimeDelta>,
    capacity: usize,
}

impl SessionStore {
    /// `ttl` of `None` keeps idle sessions until they are evicted by capacity.
    pub fn new(ttl: Option<Duration>, capacity: usize) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl: ttl.and_then(|d| TimeDelta::from_std(d).ok()),
            capacity: capacity.max(1),
        }
    }

    pub fn len(&self) -> ApiResult<usize> {
        Ok(self.sessions.read()?.len())
    }

    pub fn is_empty(&self) -> ApiResult<bool> {
        Ok(self.len()? == 0)
    }

    /// Register a finished analysis under a fresh id.
    pub fn insert(&self, analysis: Analysis) -> ApiResult<Arc<Session>> {
        self.insert_at(analysis, Utc::now())
    }

    pub fn get(&self, id: &str) -> ApiResult<Arc<Session>> {
        self.get_at(id, Utc::now())
    }

    pub fn remove(&self, id: &str) -> ApiResult<()> {
        self.remove_at(id, Utc::now())
    }

    /// Drop every expired session. Returns how many were dropped.
    pub fn purge_expired(&self) -> ApiResult<usize> {
        self.purge_expired_at(Utc::now())
    }

    fn insert_at(&self, analysis: Analysis, now: DateTime<Utc>) -> ApiResult<Arc<Session>> {
        let mut sessions = self.sessions.write()?;
        sessions.retain(|_, s| !s.is_expired(now, self.ttl));

        while sessions.len() >= self.capacity {
            let Some(oldest) = sessions
                .values()
                .min_by_key(|s| s.last_access())
                .map(|s| s.id)
            else {
                break;
            };
            sessions.remove(&oldest);
            tracing::debug!(session = %oldest, "Evicted least recently used session");
        }

        let session = Arc::new(Session::new(Uuid::new_v4(), analysis, now));
        sessions.insert(session.id, Arc::clone(&session));
        Ok(session)
    }

    fn get_at(&self, id: &str, now: DateTime<Utc>) -> ApiResult<Arc<Session>> {
        let key = parse_id(id)?;
        let sessions = self.sessions.read()?;
        match sessions.get(&key) {
            Some(session) if !session.is_expired(now, self.ttl) => {
                session.touch(now);
                Ok(Arc::clone(session))
            }
            _ => Err(ApiError::SessionNotFound(id.to_string())),
        }
    }

    fn remove_at(&self, id: &str, now: DateTime<Utc>) -> ApiResult<()> {
        let key = parse_id(id)?;
        let removed = self.sessions.write()?.remove(&key);
        match removed {
            Some(session) if !session.is_expired(now, self.ttl) => Ok(()),
            _ => Err(ApiError::SessionNotFound(id.to_string())),
        }
    }

    fn purge_expired_at(&self, now: DateTime<Utc>) -> ApiResult<usize> {
        let mut sessions = self.sessions.write()?;
        let before = sessions.len();
        sessions.retain(|_, s| !s.is_expired(now, self.ttl));
        Ok(before - sessions.len())
    }
}

fn parse_id(id: &str) -> ApiResult<SessionId> {
    Uuid::parse_str(id).map_err(|_| ApiError::SessionNotFound(id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use adlens_core::read_delimited;

    fn analysis(name: &str) -> Analysis {
        let csv = "Nome do Produto,Cliques\nA,1\n";
        let table = read_delimited(csv.as_bytes()).unwrap();
        Analysis::from_table(name, &table).unwrap()
    }

    fn at(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000 + secs, 0).unwrap()
    }

    #[test]
    fn test_insert_and_get() {
        let store = SessionStore::new(None, 8);
        let session = store.insert(analysis("a.csv")).unwrap();

        let found = store.get(&session.id.to_string()).unwrap();
        assert_eq!(found.analysis.source(), "a.csv");
        assert!(Arc::ptr_eq(&found.analysis, &session.analysis));
    }

    #[test]
    fn test_unknown_and_malformed_ids() {
        let store = SessionStore::new(None, 8);
        assert!(matches!(
            store.get(&Uuid::new_v4().to_string()),
            Err(ApiError::SessionNotFound(_))
        ));
        assert!(matches!(
            store.get("not-a-uuid"),
            Err(ApiError::SessionNotFound(_))
        ));
    }

    #[test]
    fn test_each_upload_gets_its_own_session() {
        let store = SessionStore::new(None, 8);
        let first = store.insert(analysis("a.csv")).unwrap();
        let second = store.insert(analysis("b.csv")).unwrap();

        assert_ne!(first.id, second.id);
        let first = store.get(&first.id.to_string()).unwrap();
        assert_eq!(first.analysis.source(), "a.csv");
        assert_eq!(store.len().unwrap(), 2);
    }

    #[test]
    fn test_idle_sessions_expire() {
        let store = SessionStore::new(Some(Duration::from_secs(60)), 8);
        let session = store.insert_at(analysis("a.csv"), at(0)).unwrap();
        let id = session.id.to_string();

        assert!(store.get_at(&id, at(50)).is_ok());
        // access at 50 pushes expiry to 110
        assert!(store.get_at(&id, at(100)).is_ok());
        assert!(store.get_at(&id, at(161)).is_err());

        assert_eq!(store.purge_expired_at(at(161)).unwrap(), 1);
        assert!(store.is_empty().unwrap());
    }

    #[test]
    fn test_capacity_evicts_least_recently_used() {
        let store = SessionStore::new(None, 2);
        let a = store.insert_at(analysis("a.csv"), at(0)).unwrap();
        let b = store.insert_at(analysis("b.csv"), at(1)).unwrap();
        store.get_at(&a.id.to_string(), at(2)).unwrap();

        let c = store.insert_at(analysis("c.csv"), at(3)).unwrap();

        assert_eq!(store.len().unwrap(), 2);
        assert!(store.get_at(&a.id.to_string(), at(4)).is_ok());
        assert!(store.get_at(&b.id.to_string(), at(4)).is_err());
        assert!(store.get_at(&c.id.to_string(), at(4)).is_ok());
    }

    #[test]
    fn test_remove() {
        let store = SessionStore::new(None, 8);
        let session = store.insert(analysis("a.csv")).unwrap();
        let id = session.id.to_string();

        store.remove(&id).unwrap();
        assert!(store.get(&id).is_err());
        assert!(matches!(store.remove(&id), Err(ApiError::SessionNotFound(_))));
    }
}
