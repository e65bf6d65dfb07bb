//! Session lifecycle and registry.
//!
//! A session pairs one ingested document's vector index with its metadata.
//! The registry hands out shared handles and bounds memory by evicting the
//! least recently used session when over capacity, plus an idle sweep the
//! host can schedule.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{Result, SvarError};
use crate::vector_index::VectorIndex;

/// An ingested document ready to answer queries.
#[derive(Debug)]
pub struct Session {
    id: Uuid,
    source_name: String,
    created_at: DateTime<Utc>,
    index: VectorIndex,
    last_active: AtomicI64,
}

impl Session {
    /// Create a session over a fully built index.
    pub fn new(id: Uuid, source_name: impl Into<String>, index: VectorIndex) -> Self {
        Self {
            id,
            source_name: source_name.into(),
            created_at: Utc::now(),
            index,
            last_active: AtomicI64::new(now_nanos()),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// The session's vector index.
    pub fn index(&self) -> &VectorIndex {
        &self.index
    }

    /// Number of chunks indexed for this session.
    pub fn chunk_count(&self) -> usize {
        self.index.len()
    }

    /// Metadata snapshot for listings and status responses.
    pub fn info(&self) -> SessionInfo {
        SessionInfo {
            session_id: self.id,
            source_name: self.source_name.clone(),
            chunk_count: self.chunk_count(),
            created_at: self.created_at,
        }
    }

    fn touch(&self) {
        self.last_active.store(now_nanos(), Ordering::Relaxed);
    }

    fn last_active(&self) -> i64 {
        self.last_active.load(Ordering::Relaxed)
    }
}

fn now_nanos() -> i64 {
    Utc::now().timestamp_nanos_opt().unwrap_or(i64::MAX)
}

/// Metadata describing a live session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionInfo {
    pub session_id: Uuid,
    pub source_name: String,
    pub chunk_count: usize,
    pub created_at: DateTime<Utc>,
}

/// Tracks live sessions by id.
pub struct SessionRegistry {
    sessions: RwLock<HashMap<Uuid, Arc<Session>>>,
    max_sessions: usize,
}

impl SessionRegistry {
    /// Create a registry holding at most `max_sessions` sessions.
    /// Zero disables the capacity bound.
    pub fn new(max_sessions: usize) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            max_sessions,
        }
    }

    /// Register a fully built session.
    ///
    /// At capacity, the least recently used session is evicted first.
    pub fn register(&self, session: Session) -> Arc<Session> {
        let session = Arc::new(session);
        let mut sessions = self.sessions.write().unwrap();

        if self.max_sessions > 0 && sessions.len() >= self.max_sessions {
            let oldest = sessions
                .values()
                .min_by_key(|s| (s.last_active(), s.id()))
                .map(|s| s.id());
            if let Some(id) = oldest {
                sessions.remove(&id);
                info!(session_id = %id, "Evicted least recently used session");
            }
        }

        sessions.insert(session.id(), Arc::clone(&session));
        session
    }

    /// Look up a session and mark it active.
    pub fn get(&self, id: Uuid) -> Result<Arc<Session>> {
        let sessions = self.sessions.read().unwrap();
        let session = sessions
            .get(&id)
            .cloned()
            .ok_or(SvarError::SessionNotFound(id))?;
        session.touch();
        Ok(session)
    }

    /// Remove a session, returning its final metadata.
    pub fn clear(&self, id: Uuid) -> Result<SessionInfo> {
        let mut sessions = self.sessions.write().unwrap();
        let session = sessions.remove(&id).ok_or(SvarError::SessionNotFound(id))?;
        Ok(session.info())
    }

    /// Metadata for one session, without marking it active.
    pub fn info(&self, id: Uuid) -> Result<SessionInfo> {
        let sessions = self.sessions.read().unwrap();
        sessions
            .get(&id)
            .map(|s| s.info())
            .ok_or(SvarError::SessionNotFound(id))
    }

    /// Metadata for all live sessions, newest first.
    pub fn list(&self) -> Vec<SessionInfo> {
        let sessions = self.sessions.read().unwrap();
        let mut infos: Vec<SessionInfo> = sessions.values().map(|s| s.info()).collect();
        infos.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        infos
    }

    /// Number of live sessions.
    pub fn len(&self) -> usize {
        self.sessions.read().unwrap().len()
    }

    /// Whether any sessions are live.
    pub fn is_empty(&self) -> bool {
        self.sessions.read().unwrap().is_empty()
    }

    /// Remove sessions idle longer than `max_idle`, returning how many were
    /// evicted. A zero duration disables idle eviction.
    pub fn evict_idle(&self, max_idle: Duration) -> usize {
        if max_idle.is_zero() {
            return 0;
        }

        let cutoff = now_nanos() - i64::try_from(max_idle.as_nanos()).unwrap_or(i64::MAX);
        let mut sessions = self.sessions.write().unwrap();
        let expired: Vec<Uuid> = sessions
            .values()
            .filter(|s| s.last_active() < cutoff)
            .map(|s| s.id())
            .collect();
        for id in &expired {
            sessions.remove(id);
            debug!(session_id = %id, "Evicted idle session");
        }
        expired.len()
    }
}
