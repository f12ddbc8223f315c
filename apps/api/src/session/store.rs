//! Key-value storage for in-progress form drafts.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::debug;

pub const DEFAULT_IDLE_TTL: Duration = Duration::from_secs(24 * 60 * 60);
pub const DEFAULT_MAX_SESSIONS: usize = 10_000;

/// String key-value storage the form session writes drafts into, namespaced by session id.
///
/// Injected into `AppState` so the draft flow never depends on a concrete backend.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, session_id: &str, key: &str) -> Option<String>;
    fn put(&self, session_id: &str, key: &str, value: String);
}

#[derive(Debug)]
struct SessionEntry {
    values: HashMap<String, String>,
    last_touched: Instant,
}

/// Process-local store. Contents are lost on restart.
///
/// Sessions idle for longer than `idle_ttl` are treated as gone and dropped by
/// `evict_idle`. Opening a new session while `max_sessions` are live first evicts idle
/// ones, then the least recently touched.
#[derive(Debug)]
pub struct MemoryStore {
    sessions: DashMap<String, SessionEntry>,
    idle_ttl: Duration,
    max_sessions: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_limits(DEFAULT_IDLE_TTL, DEFAULT_MAX_SESSIONS)
    }

    pub fn with_limits(idle_ttl: Duration, max_sessions: usize) -> Self {
        Self {
            sessions: DashMap::new(),
            idle_ttl,
            max_sessions,
        }
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    /// Drops every idle session and returns how many were dropped.
    pub fn evict_idle(&self) -> usize {
        let before = self.sessions.len();
        let now = Instant::now();
        self.sessions
            .retain(|_, entry| now.duration_since(entry.last_touched) < self.idle_ttl);
        before.saturating_sub(self.sessions.len())
    }

    fn expire_if_idle(&self, session_id: &str) {
        self.sessions
            .remove_if(session_id, |_, entry| entry.last_touched.elapsed() >= self.idle_ttl);
    }

    fn make_room(&self) {
        if self.sessions.len() < self.max_sessions {
            return;
        }
        self.evict_idle();
        while self.sessions.len() >= self.max_sessions {
            let oldest = self
                .sessions
                .iter()
                .min_by_key(|entry| entry.value().last_touched)
                .map(|entry| entry.key().clone());
            match oldest {
                Some(session_id) => {
                    debug!("Session cap reached, evicting least recent session {session_id}");
                    self.sessions.remove(&session_id);
                }
                None => break,
            }
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueStore for MemoryStore {
    /// Reading refreshes the session's idle timer.
    fn get(&self, session_id: &str, key: &str) -> Option<String> {
        self.expire_if_idle(session_id);
        let mut entry = self.sessions.get_mut(session_id)?;
        entry.last_touched = Instant::now();
        entry.values.get(key).cloned()
    }

    fn put(&self, session_id: &str, key: &str, value: String) {
        self.expire_if_idle(session_id);
        if !self.sessions.contains_key(session_id) {
            self.make_room();
        }

        let now = Instant::now();
        let mut entry = self
            .sessions
            .entry(session_id.to_string())
            .or_insert_with(|| SessionEntry {
                values: HashMap::new(),
                last_touched: now,
            });
        entry.values.insert(key.to_string(), value);
        entry.last_touched = now;
    }
}

/// Runs `evict_idle` every `period` for as long as the runtime lives.
pub fn spawn_sweeper(store: Arc<MemoryStore>, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        loop {
            ticker.tick().await;
            let evicted = store.evict_idle();
            if evicted > 0 {
                debug!("Evicted {evicted} idle form sessions");
            }
        }
    })
}
