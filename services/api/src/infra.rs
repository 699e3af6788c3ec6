use chrono::{DateTime, Duration, Utc};
use job_application::workflows::application::{
    RepositoryError, SessionId, SessionRecord, SessionRepository,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tracing::debug;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local session store. With a TTL set, sessions created more than the TTL before a new
/// insert are swept, submitted or not.
#[derive(Default, Clone)]
pub(crate) struct InMemorySessionRepository {
    records: Arc<Mutex<HashMap<SessionId, SessionRecord>>>,
    ttl: Option<Duration>,
}

impl SessionRepository for InMemorySessionRepository {
    fn insert(&self, record: SessionRecord) -> Result<SessionRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if let Some(ttl) = self.ttl {
            let removed = sweep(&mut guard, record.created_at - ttl);
            if removed > 0 {
                debug!(removed, "expired sessions swept");
            }
        }
        if guard.contains_key(&record.session_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.session_id.clone(), record.clone());
        Ok(record)
    }

    fn fetch(&self, id: &SessionId) -> Result<Option<SessionRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn modify<T, F>(&self, id: &SessionId, apply: F) -> Result<T, RepositoryError>
    where
        F: FnOnce(&mut SessionRecord) -> T,
    {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        let record = guard.get_mut(id).ok_or(RepositoryError::NotFound)?;
        Ok(apply(record))
    }
}

impl InMemorySessionRepository {
    pub(crate) fn with_ttl(ttl: Duration) -> Self {
        Self {
            records: Arc::default(),
            ttl: Some(ttl),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.records.lock().expect("repository mutex poisoned").len()
    }

    /// Drop every session created before `now - ttl`. Returns how many were removed.
    pub(crate) fn purge_expired(&self, now: DateTime<Utc>) -> usize {
        let Some(ttl) = self.ttl else {
            return 0;
        };
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        sweep(&mut guard, now - ttl)
    }
}

fn sweep(records: &mut HashMap<SessionId, SessionRecord>, cutoff: DateTime<Utc>) -> usize {
    let before = records.len();
    records.retain(|_, record| record.created_at >= cutoff);
    before - records.len()
}
