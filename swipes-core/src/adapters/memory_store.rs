//! In-memory session store
//!
//! Nothing survives the process. Counts writes so callers can assert that
//! an operation left the store untouched.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::result::{Error, Result};
use crate::domain::Session;
use crate::ports::SessionStore;

#[derive(Debug, Default)]
pub struct MemorySessionStore {
    session: Mutex<Option<Session>>,
    writes: AtomicUsize,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a session already stored (does not count as a write)
    pub fn with_session(session: Session) -> Self {
        Self {
            session: Mutex::new(Some(session)),
            writes: AtomicUsize::new(0),
        }
    }

    /// Number of `put` and `clear` calls so far
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn slot(&self) -> Result<std::sync::MutexGuard<'_, Option<Session>>> {
        self.session
            .lock()
            .map_err(|e| Error::storage(format!("Lock poisoned: {}", e)))
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn get(&self) -> Result<Option<Session>> {
        Ok(self.slot()?.clone())
    }

    async fn put(&self, session: &Session) -> Result<()> {
        *self.slot()? = Some(session.clone());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        *self.slot()? = None;
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_counts_writes_not_reads() {
        let store = MemorySessionStore::with_session(Session::user("tok1"));
        assert_eq!(store.get().await.unwrap(), Some(Session::user("tok1")));
        assert_eq!(store.write_count(), 0);

        store.clear().await.unwrap();
        store.put(&Session::temporary("tmp1")).await.unwrap();
        assert_eq!(store.write_count(), 2);
        assert_eq!(store.get().await.unwrap(), Some(Session::temporary("tmp1")));
    }
}
