//! File-backed session store
//!
//! The session lives in a single JSON record:
//! ```json
//! { "sessionToken": "...", "sessionTokenIsTemporary": true }
//! ```
//! Writes go to a temporary file that is synced and then renamed over the
//! record, under an exclusive lock file, so the token and its kind always
//! change together.

use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use fs2::FileExt;
use serde::{Deserialize, Serialize};

use crate::domain::result::{Error, Result};
use crate::domain::{Session, SessionKind};
use crate::ports::SessionStore;

/// Record file name inside the data directory
pub const SESSION_FILE_NAME: &str = "session.json";

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionRecord {
    session_token: String,
    #[serde(default)]
    session_token_is_temporary: bool,
}

impl From<&Session> for SessionRecord {
    fn from(session: &Session) -> Self {
        Self {
            session_token: session.id.clone(),
            session_token_is_temporary: session.is_temporary(),
        }
    }
}

impl From<SessionRecord> for Session {
    fn from(record: SessionRecord) -> Self {
        let kind = if record.session_token_is_temporary {
            SessionKind::Temporary
        } else {
            SessionKind::User
        };
        Session {
            id: record.session_token,
            kind,
        }
    }
}

/// Session store persisting to `session.json`
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Store the record at `data_dir/session.json`
    pub fn new(data_dir: &Path) -> Self {
        Self::with_path(data_dir.join(SESSION_FILE_NAME))
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_record(path: &Path) -> Result<Option<Session>> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(storage_error("read session file", e)),
        };

        if content.trim().is_empty() {
            return Ok(None);
        }

        let record: SessionRecord = serde_json::from_str(&content)
            .map_err(|e| Error::storage(format!("corrupt session file {:?}: {}", path, e)))?;

        if record.session_token.is_empty() {
            tracing::warn!(path = ?path, "session file holds an empty token, treating as no session");
            return Ok(None);
        }

        Ok(Some(record.into()))
    }

    fn write_record(path: &Path, record: &SessionRecord) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| storage_error("create data directory", e))?;
        }

        let _lock = FileLock::acquire(path)?;

        let content = serde_json::to_string_pretty(record)
            .map_err(|e| Error::storage(format!("failed to encode session: {}", e)))?;

        let tmp_path = temp_path(path)?;
        let mut tmp_file = File::create(&tmp_path).map_err(|e| storage_error("create temp file", e))?;
        tmp_file
            .write_all(content.as_bytes())
            .map_err(|e| storage_error("write temp file", e))?;
        tmp_file.sync_all().map_err(|e| storage_error("sync temp file", e))?;
        drop(tmp_file);

        fs::rename(&tmp_path, path).map_err(|e| storage_error("replace session file", e))?;
        Ok(())
    }

    fn remove_record(path: &Path) -> Result<()> {
        let _lock = FileLock::acquire(path)?;
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(storage_error("remove session file", e)),
        }
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn get(&self) -> Result<Option<Session>> {
        let path = self.path.clone();
        run_blocking(move || Self::read_record(&path)).await
    }

    async fn put(&self, session: &Session) -> Result<()> {
        let path = self.path.clone();
        let record = SessionRecord::from(session);
        run_blocking(move || Self::write_record(&path, &record)).await
    }

    async fn clear(&self) -> Result<()> {
        let path = self.path.clone();
        run_blocking(move || Self::remove_record(&path)).await
    }
}

async fn run_blocking<T, F>(f: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| Error::storage(format!("session store task failed: {}", e)))?
}

fn storage_error(action: &str, error: std::io::Error) -> Error {
    Error::storage(format!("failed to {}: {}", action, error))
}

fn temp_path(path: &Path) -> Result<PathBuf> {
    let parent = path
        .parent()
        .ok_or_else(|| Error::storage(format!("session path {:?} has no parent directory", path)))?;
    let file_name = path
        .file_name()
        .ok_or_else(|| Error::storage(format!("session path {:?} has no file name", path)))?;
    Ok(parent.join(format!(".{}.tmp", file_name.to_string_lossy())))
}

/// Exclusive lock held for the duration of a write
struct FileLock {
    file: File,
}

impl FileLock {
    fn acquire(path: &Path) -> Result<Self> {
        let lock_path = path.with_extension("lock");
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)
            .map_err(|e| storage_error("open lock file", e))?;
        file.lock_exclusive()
            .map_err(|e| storage_error("lock session file", e))?;
        Ok(Self { file })
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        let _ = self.file.unlock();
    }
}
