//! Message store — the community message log.
//!
//! DESIGN
//! ======
//! The log is a flat JSON array in `messages.json`, newest record last,
//! truncated to the most recent `cap` records on every append. The whole
//! file is rewritten per append; at ten retained records that is cheaper
//! than being clever about it. One async lock serializes writers so
//! concurrent submissions cannot interleave file writes.
//!
//! ERROR HANDLING
//! ==============
//! A corrupt or missing file on startup logs and starts empty rather than
//! refusing to boot. Losing ten display messages beats a dead station.

use std::path::PathBuf;
use std::sync::Arc;

use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tokio::sync::{Mutex, RwLock};
use tracing::{info, warn};

use updates::MessageRecord;

pub const DEFAULT_MESSAGE_CAP: usize = 10;

/// Display name used when the submitter leaves the name field blank.
const ANONYMOUS: &str = "Anonymous";

// =============================================================================
// ERROR TYPE
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The submitted message text was empty after trimming.
    #[error("message text is empty")]
    EmptyMessage,
    #[error("message file io: {0}")]
    Io(#[from] std::io::Error),
    #[error("message encode failed: {0}")]
    Encode(#[from] serde_json::Error),
}

// =============================================================================
// STORE
// =============================================================================

/// Capped append-only message log backed by a JSON array file.
#[derive(Clone)]
pub struct MessageStore {
    inner: Arc<Inner>,
}

struct Inner {
    path: PathBuf,
    cap: usize,
    records: RwLock<Vec<MessageRecord>>,
    /// Serializes append + file rewrite across concurrent submitters.
    writer: Mutex<()>,
}

impl MessageStore {
    /// Open the store, loading any existing records from `path`.
    ///
    /// A missing file starts an empty log. A file that exists but does not
    /// parse is logged and treated as empty; the next append overwrites it.
    ///
    /// # Errors
    ///
    /// Returns an I/O error for anything other than a missing file.
    pub fn open(path: impl Into<PathBuf>, cap: usize) -> Result<Self, StoreError> {
        let path = path.into();
        let records = match std::fs::read_to_string(&path) {
            Ok(text) => match serde_json::from_str::<Vec<MessageRecord>>(&text) {
                Ok(mut records) => {
                    let len = records.len();
                    if len > cap {
                        records.drain(..len - cap);
                    }
                    info!(count = records.len(), path = %path.display(), "message log loaded");
                    records
                }
                Err(e) => {
                    warn!(error = %e, path = %path.display(), "message log unreadable — starting empty");
                    Vec::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(StoreError::Io(e)),
        };

        Ok(Self {
            inner: Arc::new(Inner { path, cap: cap.max(1), records: RwLock::new(records), writer: Mutex::new(()) }),
        })
    }

    /// Append a message and rewrite the backing file.
    ///
    /// Blank usernames become `"Anonymous"`; both fields are trimmed.
    ///
    /// # Errors
    ///
    /// [`StoreError::EmptyMessage`] for blank text, or an I/O error if the
    /// file rewrite fails (the in-memory log is already updated by then;
    /// the next successful append re-syncs the file).
    pub async fn append(&self, username: &str, message: &str) -> Result<MessageRecord, StoreError> {
        let message = message.trim();
        if message.is_empty() {
            return Err(StoreError::EmptyMessage);
        }
        let username = match username.trim() {
            "" => ANONYMOUS,
            name => name,
        };

        let record = new_record(username, message);

        let _writer = self.inner.writer.lock().await;
        let snapshot = {
            let mut records = self.inner.records.write().await;
            records.push(record.clone());
            let len = records.len();
            if len > self.inner.cap {
                records.drain(..len - self.inner.cap);
            }
            records.clone()
        };

        let json = serde_json::to_vec_pretty(&snapshot)?;
        tokio::fs::write(&self.inner.path, json).await?;

        info!(id = %record.id, username = %record.username, "message stored");
        Ok(record)
    }

    /// Most recent message, if any.
    pub async fn latest(&self) -> Option<MessageRecord> {
        self.inner.records.read().await.last().cloned()
    }

    /// All retained messages in insertion order, newest last.
    pub async fn all(&self) -> Vec<MessageRecord> {
        self.inner.records.read().await.clone()
    }
}

// =============================================================================
// HELPERS
// =============================================================================

fn new_record(username: &str, message: &str) -> MessageRecord {
    let now = OffsetDateTime::now_utc();
    let mut id = uuid::Uuid::new_v4().simple().to_string();
    id.truncate(8);

    MessageRecord {
        id,
        username: username.to_owned(),
        message: message.to_owned(),
        timestamp: now.format(&Rfc3339).unwrap_or_default(),
        unix_time: now.unix_timestamp(),
    }
}

/// Seconds since the Unix epoch.
pub(crate) fn now_unix() -> i64 {
    OffsetDateTime::now_utc().unix_timestamp()
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
