use chrono::Utc;
use frontdesk_core::types::{Intent, MemoryRecord, TranscriptEntry};
use frontdesk_core::Result;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};

/// SQLite-backed interaction memory.
///
/// Two independent tables: `user_memory` holds one append-only
/// `MemoryRecord` per classified message, `messages` holds the raw
/// conversation transcript. They are pruned separately so classification
/// history and transcript retention do not have to agree.
///
/// The store is `Clone` over a shared connection; the connection mutex plus
/// SQLite's write serialization give same-process, same-key read-your-write
/// ordering for `remember` / `recall_latest`. No cross-process ordering is
/// claimed.
#[derive(Clone)]
pub struct MemoryStore {
    inner: Arc<Mutex<Connection>>,
    db_path: PathBuf,
}

impl MemoryStore {
    /// Open (or create) the memory database at the given path.
    pub fn open(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                frontdesk_core::Error::Storage(format!("Failed to create db directory: {}", e))
            })?;
        }

        let conn = Connection::open(db_path).map_err(|e| {
            frontdesk_core::Error::Storage(format!("Failed to open memory db: {}", e))
        })?;

        // Enable WAL mode for better concurrent read performance
        conn.execute_batch("PRAGMA journal_mode=WAL;").ok();

        let store = Self {
            inner: Arc::new(Mutex::new(conn)),
            db_path: db_path.to_path_buf(),
        };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> Result<()> {
        let conn = self.lock()?;

        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS user_memory (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id TEXT NOT NULL,
                tenant_id TEXT NOT NULL,
                intent TEXT NOT NULL,
                message TEXT NOT NULL,
                confidence REAL NOT NULL,
                created_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_user_memory_key
                ON user_memory(user_id, tenant_id);

            CREATE TABLE IF NOT EXISTS messages (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id TEXT NOT NULL,
                tenant_id TEXT NOT NULL,
                message TEXT NOT NULL,
                reply TEXT NOT NULL,
                created_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_messages_key
                ON messages(user_id, tenant_id);
            ",
        )
        .map_err(|e| {
            frontdesk_core::Error::Storage(format!("Failed to init memory schema: {}", e))
        })?;

        debug!("Memory store schema initialized");
        Ok(())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>> {
        self.inner
            .lock()
            .map_err(|e| frontdesk_core::Error::Storage(format!("Lock error: {}", e)))
    }

    /// Append one classification record for the (user, tenant) key.
    pub fn remember(
        &self,
        user_id: &str,
        tenant_id: &str,
        intent: Intent,
        message_text: &str,
        confidence: f64,
    ) -> Result<()> {
        let conn = self.lock()?;
        let now = Utc::now().to_rfc3339();

        conn.execute(
            "INSERT INTO user_memory (user_id, tenant_id, intent, message, confidence, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![user_id, tenant_id, intent.as_str(), message_text, confidence, now],
        )
        .map_err(|e| frontdesk_core::Error::Storage(format!("Insert error: {}", e)))?;

        debug!(user_id, tenant_id, intent = %intent, "Memory record inserted");
        Ok(())
    }

    /// Most recently written record for the key, or `None` when the key has
    /// never been seen.
    pub fn recall_latest(&self, user_id: &str, tenant_id: &str) -> Result<Option<MemoryRecord>> {
        let conn = self.lock()?;

        conn.query_row(
            "SELECT user_id, tenant_id, intent, message, confidence, created_at
             FROM user_memory
             WHERE user_id = ?1 AND tenant_id = ?2
             ORDER BY id DESC LIMIT 1",
            params![user_id, tenant_id],
            |row| {
                let intent_str: String = row.get("intent")?;
                Ok(MemoryRecord {
                    user_id: row.get("user_id")?,
                    tenant_id: row.get("tenant_id")?,
                    intent: Intent::from_str(&intent_str).unwrap_or_else(|| {
                        warn!(intent = %intent_str, "Unknown intent in memory row, using general");
                        Intent::General
                    }),
                    message_text: row.get("message")?,
                    confidence: row.get("confidence")?,
                    created_at: row.get("created_at")?,
                })
            },
        )
        .optional()
        .map_err(|e| frontdesk_core::Error::Storage(format!("Recall error: {}", e)))
    }

    /// Append one raw conversation turn to the transcript.
    pub fn log_message(
        &self,
        user_id: &str,
        tenant_id: &str,
        message: &str,
        reply: &str,
    ) -> Result<()> {
        let conn = self.lock()?;
        let now = Utc::now().to_rfc3339();

        conn.execute(
            "INSERT INTO messages (user_id, tenant_id, message, reply, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![user_id, tenant_id, message, reply, now],
        )
        .map_err(|e| frontdesk_core::Error::Storage(format!("Transcript insert error: {}", e)))?;

        Ok(())
    }

    /// Newest-first transcript entries for the key.
    pub fn recent_messages(
        &self,
        user_id: &str,
        tenant_id: &str,
        limit: usize,
    ) -> Result<Vec<TranscriptEntry>> {
        let conn = self.lock()?;

        let mut stmt = conn
            .prepare(
                "SELECT user_id, tenant_id, message, reply, created_at
                 FROM messages
                 WHERE user_id = ?1 AND tenant_id = ?2
                 ORDER BY id DESC LIMIT ?3",
            )
            .map_err(|e| frontdesk_core::Error::Storage(format!("Prepare error: {}", e)))?;

        let rows = stmt
            .query_map(params![user_id, tenant_id, limit as i64], |row| {
                Ok(TranscriptEntry {
                    user_id: row.get("user_id")?,
                    tenant_id: row.get("tenant_id")?,
                    message: row.get("message")?,
                    reply: row.get("reply")?,
                    created_at: row.get("created_at")?,
                })
            })
            .map_err(|e| frontdesk_core::Error::Storage(format!("Transcript query error: {}", e)))?;

        let mut entries = Vec::new();
        for row in rows {
            match row {
                Ok(entry) => entries.push(entry),
                Err(e) => warn!(error = %e, "Error reading transcript row"),
            }
        }
        Ok(entries)
    }

    /// Retention: keep only the `max_records` newest memory records
    /// system-wide (not per key), delete the rest. Returns how many rows
    /// were deleted. This is the only delete path for `user_memory`.
    pub fn prune(&self, max_records: usize) -> Result<usize> {
        let conn = self.lock()?;

        let deleted = conn
            .execute(
                "DELETE FROM user_memory
                 WHERE id NOT IN (
                     SELECT id FROM user_memory
                     ORDER BY id DESC
                     LIMIT ?1
                 )",
                params![max_records as i64],
            )
            .map_err(|e| frontdesk_core::Error::Storage(format!("Prune error: {}", e)))?;

        if deleted > 0 {
            info!(deleted, max_records, "Pruned memory records");
        }
        Ok(deleted)
    }

    /// Same retention policy for the transcript table, scheduled
    /// independently of `prune`.
    pub fn prune_messages(&self, max_records: usize) -> Result<usize> {
        let conn = self.lock()?;

        let deleted = conn
            .execute(
                "DELETE FROM messages
                 WHERE id NOT IN (
                     SELECT id FROM messages
                     ORDER BY id DESC
                     LIMIT ?1
                 )",
                params![max_records as i64],
            )
            .map_err(|e| frontdesk_core::Error::Storage(format!("Prune error: {}", e)))?;

        if deleted > 0 {
            info!(deleted, max_records, "Pruned transcript entries");
        }
        Ok(deleted)
    }

    /// Row counts for both tables. A broken store errors rather than
    /// reporting itself as empty.
    pub fn stats(&self) -> Result<serde_json::Value> {
        let conn = self.lock()?;

        let memory_records: i64 = conn
            .query_row("SELECT COUNT(*) FROM user_memory", [], |row| row.get(0))
            .map_err(|e| frontdesk_core::Error::Storage(format!("Stats error: {}", e)))?;

        let transcript_entries: i64 = conn
            .query_row("SELECT COUNT(*) FROM messages", [], |row| row.get(0))
            .map_err(|e| frontdesk_core::Error::Storage(format!("Stats error: {}", e)))?;

        Ok(serde_json::json!({
            "db_path": self.db_path.display().to_string(),
            "memory_records": memory_records,
            "transcript_entries": transcript_entries,
        }))
    }
}
