//! Step 21: audited sessions.

use rusqlite::Transaction;

use crate::error::Result;
use crate::migrate::schema::drop_table;

pub(super) fn create_sessions(tx: &Transaction<'_>) -> Result<()> {
    tx.execute_batch(
        "CREATE TABLE IF NOT EXISTS sessions (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            created_at TEXT,
            updated_at TEXT,
            deleted_at TEXT,
            stopped_at TEXT,
            status TEXT NOT NULL DEFAULT '',
            user_id INTEGER,
            host_id INTEGER,
            err_msg TEXT NOT NULL DEFAULT '',
            comment TEXT NOT NULL DEFAULT ''
        );
        CREATE INDEX IF NOT EXISTS idx_sessions_deleted_at ON sessions(deleted_at);",
    )?;
    Ok(())
}

pub(super) fn drop_sessions(tx: &Transaction<'_>) -> Result<()> {
    drop_table(tx, "sessions")
}
