//! DDL helpers shared by the migration steps.
//!
//! These only build statements; every table shape lives in the step that
//! introduced it.

use chrono::Utc;
use rusqlite::{OptionalExtension, Transaction, params};

use crate::error::{Error, Result};

/// Creates a junction table keyed by the pair of foreign ids.
pub(super) fn create_join_table(
    tx: &Transaction<'_>,
    table: &str,
    left: &str,
    right: &str,
) -> Result<()> {
    tx.execute_batch(&format!(
        "CREATE TABLE IF NOT EXISTS {table} (
            {left} INTEGER NOT NULL,
            {right} INTEGER NOT NULL,
            PRIMARY KEY ({left}, {right})
        );"
    ))?;
    Ok(())
}

pub(super) fn table_columns(tx: &Transaction<'_>, table: &str) -> Result<Vec<String>> {
    let mut stmt = tx.prepare(&format!("PRAGMA table_info({table})"))?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(1))?;

    rows.collect::<std::result::Result<Vec<_>, _>>()
        .map_err(Error::from)
}

/// Adds each `(name, declaration)` column missing from `table`. Existing
/// columns are never altered or dropped. Returns how many were added.
pub(super) fn add_missing_columns(
    tx: &Transaction<'_>,
    table: &str,
    columns: &[(&str, &str)],
) -> Result<usize> {
    let existing = table_columns(tx, table)?;
    let mut added = 0;
    for (name, declaration) in columns {
        if existing.iter().any(|c| c == name) {
            continue;
        }
        tx.execute_batch(&format!(
            "ALTER TABLE {table} ADD COLUMN {name} {declaration};"
        ))?;
        added += 1;
    }
    Ok(added)
}

/// Replaces a unique index on `name` that only covers live rows.
pub(super) fn recreate_live_name_index(tx: &Transaction<'_>, index: &str, table: &str) -> Result<()> {
    tx.execute_batch(&format!(
        "DROP INDEX IF EXISTS {index};
         CREATE UNIQUE INDEX {index} ON {table}(name) WHERE deleted_at IS NULL;"
    ))?;
    Ok(())
}

pub(super) fn drop_index(tx: &Transaction<'_>, index: &str) -> Result<()> {
    tx.execute_batch(&format!("DROP INDEX IF EXISTS {index};"))?;
    Ok(())
}

pub(super) fn drop_table(tx: &Transaction<'_>, table: &str) -> Result<()> {
    tx.execute_batch(&format!("DROP TABLE IF EXISTS {table};"))?;
    Ok(())
}

/// Inserts a live role with this name unless one already exists.
pub(super) fn ensure_role(tx: &Transaction<'_>, name: &str) -> Result<()> {
    let existing: Option<i64> = tx
        .query_row(
            "SELECT id FROM user_roles WHERE name = ?1 AND deleted_at IS NULL",
            params![name],
            |row| row.get(0),
        )
        .optional()?;
    if existing.is_some() {
        return Ok(());
    }

    let now = Utc::now().to_rfc3339();
    tx.execute(
        "INSERT INTO user_roles (name, created_at, updated_at) VALUES (?1, ?2, ?2)",
        params![name, now],
    )?;
    Ok(())
}

pub(super) fn soft_delete_role(tx: &Transaction<'_>, name: &str) -> Result<()> {
    tx.execute(
        "UPDATE user_roles SET deleted_at = ?1 WHERE name = ?2 AND deleted_at IS NULL",
        params![Utc::now().to_rfc3339(), name],
    )?;
    Ok(())
}
