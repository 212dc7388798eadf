//! Steps 15 to 20: roles replace the `is_admin` flag.

use rusqlite::{OptionalExtension, Transaction, params};
use tracing::info;

use crate::error::{Error, Result};
use crate::migrate::schema::{
    add_missing_columns, create_join_table, drop_table, ensure_role, soft_delete_role,
};

pub(super) fn create_user_roles(tx: &Transaction<'_>) -> Result<()> {
    tx.execute_batch(
        "CREATE TABLE IF NOT EXISTS user_roles (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            created_at TEXT,
            updated_at TEXT,
            deleted_at TEXT,
            name TEXT NOT NULL DEFAULT ''
        );
        CREATE INDEX IF NOT EXISTS idx_user_roles_deleted_at ON user_roles(deleted_at);",
    )?;
    create_join_table(tx, "user_user_roles", "user_id", "user_role_id")
}

pub(super) fn drop_user_roles(tx: &Transaction<'_>) -> Result<()> {
    drop_table(tx, "user_roles")
}

pub(super) fn users_with_roles(tx: &Transaction<'_>) -> Result<()> {
    add_missing_columns(
        tx,
        "users",
        &[
            ("is_admin", "INTEGER NOT NULL DEFAULT 0"),
            ("email", "TEXT NOT NULL DEFAULT ''"),
            ("name", "TEXT NOT NULL DEFAULT ''"),
            ("comment", "TEXT NOT NULL DEFAULT ''"),
            ("invite_token", "TEXT NOT NULL DEFAULT ''"),
        ],
    )?;
    create_join_table(tx, "user_user_roles", "user_id", "user_role_id")
}

pub(super) fn create_admin_role(tx: &Transaction<'_>) -> Result<()> {
    ensure_role(tx, "admin")
}

pub(super) fn remove_admin_role(tx: &Transaction<'_>) -> Result<()> {
    soft_delete_role(tx, "admin")
}

/// A user as the backfill sees it: only the legacy flag matters.
struct LegacyAdmin {
    id: i64,
}

pub(super) fn backfill_admin_role(tx: &Transaction<'_>) -> Result<()> {
    let admin_role: i64 = tx
        .query_row(
            "SELECT id FROM user_roles WHERE name = 'admin' AND deleted_at IS NULL",
            [],
            |row| row.get(0),
        )
        .optional()?
        .ok_or_else(|| Error::NotFound("user role 'admin'".to_string()))?;

    let admins = {
        let mut stmt =
            tx.prepare("SELECT id FROM users WHERE is_admin = 1 AND deleted_at IS NULL")?;
        let rows = stmt.query_map([], |row| Ok(LegacyAdmin { id: row.get(0)? }))?;
        rows.collect::<std::result::Result<Vec<_>, _>>()?
    };

    for admin in &admins {
        tx.execute(
            "INSERT OR IGNORE INTO user_user_roles (user_id, user_role_id) VALUES (?1, ?2)",
            params![admin.id, admin_role],
        )?;
    }

    info!("Granted role 'admin' to {} legacy administrator(s)", admins.len());
    Ok(())
}

/// The user shape without `is_admin`. The column itself stays: columns are
/// only ever added.
pub(super) fn users_without_admin_flag(tx: &Transaction<'_>) -> Result<()> {
    add_missing_columns(
        tx,
        "users",
        &[
            ("email", "TEXT NOT NULL DEFAULT ''"),
            ("name", "TEXT NOT NULL DEFAULT ''"),
            ("comment", "TEXT NOT NULL DEFAULT ''"),
            ("invite_token", "TEXT NOT NULL DEFAULT ''"),
        ],
    )?;
    Ok(())
}

pub(super) fn create_listhosts_role(tx: &Transaction<'_>) -> Result<()> {
    ensure_role(tx, "listhosts")
}

pub(super) fn remove_listhosts_role(tx: &Transaction<'_>) -> Result<()> {
    soft_delete_role(tx, "listhosts")
}
