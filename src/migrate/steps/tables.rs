//! Steps 1 to 8: the base tables, each as it looked when introduced.

use rusqlite::Transaction;

use crate::error::Result;
use crate::migrate::schema::{create_join_table, drop_table};

pub(super) fn create_settings(tx: &Transaction<'_>) -> Result<()> {
    tx.execute_batch(
        "CREATE TABLE IF NOT EXISTS settings (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            created_at TEXT,
            updated_at TEXT,
            deleted_at TEXT,
            name TEXT NOT NULL DEFAULT '',
            value TEXT NOT NULL DEFAULT ''
        );
        CREATE INDEX IF NOT EXISTS idx_settings_deleted_at ON settings(deleted_at);",
    )?;
    Ok(())
}

pub(super) fn drop_settings(tx: &Transaction<'_>) -> Result<()> {
    drop_table(tx, "settings")
}

pub(super) fn create_ssh_keys(tx: &Transaction<'_>) -> Result<()> {
    tx.execute_batch(
        "CREATE TABLE IF NOT EXISTS ssh_keys (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            created_at TEXT,
            updated_at TEXT,
            deleted_at TEXT,
            name TEXT NOT NULL DEFAULT '',
            type TEXT NOT NULL DEFAULT '',
            length INTEGER NOT NULL DEFAULT 0,
            fingerprint TEXT NOT NULL DEFAULT '',
            priv_key TEXT NOT NULL DEFAULT '',
            pub_key TEXT NOT NULL DEFAULT '',
            comment TEXT NOT NULL DEFAULT ''
        );
        CREATE INDEX IF NOT EXISTS idx_ssh_keys_deleted_at ON ssh_keys(deleted_at);",
    )?;
    Ok(())
}

pub(super) fn drop_ssh_keys(tx: &Transaction<'_>) -> Result<()> {
    drop_table(tx, "ssh_keys")
}

pub(super) fn create_hosts(tx: &Transaction<'_>) -> Result<()> {
    tx.execute_batch(
        "CREATE TABLE IF NOT EXISTS hosts (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            created_at TEXT,
            updated_at TEXT,
            deleted_at TEXT,
            name TEXT NOT NULL DEFAULT '',
            addr TEXT NOT NULL DEFAULT '',
            user TEXT NOT NULL DEFAULT '',
            password TEXT NOT NULL DEFAULT '',
            ssh_key_id INTEGER,
            fingerprint TEXT NOT NULL DEFAULT '',
            comment TEXT NOT NULL DEFAULT ''
        );
        CREATE INDEX IF NOT EXISTS idx_hosts_deleted_at ON hosts(deleted_at);
        CREATE INDEX IF NOT EXISTS idx_hosts_ssh_key_id ON hosts(ssh_key_id);",
    )?;
    create_join_table(tx, "host_host_groups", "host_id", "host_group_id")
}

pub(super) fn drop_hosts(tx: &Transaction<'_>) -> Result<()> {
    drop_table(tx, "hosts")
}

pub(super) fn create_user_keys(tx: &Transaction<'_>) -> Result<()> {
    tx.execute_batch(
        "CREATE TABLE IF NOT EXISTS user_keys (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            created_at TEXT,
            updated_at TEXT,
            deleted_at TEXT,
            key BLOB,
            user_id INTEGER,
            comment TEXT NOT NULL DEFAULT ''
        );
        CREATE INDEX IF NOT EXISTS idx_user_keys_deleted_at ON user_keys(deleted_at);",
    )?;
    Ok(())
}

pub(super) fn drop_user_keys(tx: &Transaction<'_>) -> Result<()> {
    drop_table(tx, "user_keys")
}

pub(super) fn create_users(tx: &Transaction<'_>) -> Result<()> {
    tx.execute_batch(
        "CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            created_at TEXT,
            updated_at TEXT,
            deleted_at TEXT,
            is_admin INTEGER NOT NULL DEFAULT 0,
            email TEXT NOT NULL DEFAULT '',
            name TEXT NOT NULL DEFAULT '',
            comment TEXT NOT NULL DEFAULT '',
            invite_token TEXT NOT NULL DEFAULT ''
        );
        CREATE INDEX IF NOT EXISTS idx_users_deleted_at ON users(deleted_at);",
    )?;
    create_join_table(tx, "user_user_groups", "user_id", "user_group_id")
}

pub(super) fn drop_users(tx: &Transaction<'_>) -> Result<()> {
    drop_table(tx, "users")
}

pub(super) fn create_user_groups(tx: &Transaction<'_>) -> Result<()> {
    tx.execute_batch(
        "CREATE TABLE IF NOT EXISTS user_groups (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            created_at TEXT,
            updated_at TEXT,
            deleted_at TEXT,
            name TEXT NOT NULL DEFAULT '',
            comment TEXT NOT NULL DEFAULT ''
        );
        CREATE INDEX IF NOT EXISTS idx_user_groups_deleted_at ON user_groups(deleted_at);",
    )?;
    create_join_table(tx, "user_user_groups", "user_id", "user_group_id")?;
    create_join_table(tx, "user_group_acls", "user_group_id", "acl_id")
}

pub(super) fn drop_user_groups(tx: &Transaction<'_>) -> Result<()> {
    drop_table(tx, "user_groups")
}

pub(super) fn create_host_groups(tx: &Transaction<'_>) -> Result<()> {
    tx.execute_batch(
        "CREATE TABLE IF NOT EXISTS host_groups (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            created_at TEXT,
            updated_at TEXT,
            deleted_at TEXT,
            name TEXT NOT NULL DEFAULT '',
            comment TEXT NOT NULL DEFAULT ''
        );
        CREATE INDEX IF NOT EXISTS idx_host_groups_deleted_at ON host_groups(deleted_at);",
    )?;
    create_join_table(tx, "host_host_groups", "host_id", "host_group_id")?;
    create_join_table(tx, "host_group_acls", "host_group_id", "acl_id")
}

pub(super) fn drop_host_groups(tx: &Transaction<'_>) -> Result<()> {
    drop_table(tx, "host_groups")
}

pub(super) fn create_acls(tx: &Transaction<'_>) -> Result<()> {
    tx.execute_batch(
        "CREATE TABLE IF NOT EXISTS acls (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            created_at TEXT,
            updated_at TEXT,
            deleted_at TEXT,
            host_pattern TEXT NOT NULL DEFAULT '',
            action TEXT NOT NULL DEFAULT '',
            weight INTEGER NOT NULL DEFAULT 0,
            comment TEXT NOT NULL DEFAULT ''
        );
        CREATE INDEX IF NOT EXISTS idx_acls_deleted_at ON acls(deleted_at);",
    )?;
    create_join_table(tx, "host_group_acls", "host_group_id", "acl_id")?;
    create_join_table(tx, "user_group_acls", "user_group_id", "acl_id")
}

pub(super) fn drop_acls(tx: &Transaction<'_>) -> Result<()> {
    drop_table(tx, "acls")
}
