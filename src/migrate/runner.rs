use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rusqlite::{Connection, params};
use tracing::{debug, info, warn};

use super::{Migration, MigrationRegistry, MigrationReport, MigrationStatus};
use crate::error::{Error, Result};
use crate::types::MigrationRecord;

const MIGRATIONS_TABLE: &str = "CREATE TABLE IF NOT EXISTS migrations (
    id TEXT PRIMARY KEY,
    applied_at TEXT NOT NULL
)";

fn ensure_migrations_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(MIGRATIONS_TABLE)?;
    Ok(())
}

fn parse_datetime(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|e| {
            tracing::error!("Invalid migration timestamp in database: '{}' - {}", s, e);
            Utc::now()
        })
}

/// Every recorded migration, in the order it was applied.
pub fn applied_records(conn: &Connection) -> Result<Vec<MigrationRecord>> {
    ensure_migrations_table(conn)?;
    let mut stmt = conn.prepare("SELECT id, applied_at FROM migrations ORDER BY rowid")?;
    let rows = stmt.query_map([], |row| {
        Ok(MigrationRecord {
            id: row.get(0)?,
            applied_at: parse_datetime(&row.get::<_, String>(1)?),
        })
    })?;

    rows.collect::<std::result::Result<Vec<_>, _>>()
        .map_err(Error::from)
}

fn applied_map(conn: &Connection) -> Result<HashMap<String, DateTime<Utc>>> {
    Ok(applied_records(conn)?
        .into_iter()
        .map(|record| (record.id, record.applied_at))
        .collect())
}

fn warn_about_registry(registry: &MigrationRegistry, applied: &HashMap<String, DateTime<Utc>>) {
    for (prev, next) in registry.numeric_order_drift() {
        warn!(
            "Migration {next} is registered after {prev}; applying in registration order, not numeric order"
        );
    }
    for id in applied.keys() {
        if !registry.contains(id) {
            warn!("Database records migration {id}, which this build does not know about");
        }
    }
}

/// Applies every pending migration in registration order.
pub fn apply(
    conn: &mut Connection,
    registry: &MigrationRegistry,
    now: DateTime<Utc>,
) -> Result<MigrationReport> {
    run_forward(conn, registry, registry.len(), now)
}

/// Applies pending migrations up to and including `target`.
pub fn apply_to(
    conn: &mut Connection,
    registry: &MigrationRegistry,
    target: &str,
    now: DateTime<Utc>,
) -> Result<MigrationReport> {
    let end = registry
        .position(target)
        .ok_or_else(|| Error::UnknownMigration(target.to_string()))?;
    run_forward(conn, registry, end + 1, now)
}

fn run_forward(
    conn: &mut Connection,
    registry: &MigrationRegistry,
    end: usize,
    now: DateTime<Utc>,
) -> Result<MigrationReport> {
    let applied = applied_map(conn)?;
    warn_about_registry(registry, &applied);

    let mut report = MigrationReport::default();
    for migration in registry.iter().take(end) {
        if applied.contains_key(migration.id) {
            debug!("Migration {} already applied", migration.id);
            report.skipped += 1;
            continue;
        }

        apply_one(conn, migration, now).map_err(|e| Error::migration(migration.id, e))?;
        info!("Applied migration {}", migration.id);
        report.applied.push(migration.id.to_string());
    }

    Ok(report)
}

fn apply_one(conn: &mut Connection, migration: &Migration, now: DateTime<Utc>) -> Result<()> {
    let tx = conn.transaction()?;
    migration.up(&tx)?;
    tx.execute(
        "INSERT INTO migrations (id, applied_at) VALUES (?1, ?2)",
        params![migration.id, now.to_rfc3339()],
    )?;
    tx.commit()?;
    Ok(())
}

/// Rolls back applied migrations, newest registration first, down to but not
/// including `target`. Returns the ids rolled back.
///
/// Stops at the first failure. Steps rolled back before the failure stay
/// rolled back.
pub fn rollback_to(
    conn: &mut Connection,
    registry: &MigrationRegistry,
    target: &str,
) -> Result<Vec<String>> {
    let start = registry
        .position(target)
        .ok_or_else(|| Error::UnknownMigration(target.to_string()))?;
    let applied = applied_map(conn)?;

    let mut rolled_back = Vec::new();
    for migration in registry.iter().skip(start + 1).rev() {
        if !applied.contains_key(migration.id) {
            continue;
        }
        rollback_one(conn, migration)?;
        rolled_back.push(migration.id.to_string());
    }

    Ok(rolled_back)
}

/// Rolls back the applied migration registered last, if any.
pub fn rollback_last(conn: &mut Connection, registry: &MigrationRegistry) -> Result<Option<String>> {
    let applied = applied_map(conn)?;
    let Some(last) = registry.iter().rev().find(|m| applied.contains_key(m.id)) else {
        return Ok(None);
    };

    rollback_one(conn, last)?;
    Ok(Some(last.id.to_string()))
}

fn rollback_one(conn: &mut Connection, migration: &Migration) -> Result<()> {
    let tx = conn.transaction()?;
    match migration.down(&tx) {
        Ok(()) => {}
        Err(e @ Error::RollbackUnsupported { .. }) => return Err(e),
        Err(e) => return Err(Error::rollback(migration.id, e)),
    }
    tx.execute("DELETE FROM migrations WHERE id = ?1", params![migration.id])
        .map_err(|e| Error::rollback(migration.id, e.into()))?;
    tx.commit()
        .map_err(|e| Error::rollback(migration.id, e.into()))?;

    info!("Rolled back migration {}", migration.id);
    Ok(())
}

pub fn status(conn: &Connection, registry: &MigrationRegistry) -> Result<Vec<MigrationStatus>> {
    let applied = applied_map(conn)?;
    warn_about_registry(registry, &applied);

    Ok(registry
        .iter()
        .map(|m| MigrationStatus {
            id: m.id.to_string(),
            reversible: m.is_reversible(),
            applied_at: applied.get(m.id).copied(),
        })
        .collect())
}
