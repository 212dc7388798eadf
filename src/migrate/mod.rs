//! Ordered, recorded schema and data evolution.
//!
//! A [`MigrationRegistry`] lists steps in the order they were written.
//! Identifiers only record which steps a database has seen: the runner applies
//! pending steps in registration order and never sorts by identifier.

mod runner;
mod schema;
mod steps;

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use rusqlite::Transaction;
use serde::Serialize;

use crate::error::{Error, Result};

pub use runner::{apply, apply_to, applied_records, rollback_last, rollback_to, status};
pub use steps::registry;

/// A forward or backward action. Steps only ever see their own transaction.
pub type StepFn = fn(&Transaction<'_>) -> Result<()>;

#[derive(Clone, Copy)]
pub struct Migration {
    pub id: &'static str,
    up: StepFn,
    down: Option<StepFn>,
}

impl Migration {
    pub const fn new(id: &'static str, up: StepFn, down: StepFn) -> Self {
        Self {
            id,
            up,
            down: Some(down),
        }
    }

    /// A step that can be applied but never rolled back.
    pub const fn one_way(id: &'static str, up: StepFn) -> Self {
        Self { id, up, down: None }
    }

    pub fn is_reversible(&self) -> bool {
        self.down.is_some()
    }

    pub(crate) fn up(&self, tx: &Transaction<'_>) -> Result<()> {
        (self.up)(tx)
    }

    pub(crate) fn down(&self, tx: &Transaction<'_>) -> Result<()> {
        match self.down {
            Some(down) => down(tx),
            None => Err(Error::RollbackUnsupported {
                id: self.id.to_string(),
            }),
        }
    }
}

impl std::fmt::Debug for Migration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Migration")
            .field("id", &self.id)
            .field("reversible", &self.is_reversible())
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct MigrationRegistry {
    migrations: Vec<Migration>,
}

impl MigrationRegistry {
    pub fn new(migrations: Vec<Migration>) -> Result<Self> {
        let mut seen = HashSet::new();
        for migration in &migrations {
            if !seen.insert(migration.id) {
                return Err(Error::DuplicateMigration(migration.id.to_string()));
            }
        }
        Ok(Self { migrations })
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Migration> + ExactSizeIterator {
        self.migrations.iter()
    }

    pub fn len(&self) -> usize {
        self.migrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.migrations.is_empty()
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.migrations.iter().position(|m| m.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    /// Adjacent pairs of numeric identifiers registered out of numeric order.
    ///
    /// Registration order still wins when applying; this only exists so that a
    /// registry drifting away from its numbering gets noticed.
    pub fn numeric_order_drift(&self) -> Vec<(&'static str, &'static str)> {
        self.migrations
            .windows(2)
            .filter_map(|pair| {
                let prev = pair[0].id.parse::<u64>().ok()?;
                let next = pair[1].id.parse::<u64>().ok()?;
                (next <= prev).then_some((pair[0].id, pair[1].id))
            })
            .collect()
    }
}

/// Outcome of a forward run.
#[derive(Debug, Clone, Default)]
pub struct MigrationReport {
    pub applied: Vec<String>,
    pub skipped: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct MigrationStatus {
    pub id: String,
    pub reversible: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applied_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(_tx: &Transaction<'_>) -> Result<()> {
        Ok(())
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let result = MigrationRegistry::new(vec![
            Migration::new("1", noop, noop),
            Migration::one_way("2", noop),
            Migration::new("1", noop, noop),
        ]);
        assert!(matches!(result, Err(Error::DuplicateMigration(id)) if id == "1"));
    }

    #[test]
    fn test_registration_order_is_kept() {
        let registry = MigrationRegistry::new(vec![
            Migration::new("10", noop, noop),
            Migration::new("2", noop, noop),
            Migration::new("b", noop, noop),
            Migration::new("a", noop, noop),
        ])
        .unwrap();

        let ids: Vec<_> = registry.iter().map(|m| m.id).collect();
        assert_eq!(ids, ["10", "2", "b", "a"]);
        assert_eq!(registry.position("b"), Some(2));
    }

    #[test]
    fn test_tail_iterates_newest_first() {
        let registry = MigrationRegistry::new(vec![
            Migration::new("1", noop, noop),
            Migration::new("2", noop, noop),
            Migration::new("3", noop, noop),
        ])
        .unwrap();

        assert_eq!(registry.iter().len(), 3);
        let tail: Vec<_> = registry.iter().skip(1).rev().map(|m| m.id).collect();
        assert_eq!(tail, ["3", "2"]);
    }

    #[test]
    fn test_numeric_order_drift() {
        let registry = MigrationRegistry::new(vec![
            Migration::new("1", noop, noop),
            Migration::new("10", noop, noop),
            Migration::new("2", noop, noop),
            Migration::new("init", noop, noop),
            Migration::new("3", noop, noop),
        ])
        .unwrap();

        assert_eq!(registry.numeric_order_drift(), vec![("10", "2")]);
    }

    #[test]
    fn test_production_registry_has_no_drift() {
        let registry = registry();
        assert_eq!(registry.len(), 21);
        assert!(registry.numeric_order_drift().is_empty());
    }

    #[test]
    fn test_one_way_steps() {
        let registry = registry();
        let one_way: Vec<_> = registry
            .iter()
            .filter(|m| !m.is_reversible())
            .map(|m| m.id)
            .collect();
        assert_eq!(one_way, ["16", "18", "19"]);
    }
}
