use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("migration {id} failed: {source}")]
    Migration { id: String, source: Box<Error> },

    #[error("rollback of migration {id} failed: {source}")]
    Rollback { id: String, source: Box<Error> },

    #[error("rollback of migration {id} is not supported")]
    RollbackUnsupported { id: String },

    #[error("unknown migration: {0}")]
    UnknownMigration(String),

    #[error("duplicate migration id: {0}")]
    DuplicateMigration(String),

    #[error("failed to seed {entity}: {source}")]
    Seed {
        entity: &'static str,
        source: Box<Error>,
    },

    #[error("failed to close stale sessions: {0}")]
    CrashRecovery(Box<Error>),

    #[error("key generation failed: {0}")]
    KeyGeneration(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("already exists: {0}")]
    AlreadyExists(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl Error {
    pub(crate) fn migration(id: &str, source: Error) -> Self {
        Self::Migration {
            id: id.to_string(),
            source: Box::new(source),
        }
    }

    pub(crate) fn rollback(id: &str, source: Error) -> Self {
        Self::Rollback {
            id: id.to_string(),
            source: Box::new(source),
        }
    }

    pub(crate) fn seed(entity: &'static str, source: Error) -> Self {
        Self::Seed {
            entity,
            source: Box::new(source),
        }
    }

    /// Returns true when the error, or the error it wraps, is a unique
    /// constraint violation.
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        match self {
            Self::AlreadyExists(_) => true,
            Self::Migration { source, .. }
            | Self::Rollback { source, .. }
            | Self::Seed { source, .. } => source.is_conflict(),
            Self::CrashRecovery(source) => source.is_conflict(),
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
