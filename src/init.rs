//! Startup sequence: migrate, seed, then recover from an unclean shutdown.

use tracing::info;

use crate::bootstrap::{
    AlphaTokens, Clock, KeyGenerator, RandomTokenGenerator, SeedReport, Seeder, SshKeygen,
    SystemClock,
};
use crate::config::BootstrapConfig;
use crate::error::Result;
use crate::migrate::{self, MigrationRegistry, MigrationReport};
use crate::recovery;
use crate::store::Store;

#[derive(Debug, Default, Clone)]
pub struct InitReport {
    pub migrations: MigrationReport,
    pub seed: SeedReport,
    pub closed_sessions: usize,
}

pub struct Initializer {
    registry: MigrationRegistry,
    config: BootstrapConfig,
    keys: Box<dyn KeyGenerator>,
    tokens: Box<dyn RandomTokenGenerator>,
    clock: Box<dyn Clock>,
}

impl Initializer {
    /// Uses the production migrations and the system capabilities.
    pub fn new(config: BootstrapConfig) -> Self {
        Self {
            registry: migrate::registry(),
            config,
            keys: Box::new(SshKeygen::new()),
            tokens: Box::new(AlphaTokens),
            clock: Box::new(SystemClock),
        }
    }

    #[must_use]
    pub fn with_key_generator(mut self, keys: impl KeyGenerator + 'static) -> Self {
        self.keys = Box::new(keys);
        self
    }

    #[must_use]
    pub fn with_token_generator(mut self, tokens: impl RandomTokenGenerator + 'static) -> Self {
        self.tokens = Box::new(tokens);
        self
    }

    #[must_use]
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Runs every stage in order and stops at the first error. Safe to call
    /// on every start.
    pub fn run<S: Store + ?Sized>(&self, store: &S) -> Result<InitReport> {
        self.config.validate()?;

        let migrations = store.migrate(&self.registry, self.clock.now())?;

        let seeder = Seeder::new(
            self.keys.as_ref(),
            self.tokens.as_ref(),
            self.clock.as_ref(),
            &self.config,
        );
        let seed = seeder.ensure_defaults(store)?;

        let closed_sessions = recovery::close_stale_sessions(store, self.clock.now())?;

        info!(
            "Initialization complete: {} migration(s) applied, {} record(s) seeded, {} session(s) closed",
            migrations.applied.len(),
            seed.created.len(),
            closed_sessions
        );

        Ok(InitReport {
            migrations,
            seed,
            closed_sessions,
        })
    }
}

/// Runs the startup sequence with the system capabilities.
pub fn initialize<S: Store + ?Sized>(store: &S, config: &BootstrapConfig) -> Result<InitReport> {
    Initializer::new(config.clone()).run(store)
}
