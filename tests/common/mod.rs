//! Shared fixtures: deterministic capabilities and throwaway databases.

#![allow(dead_code)]

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::{DateTime, TimeZone, Utc};
use sshportal::bootstrap::{Clock, GeneratedKey, KeyGenerator, RandomTokenGenerator};
use sshportal::error::{Error, Result};
use sshportal::store::SqliteStore;
use tempfile::TempDir;

/// Hands out numbered fake keys and counts calls.
#[derive(Default)]
pub struct FixedKeys {
    pub calls: AtomicUsize,
}

impl KeyGenerator for FixedKeys {
    fn generate(&self, key_type: &str, bits: u32) -> Result<GeneratedKey> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(GeneratedKey {
            public_key: format!("ssh-{key_type} AAAA{n}"),
            private_key: format!("private-{bits}-{n}"),
            fingerprint: format!("SHA256:fake{n}"),
        })
    }
}

pub struct BrokenKeys;

impl KeyGenerator for BrokenKeys {
    fn generate(&self, _key_type: &str, _bits: u32) -> Result<GeneratedKey> {
        Err(Error::KeyGeneration("no entropy".to_string()))
    }
}

/// Returns the queued tokens in order, then a fixed fallback.
pub struct SequenceTokens {
    tokens: Mutex<Vec<String>>,
}

impl SequenceTokens {
    pub fn new(tokens: &[&str]) -> Self {
        Self {
            tokens: Mutex::new(tokens.iter().rev().map(|t| t.to_string()).collect()),
        }
    }
}

impl RandomTokenGenerator for SequenceTokens {
    fn generate(&self, len: usize) -> String {
        self.tokens
            .lock()
            .unwrap()
            .pop()
            .unwrap_or_else(|| "z".repeat(len))
    }
}

pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    pub fn at_epoch_plus(secs: i64) -> Self {
        Self(Utc.timestamp_opt(1_600_000_000 + secs, 0).unwrap())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// An empty database file inside its own temp directory. Keep the
/// `TempDir` alive for as long as the store is used.
pub fn open_store() -> (TempDir, SqliteStore) {
    let temp = TempDir::new().unwrap();
    let store = SqliteStore::new(temp.path().join("sshportal.db")).unwrap();
    (temp, store)
}
