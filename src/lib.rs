//! # sshportal
//!
//! Startup schema evolution, baseline bootstrap and crash recovery for an SSH
//! access-control gateway, usable both as a standalone binary and as a library.
//!
//! ## Library Usage
//!
//! ```toml
//! [dependencies]
//! sshportal = { version = "0.0.1", default-features = false }
//! ```
//!
//! ```rust,ignore
//! use sshportal::config::BootstrapConfig;
//! use sshportal::init::initialize;
//! use sshportal::store::SqliteStore;
//!
//! let store = SqliteStore::new("./data/sshportal.db")?;
//! let report = initialize(&store, &BootstrapConfig::from_env())?;
//! if let Some(token) = report.seed.admin_invite_token {
//!     println!("invite:{token}");
//! }
//! ```
//!
//! Capabilities (key generation, invite tokens, clock) can be swapped through
//! [`init::Initializer`].
//!
//! ## Feature Flags
//!
//! - `cli` (default): Builds the `sshportal` binary. Disable with `default-features = false`.

pub mod bootstrap;
pub mod config;
pub mod error;
pub mod init;
pub mod migrate;
pub mod recovery;
pub mod store;
pub mod types;
