use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::store::Store;

/// Recorded on every session that was still open when the process stopped.
pub const HALTED_SESSION_MESSAGE: &str =
    "sshportal was halted while the connection was still active";

/// Closes sessions left `active` by an unclean shutdown. Returns how many
/// were closed.
pub fn close_stale_sessions<S: Store + ?Sized>(store: &S, now: DateTime<Utc>) -> Result<usize> {
    let closed = store
        .close_active_sessions(HALTED_SESSION_MESSAGE, now)
        .map_err(|e| Error::CrashRecovery(Box::new(e)))?;

    if closed > 0 {
        warn!("Closed {} session(s) left active by a previous run", closed);
    } else {
        info!("No stale sessions to close");
    }
    Ok(closed)
}
