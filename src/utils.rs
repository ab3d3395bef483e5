//! Utility functions for mht-plot-rs.

use std::collections::HashSet;
use std::sync::Mutex;
use std::sync::OnceLock;

use tracing::warn;

/// Global set of warned messages (for warn_once).
static WARNED_MESSAGES: OnceLock<Mutex<HashSet<String>>> = OnceLock::new();

/// Emit a warning only once per distinct message.
///
/// Subsequent calls with the same message are ignored.
pub fn warn_once(message: &str) {
    let warned = WARNED_MESSAGES.get_or_init(|| Mutex::new(HashSet::new()));
    // A poisoned lock only means another thread panicked mid-insert; the set is still usable.
    let mut guard = warned.lock().unwrap_or_else(|e| e.into_inner());
    if !guard.contains(message) {
        warn!("{}", message);
        guard.insert(message.to_string());
    }
}
