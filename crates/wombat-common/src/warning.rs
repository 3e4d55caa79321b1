//! Degraded-input warnings with colored terminal output.
//!
//! Provides deduplication to avoid spamming the same warning multiple times.
//! Used by the box construction core to report markup that was accepted but
//! structurally degraded (duplicate framesets, unresolvable URLs, rejected
//! MIME types, and so on).

use std::collections::HashSet;
use std::sync::Mutex;

/// ANSI color codes for terminal output
const YELLOW: &str = "\x1b[33m";
const RESET: &str = "\x1b[0m";

/// Global set of warnings we've already printed (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Warn about degraded or unsupported input (prints once per unique message)
///
/// # Example
/// ```ignore
/// warn_once("frameset", "multiple framesets in document; ignoring extras");
/// ```
///
/// # Panics
/// Panics if the global warning set mutex is poisoned.
pub fn warn_once(component: &str, message: &str) {
    let key = format!("[{component}] {message}");
    let should_print = WARNED
        .lock()
        .unwrap()
        .get_or_insert_with(HashSet::new)
        .insert(key);

    if should_print {
        eprintln!("{YELLOW}[Wombat {component}] ⚠ {message}{RESET}");
    }
}

/// Clear all recorded warnings (call when building a new document)
///
/// # Panics
/// Panics if the global warning set mutex is poisoned.
pub fn clear_warnings() {
    let mut guard = WARNED.lock().unwrap();
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}
