//! Warnings with colored terminal output.
//!
//! Provides deduplication so a batch run over many inputs does not repeat the
//! same notice. Warnings go to stderr and never touch the sanitized output.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use owo_colors::OwoColorize;

/// Global set of warnings we've already printed (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// When set, warnings are still recorded but not printed.
static QUIET: AtomicBool = AtomicBool::new(false);

fn key(component: &str, message: &str) -> String {
    format!("[{component}] {message}")
}

/// Warn about a notable condition (prints once per unique message)
///
/// # Example
/// ```ignore
/// warn_once("strip", "unterminated tag swallowed 12 trailing characters");
/// ```
pub fn warn_once(component: &str, message: &str) {
    let should_print = WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_insert_with(HashSet::new)
        .insert(key(component, message));

    if should_print && !QUIET.load(Ordering::Relaxed) {
        eprintln!("{}", format!("[scour {component}] ⚠ {message}").yellow());
    }
}

/// Whether `warn_once` has already seen this exact warning.
#[must_use]
pub fn has_warned(component: &str, message: &str) -> bool {
    WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .as_ref()
        .is_some_and(|set| set.contains(&key(component, message)))
}

/// Silence (or re-enable) printing of warnings.
pub fn set_quiet(quiet: bool) {
    QUIET.store(quiet, Ordering::Relaxed);
}

/// Clear all recorded warnings (call between independent inputs)
pub fn clear_warnings() {
    let mut guard = WARNED.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}
