//! Deduplicated parser diagnostics.
//!
//! Malformed markup tends to repeat the same mistake many times over a
//! document. Each distinct `(component, message)` pair is logged once at
//! `warn` level until [`clear_warnings`] resets the record.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

/// Keys of every warning already logged.
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

fn key(component: &str, message: &str) -> String {
    format!("[{component}] {message}")
}

/// Log a warning once per unique message.
///
/// # Example
/// ```
/// use sorrel_common::warning::warn_once;
///
/// warn_once("HTML Tokenizer", "eof-in-tag");
/// warn_once("HTML Tokenizer", "eof-in-tag"); // not logged again
/// ```
pub fn warn_once(component: &str, message: &str) {
    let fresh = WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_insert_with(HashSet::new)
        .insert(key(component, message));

    if fresh {
        log::warn!("[sorrel {component}] {message}");
    }
}

/// Whether `warn_once` has already logged this message.
#[must_use]
pub fn was_warned(component: &str, message: &str) -> bool {
    WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .as_ref()
        .is_some_and(|set| set.contains(&key(component, message)))
}

/// Forget every recorded warning (call before parsing an unrelated document).
pub fn clear_warnings() {
    let mut guard = WARNED.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}
