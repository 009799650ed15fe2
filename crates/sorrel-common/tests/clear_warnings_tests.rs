//! `clear_warnings` lives in its own test binary: it resets process-wide state.

use sorrel_common::warning::{clear_warnings, warn_once, was_warned};

#[test]
fn test_clear_warnings_forgets_everything() {
    warn_once("Clear", "to be forgotten");
    clear_warnings();
    assert!(!was_warned("Clear", "to be forgotten"));
}
