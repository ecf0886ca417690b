//! Integration Test: Sleep Prohibition
//!
//! **Policy**: production code in the wizard core and the TUI MUST NOT sleep.
//! The wizard is driven by completions and channel frames; reconnect backoff
//! is a deadline checked on poll; the TUI paces frames with
//! `tokio::time::interval`.

use architectural_enforcement::{assert_clean, scan_production};

#[test]
fn test_no_sleep_in_production_code() {
    let violations = scan_production(&["::sleep(", ".sleep("]);
    assert_clean("sleep calls in production code (wait on I/O or use an interval)", &violations);
}
