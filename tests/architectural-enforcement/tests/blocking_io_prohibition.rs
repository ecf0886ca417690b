//! Integration Test: Blocking I/O Prohibition
//!
//! **Policy**: network I/O in production code goes through async clients.
//! `reqwest::blocking` and `std::net` sockets would stall the event loop.
//!
//! Reading the config file and opening the log file happen once at startup
//! and are allowed.

use architectural_enforcement::{assert_clean, scan_production};

#[test]
fn test_no_blocking_http() {
    let violations = scan_production(&["reqwest::blocking"]);
    assert_clean("blocking HTTP client in production code", &violations);
}

#[test]
fn test_no_std_sockets() {
    let violations = scan_production(&["std::net::TcpStream", "std::net::TcpListener"]);
    assert_clean("std::net sockets in production code", &violations);
}

#[test]
fn test_no_block_on_inside_the_runtime() {
    let violations = scan_production(&["block_on(", "block_in_place("]);
    assert_clean("blocking on futures in production code", &violations);
}
