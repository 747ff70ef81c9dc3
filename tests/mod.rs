//! Integration tests for Red Lotus
//!
//! Tests are organized by component:
//! - countdown_test: Release cycle boundaries and ticking
//! - firebase_test: REST identity provider against a mock server
//! - app_test: End-to-end flows (auth overlay, teaser, runtime loop)
//! - ui_test: Rendering into a test terminal
//! - cli_test: Argument parsing, JSON output, command exit codes

// Note: Each test file is a separate integration test crate
// Tests are run individually by cargo, not via mod.rs
