//! Common test utilities and helpers
//!
//! This module provides shared functionality for integration tests:
//! - Build-output fixtures written to temporary directories
//! - The command under test
//!
//! # Usage
//!
//! ```rust,no_run
//! mod common;
//! use common::fixtures;
//!
//! fn test_report() {
//!     let (dir, path) = fixtures::write_snapshot(fixtures::minimal_snapshot()).unwrap();
//! }
//! ```

pub mod fixtures;

/// The native-image-report binary, isolated from any CI environment
#[allow(dead_code)]
pub fn bin() -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::new(env!("CARGO_BIN_EXE_native-image-report"));
    for var in [
        "GITHUB_JOB",
        "GITHUB_RUN_ID",
        "GITHUB_RUN_NUMBER",
        "GITHUB_SERVER_URL",
        "GITHUB_REPOSITORY",
        "GITHUB_BASE_REF",
        "GITHUB_HEAD_REF",
        "RUST_LOG",
    ] {
        cmd.env_remove(var);
    }
    cmd
}
