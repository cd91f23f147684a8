//! CI/CD integration module
//!
//! Provides:
//! - JSON verdict summary for CI/CD tool integration
//! - Console summary of improved and regressed metrics

pub mod display;
pub mod output;

pub use output::{JsonOutput, MetricEntry};
