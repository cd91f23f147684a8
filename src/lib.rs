#![warn(missing_docs)]
#![warn(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! native-image-report library
//!
//! This library turns the build-output JSON written by GraalVM Native Image
//! into job-summary markup, and classifies a build against a baseline build.
//! It can be used programmatically in addition to the CLI interface.
//!
//! # Basic Example
//!
//! Rendering the report for one build:
//!
//! ```
//! use native_image_report::context::RunContext;
//! use native_image_report::report::ReportAssembler;
//! use native_image_report::snapshot::BuildSnapshot;
//!
//! let json = r#"{
//!   "general_info": {
//!     "name": "helloworld",
//!     "graalvm_version": "GraalVM CE 22.3.0",
//!     "garbage_collector": "Serial GC"
//!   },
//!   "analysis_results": {
//!     "classes": { "total": 4000, "reachable": 2000, "reflection": 100, "jni": 50 },
//!     "fields":  { "total": 9000, "reachable": 3000, "reflection": 30, "jni": 20 },
//!     "methods": { "total": 40000, "reachable": 10000, "reflection": 500, "jni": 60 }
//!   },
//!   "image_details": {
//!     "total_bytes": 13000000,
//!     "code_area": { "bytes": 6000000, "compilation_units": 4500 },
//!     "image_heap": { "bytes": 5000000, "resources": { "count": 3, "bytes": 1200 } }
//!   },
//!   "resource_usage": {
//!     "cpu": { "load": 6.2, "total_cores": 8 },
//!     "garbage_collection": { "count": 20, "total_secs": 1.4 },
//!     "memory": { "system_total": 17179869184, "peak_rss_bytes": 2147483648 }
//!   }
//! }"#;
//!
//! let snapshot = BuildSnapshot::from_json(json)?;
//! let context = RunContext::default();
//! let markup = ReportAssembler::new(&context).single(&snapshot).render();
//!
//! assert!(markup.contains("#### Image Details"));
//! assert!(!markup.contains("NaN"));
//! # Ok::<(), native_image_report::error::ReportError>(())
//! ```
//!
//! # Advanced Example: Classifying a Comparison
//!
//! ```
//! use native_image_report::classify::{Comparison, ThresholdPolicy, Verdict};
//!
//! let policy = ThresholdPolicy::default();
//! let total = Comparison::new(1_100_000.0, 1_000_000.0, &policy);
//!
//! assert_eq!(total.verdict, Verdict::Regressed);
//! assert_eq!(total.marked_percent(), "+10.000% 🔴");
//! ```

/// CI/CD integration tooling
pub mod cicd;
/// Threshold classification of compared metrics
pub mod classify;
/// Command handlers for CLI operations
pub mod cmd;
/// Configuration file loading
pub mod config;
/// CI run metadata
pub mod context;
/// Enhanced error types with contextual suggestions
pub mod error;
/// Shared formatting utilities
pub mod fmt;
/// Infrastructure traits for filesystem access
pub mod infra;
/// Catalogue of comparable metrics
pub mod metric;
/// Report rendering
pub mod report;
/// Build-output telemetry model
pub mod snapshot;
