//! Report error types with contextual suggestions
//!
//! Provides structured error types that include:
//! - Actionable error messages
//! - Suggested fixes and recovery actions
//! - Documentation links
//! - Proper exit codes for CI/CD
//!
//! A missing telemetry file is deliberately not an error: the command that
//! renders the report logs a warning and exits successfully instead.
//!
//! # Examples
//!
//! ```
//! use native_image_report::error::ReportError;
//! use native_image_report::snapshot::BuildSnapshot;
//!
//! match BuildSnapshot::from_json("{ not json") {
//!     Ok(_) => unreachable!(),
//!     Err(e) => {
//!         assert!(matches!(e, ReportError::MalformedSnapshot { .. }));
//!         assert_eq!(e.exit_code(), 65);
//!     }
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading inputs or rendering a report
#[derive(Error, Debug)]
pub enum ReportError {
    /// Telemetry document could not be parsed into a snapshot
    #[error("Malformed build output in {origin}")]
    MalformedSnapshot {
        /// Where the document came from (file path or "<inline>")
        origin: String,
        #[source]
        /// JSON error source
        source: serde_json::Error,
    },

    /// Baseline snapshot was requested but the file does not exist
    #[error("Baseline snapshot not found: {path}")]
    BaselineNotFound {
        /// Path to the missing baseline file
        path: PathBuf,
    },

    /// Explicitly requested configuration file does not exist
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// Path to config file
        path: PathBuf,
        #[source]
        /// IO error source
        source: std::io::Error,
    },

    /// Threshold bounds are inverted or not positive
    #[error("Invalid threshold policy: lower bound {lower}% / upper bound {upper}%")]
    InvalidThresholds {
        /// Lower bound in percent
        lower: f64,
        /// Upper bound in percent
        upper: f64,
    },

    /// Generic I/O error with context
    #[error("I/O error: {context}")]
    Io {
        /// Context about where the error occurred
        context: String,
        #[source]
        /// IO error source
        source: std::io::Error,
    },
}

impl ReportError {
    /// Get actionable suggestion for resolving this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use native_image_report::error::ReportError;
    ///
    /// let error = ReportError::InvalidThresholds { lower: 110.0, upper: 100.0 };
    /// assert!(error.suggestion().unwrap().contains("lower-bound"));
    /// ```
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::MalformedSnapshot { .. } => Some(
                "Make sure the file was written by native-image with \
                 -H:BuildOutputJSONFile=<path> and was not truncated"
                    .to_string(),
            ),
            Self::BaselineNotFound { path } => Some(format!(
                "Fetch the baseline build output to {} before comparing, or run 'native-image-report report' for a single build",
                path.display()
            )),
            Self::ConfigNotFound { path, .. } => Some(format!(
                "Create {} or omit --config to use the default thresholds",
                path.display()
            )),
            Self::InvalidThresholds { .. } => Some(
                "Both bounds must be positive and lower-bound must not exceed upper-bound"
                    .to_string(),
            ),
            Self::Io { context, .. } => Some(format!(
                "Check file permissions and that {} is accessible",
                context
            )),
        }
    }

    /// Get documentation URL for this error.
    pub fn docs_url(&self) -> Option<&str> {
        match self {
            Self::MalformedSnapshot { .. } => Some(crate::report::DOCS_BASE),
            _ => None,
        }
    }

    /// Get appropriate exit code for this error, following sysexits.h conventions.
    ///
    /// # Examples
    ///
    /// ```
    /// use native_image_report::error::ReportError;
    /// use std::path::PathBuf;
    ///
    /// let error = ReportError::BaselineNotFound { path: PathBuf::from("base.json") };
    /// assert_eq!(error.exit_code(), 66); // EX_NOINPUT
    /// ```
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::MalformedSnapshot { .. } => 65, // EX_DATAERR
            Self::BaselineNotFound { .. } => 66, // EX_NOINPUT
            Self::ConfigNotFound { .. } => 66,  // EX_NOINPUT
            Self::InvalidThresholds { .. } => 78, // EX_CONFIG
            Self::Io { .. } => 74,              // EX_IOERR
        }
    }
}

/// Error formatter with colors and structured output
pub struct ErrorFormatter;

impl ErrorFormatter {
    /// Format error with suggestions and documentation links
    pub fn format(error: &anyhow::Error) -> String {
        use console::style;

        let mut output = String::new();

        output.push_str(&format!("{} {}\n", style("error:").red().bold(), error));

        // Error chain (caused by)
        let mut source = error.source();
        let mut indent = 1;
        while let Some(err) = source {
            output.push_str(&format!(
                "{}{} {}\n",
                "  ".repeat(indent),
                style("caused by:").yellow(),
                err
            ));
            source = err.source();
            indent += 1;
        }

        if let Some(report_error) = Self::find(error) {
            if let Some(suggestion) = report_error.suggestion() {
                output.push_str(&format!(
                    "\n{} {}\n",
                    style("help:").cyan().bold(),
                    suggestion
                ));
            }

            if let Some(docs) = report_error.docs_url() {
                output.push_str(&format!("{} {}\n", style("docs:").blue(), docs));
            }
        }

        output
    }

    /// Get exit code from error
    pub fn exit_code(error: &anyhow::Error) -> i32 {
        Self::find(error).map_or(1, ReportError::exit_code)
    }

    /// Locate a `ReportError` anywhere in the chain, since callers add context on top
    fn find(error: &anyhow::Error) -> Option<&ReportError> {
        error.chain().find_map(|e| e.downcast_ref::<ReportError>())
    }
}
