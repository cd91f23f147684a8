//! Report command implementation
//!
//! Handles the `native-image-report report` command which renders the
//! report for a single build

use super::{emit, OutputOptions};
use crate::cicd::JsonOutput;
use crate::context::RunContext;
use crate::infra::{FileSystem, RealFileSystem};
use crate::report::ReportAssembler;
use crate::snapshot::SnapshotLoader;
use anyhow::Result;
use std::path::PathBuf;

/// Options of the `report` command
#[derive(Debug, Clone, Default)]
pub struct ReportOptions {
    /// Build-output JSON of the build
    pub snapshot: PathBuf,
    /// Output destination and format
    pub output: OutputOptions,
}

/// Render the report for one build
///
/// A missing build-output file is not an error: a warning is logged and
/// nothing is written.
///
/// # Examples
///
/// ```no_run
/// use native_image_report::cmd::{cmd_report, ReportOptions};
/// use native_image_report::context::RunContext;
///
/// let options = ReportOptions {
///     snapshot: "build-output.json".into(),
///     ..ReportOptions::default()
/// };
/// cmd_report(&options, &RunContext::default())?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn cmd_report(options: &ReportOptions, context: &RunContext) -> Result<()> {
    cmd_report_with_fs(options, context, &RealFileSystem)
}

/// Render the report with a custom filesystem implementation
pub fn cmd_report_with_fs<FS: FileSystem>(
    options: &ReportOptions,
    context: &RunContext,
    fs: &FS,
) -> Result<()> {
    let Some(snapshot) = SnapshotLoader::load_with_fs(&options.snapshot, fs)? else {
        return Ok(());
    };

    let text = if options.output.json {
        JsonOutput::from_snapshot(&snapshot).to_json()? + "\n"
    } else {
        ReportAssembler::new(context).single(&snapshot).render()
    };
    emit(&text, &options.output, fs)
}
