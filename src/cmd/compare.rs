//! Compare command implementation
//!
//! Handles the `native-image-report compare` command which classifies a
//! build against a baseline build and renders the comparison report

use super::{emit, load_config, OutputOptions};
use crate::cicd::{display, JsonOutput};
use crate::classify::Thresholds;
use crate::context::RunContext;
use crate::infra::{FileSystem, RealFileSystem};
use crate::report::{ChartSelection, ReportAssembler};
use crate::snapshot::SnapshotLoader;
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Layout of the comparison report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum CompareStyle {
    /// Tables, with the selected categories as charts
    #[default]
    Mixed,
    /// Tables only
    Tabular,
    /// Charts of the selected categories only
    Chart,
}

/// Options of the `compare` command
#[derive(Debug, Clone, Default)]
pub struct CompareOptions {
    /// Build-output JSON of the current build
    pub current: PathBuf,
    /// Build-output JSON of the baseline build
    pub baseline: PathBuf,
    /// Explicit configuration file
    pub config: Option<PathBuf>,
    /// Chart categories, overriding the configuration
    pub charts: Option<String>,
    /// Lower bound of every policy, overriding the configuration
    pub lower_bound: Option<f64>,
    /// Upper bound of every policy, overriding the configuration
    pub upper_bound: Option<f64>,
    /// Report layout
    pub style: CompareStyle,
    /// Output destination and format
    pub output: OutputOptions,
}

impl CompareOptions {
    /// Apply the bound flags to the default policy and every class override
    fn thresholds(&self, mut thresholds: Thresholds) -> Result<Thresholds> {
        let overrides = [
            &mut thresholds.analysis,
            &mut thresholds.image_details,
            &mut thresholds.resource_usage,
        ];
        let policies =
            std::iter::once(&mut thresholds.default).chain(overrides.into_iter().flatten());
        for policy in policies {
            if let Some(lower) = self.lower_bound {
                policy.lower_bound = lower;
            }
            if let Some(upper) = self.upper_bound {
                policy.upper_bound = upper;
            }
        }
        thresholds
            .validate()
            .context("Invalid threshold flags")?;
        Ok(thresholds)
    }
}

/// Compare the current build against a baseline build
///
/// A missing current build-output file logs a warning and writes nothing;
/// a missing baseline is an error.
///
/// # Examples
///
/// ```no_run
/// use native_image_report::cmd::{cmd_compare, CompareOptions};
/// use native_image_report::context::RunContext;
///
/// let options = CompareOptions {
///     current: "build-output.json".into(),
///     baseline: "baseline.json".into(),
///     charts: Some("image details".to_string()),
///     ..CompareOptions::default()
/// };
/// cmd_compare(&options, &RunContext::default())?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn cmd_compare(options: &CompareOptions, context: &RunContext) -> Result<()> {
    cmd_compare_with_fs(options, context, &RealFileSystem)
}

/// Compare builds with a custom filesystem implementation
pub fn cmd_compare_with_fs<FS: FileSystem>(
    options: &CompareOptions,
    context: &RunContext,
    fs: &FS,
) -> Result<()> {
    let Some(current) = SnapshotLoader::load_with_fs(&options.current, fs)? else {
        return Ok(());
    };

    let config = load_config(options.config.as_deref(), fs)?;
    let thresholds = options.thresholds(config.thresholds)?;
    let charts = match &options.charts {
        Some(categories) => ChartSelection::parse(categories),
        None => config.charts.selection(),
    };
    let baseline = SnapshotLoader::load_baseline_with_fs(&options.baseline, fs)?;
    for warning in current.comparison_warnings(&baseline) {
        log::warn!("{}", warning);
    }

    let summary = JsonOutput::from_comparison(&current, &baseline, &thresholds);
    if options.output.json {
        return emit(&(summary.to_json()? + "\n"), &options.output, fs);
    }

    if options.style == CompareStyle::Chart && charts.is_empty() {
        log::warn!("No chart categories selected, the chart report only has a footer");
    }
    let assembler = ReportAssembler::new(context)
        .with_thresholds(thresholds)
        .with_charts(charts);
    let doc = match options.style {
        CompareStyle::Mixed => assembler.comparison(&current, &baseline),
        CompareStyle::Tabular => assembler.tabular_comparison(&current, &baseline),
        CompareStyle::Chart => assembler.chart_comparison(&current, &baseline),
    };
    emit(&doc.render(), &options.output, fs)?;

    display::print_comparison_summary(&summary, options.output.use_emoji);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::ThresholdPolicy;
    use crate::error::ReportError;
    use crate::snapshot::{test_support, BuildSnapshot};
    use std::path::Path;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, snapshot: &BuildSnapshot) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, serde_json::to_string(snapshot).unwrap()).unwrap();
        path
    }

    fn options(temp: &TempDir, current: &BuildSnapshot) -> CompareOptions {
        CompareOptions {
            current: write(temp.path(), "current.json", current),
            baseline: write(temp.path(), "baseline.json", &test_support::minimal()),
            output: OutputOptions {
                output: Some(temp.path().join("comparison.md")),
                ..OutputOptions::default()
            },
            ..CompareOptions::default()
        }
    }

    #[test]
    fn test_compare_classifies_total_regression() {
        let temp = TempDir::new().unwrap();
        let mut current = test_support::minimal();
        current.image_details.total_bytes = 1100;
        let options = options(&temp, &current);

        cmd_compare(&options, &RunContext::default()).unwrap();
        let markup = std::fs::read_to_string(temp.path().join("comparison.md")).unwrap();
        assert!(markup.contains("Compared to <code>baseline</code>."));
        assert!(markup.contains("+10.000% 🔴"));
    }

    #[test]
    fn test_compare_missing_baseline_is_error() {
        let temp = TempDir::new().unwrap();
        let mut options = options(&temp, &test_support::minimal());
        options.baseline = temp.path().join("nope.json");

        let err = cmd_compare(&options, &RunContext::default()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ReportError>(),
            Some(ReportError::BaselineNotFound { .. })
        ));
    }

    #[test]
    fn test_compare_missing_current_is_skipped() {
        let temp = TempDir::new().unwrap();
        let mut options = options(&temp, &test_support::minimal());
        options.current = temp.path().join("nope.json");

        cmd_compare(&options, &RunContext::default()).unwrap();
        assert!(!temp.path().join("comparison.md").exists());
    }

    #[test]
    fn test_compare_missing_current_skips_before_config() {
        let temp = TempDir::new().unwrap();
        let mut options = options(&temp, &test_support::minimal());
        options.current = temp.path().join("nope.json");
        options.config = Some(temp.path().join("missing.toml"));

        cmd_compare(&options, &RunContext::default()).unwrap();
        assert!(!temp.path().join("comparison.md").exists());
    }

    #[test]
    fn test_bound_flags_override_class_policies() {
        let temp = TempDir::new().unwrap();
        let config = temp.path().join("report.toml");
        std::fs::write(
            &config,
            "[thresholds.image-details]\nupper-bound = 105.0\nsmaller-is-better = true\n",
        )
        .unwrap();

        let mut current = test_support::minimal();
        current.image_details.total_bytes = 1100;
        let mut options = options(&temp, &current);
        options.config = Some(config);
        options.upper_bound = Some(150.0);

        cmd_compare(&options, &RunContext::default()).unwrap();
        let markup = std::fs::read_to_string(temp.path().join("comparison.md")).unwrap();
        assert!(markup.contains("+10.000% ("));
        assert!(!markup.contains("🔴"));
    }

    #[test]
    fn test_bound_flags_keep_class_polarity() {
        let mut thresholds = Thresholds::default();
        thresholds.resource_usage = Some(ThresholdPolicy {
            smaller_is_better: false,
            ..ThresholdPolicy::default()
        });
        let options = CompareOptions {
            lower_bound: Some(90.0),
            ..CompareOptions::default()
        };

        let applied = options.thresholds(thresholds).unwrap();
        assert_eq!(applied.default.lower_bound, 90.0);
        let resources = applied.resource_usage.unwrap();
        assert_eq!(resources.lower_bound, 90.0);
        assert!(!resources.smaller_is_better);
        assert_eq!(applied.analysis, None);
    }

    #[test]
    fn test_chart_flag_overrides_config() {
        let temp = TempDir::new().unwrap();
        let config = temp.path().join("report.toml");
        std::fs::write(&config, "[charts]\ncategories = \"analysis results\"\n").unwrap();

        let mut options = options(&temp, &test_support::minimal());
        options.config = Some(config);
        options.charts = Some("resource usage".to_string());
        options.style = CompareStyle::Chart;

        cmd_compare(&options, &RunContext::default()).unwrap();
        let markup = std::fs::read_to_string(temp.path().join("comparison.md")).unwrap();
        assert!(markup.contains("#### Resource Usage"));
        assert!(!markup.contains("#### Analysis Results"));
    }

    #[test]
    fn test_inverted_bound_flags_are_rejected() {
        let temp = TempDir::new().unwrap();
        let mut options = options(&temp, &test_support::minimal());
        options.lower_bound = Some(150.0);

        let err = cmd_compare(&options, &RunContext::default()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ReportError>(),
            Some(ReportError::InvalidThresholds { .. })
        ));
    }

    #[test]
    fn test_compare_json_reports_failure() {
        let temp = TempDir::new().unwrap();
        let mut current = test_support::minimal();
        current.resource_usage.memory.peak_rss_bytes *= 2;
        let mut options = options(&temp, &current);
        options.output.json = true;

        cmd_compare(&options, &RunContext::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(
            &std::fs::read_to_string(temp.path().join("comparison.md")).unwrap(),
        )
        .unwrap();
        assert_eq!(value["success"], false);
        assert_eq!(value["regressed"], 1);
    }
}
