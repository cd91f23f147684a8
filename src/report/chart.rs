//! Chart style comparison: one mermaid gantt block per category

use super::block::{BarStyle, Block, Chart, ChartBar, ChartSection};
use super::heading;
use crate::classify::{Comparison, MetricClass, Thresholds, Verdict};
use crate::metric::{AnalysisCount, Metric, Unit};
use crate::snapshot::{AnalysisCategory, BuildSnapshot};

/// Length of the current bar in normalised charts
const NORMALISED_SCALE: f64 = 100.0;

/// Categories rendered as charts instead of tables
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChartSelection {
    /// Chart the analysis results
    pub analysis_results: bool,
    /// Chart the image details
    pub image_details: bool,
    /// Chart the resource usage
    pub resource_usage: bool,
}

impl ChartSelection {
    /// Select categories named anywhere in `text`, case-insensitively
    ///
    /// # Examples
    ///
    /// ```
    /// use native_image_report::report::ChartSelection;
    ///
    /// let selection = ChartSelection::parse("Image Details, resource usage");
    /// assert!(!selection.analysis_results);
    /// assert!(selection.image_details);
    /// assert!(selection.resource_usage);
    /// ```
    pub fn parse(text: &str) -> Self {
        let text = text.to_lowercase();
        Self {
            analysis_results: text.contains("analysis results"),
            image_details: text.contains("image details"),
            resource_usage: text.contains("resource usage"),
        }
    }

    /// Every category
    pub fn all() -> Self {
        Self {
            analysis_results: true,
            image_details: true,
            resource_usage: true,
        }
    }

    /// No category selected
    pub fn is_empty(&self) -> bool {
        !(self.analysis_results || self.image_details || self.resource_usage)
    }

    /// Whether `class` is charted
    pub fn includes(&self, class: MetricClass) -> bool {
        match class {
            MetricClass::Analysis => self.analysis_results,
            MetricClass::ImageDetails => self.image_details,
            MetricClass::ResourceUsage => self.resource_usage,
        }
    }
}

/// Branch names used for bar labels
#[derive(Debug, Clone, Copy)]
pub struct BranchLabels<'a> {
    /// Branch of the current snapshot
    pub head: &'a str,
    /// Branch of the baseline snapshot
    pub base: &'a str,
}

impl BranchLabels<'_> {
    fn title(&self) -> String {
        format!("{} vs {}", self.head, self.base)
    }
}

fn bar_length(value: f64) -> u64 {
    if value.is_finite() && value > 0.0 {
        value.round() as u64
    } else {
        0
    }
}

/// Bar lengths with the current value scaled to 100
///
/// A zero current value leaves the baseline at full scale, or both at zero.
pub fn normalise(current: f64, baseline: f64) -> (u64, u64) {
    if current > 0.0 {
        let scaled = baseline * NORMALISED_SCALE / current;
        (NORMALISED_SCALE as u64, bar_length(scaled))
    } else if baseline > 0.0 {
        (0, NORMALISED_SCALE as u64)
    } else {
        (0, 0)
    }
}

fn section(
    name: String,
    comparison: &Comparison,
    unit: Unit,
    labels: BranchLabels<'_>,
    lengths: (u64, u64),
) -> ChartSection {
    let (current_length, baseline_length) = lengths;
    let style = match comparison.verdict {
        Verdict::Regressed => BarStyle::Critical,
        _ => BarStyle::Current,
    };
    ChartSection {
        name,
        bars: vec![
            ChartBar {
                label: format!("{} ({})", labels.base, unit.format(comparison.baseline)),
                length: baseline_length,
                style: BarStyle::Baseline,
            },
            ChartBar {
                label: format!("{} ({})", labels.head, unit.format(comparison.current)),
                length: current_length,
                style,
            },
        ],
    }
}

/// Reachable counts per analysis category
pub fn analysis_chart(
    current: &BuildSnapshot,
    baseline: &BuildSnapshot,
    labels: BranchLabels<'_>,
    thresholds: &Thresholds,
) -> Vec<Block> {
    let mut chart = Chart::new(format!("Reachable elements, {}", labels.title()));
    for category in AnalysisCategory::ALL {
        let metric = Metric::Analysis(category, AnalysisCount::Reachable);
        if let Some(comparison) = metric.compare(current, baseline, thresholds) {
            let lengths = (bar_length(comparison.current), bar_length(comparison.baseline));
            chart = chart.section(section(
                category.label().to_string(),
                &comparison,
                metric.unit(),
                labels,
                lengths,
            ));
        }
    }
    vec![heading("Analysis Results"), Block::Chart(chart)]
}

/// Image size breakdown in bytes
pub fn image_chart(
    current: &BuildSnapshot,
    baseline: &BuildSnapshot,
    labels: BranchLabels<'_>,
    thresholds: &Thresholds,
) -> Vec<Block> {
    let mut chart = Chart::new(format!("Image size in bytes, {}", labels.title()));
    for metric in Metric::IMAGE_DETAILS {
        if let Some(comparison) = metric.compare(current, baseline, thresholds) {
            let lengths = (bar_length(comparison.current), bar_length(comparison.baseline));
            chart = chart.section(section(metric.label(), &comparison, metric.unit(), labels, lengths));
        }
    }
    vec![heading("Image Details"), Block::Chart(chart)]
}

/// Resource usage relative to the current build
pub fn resource_chart(
    current: &BuildSnapshot,
    baseline: &BuildSnapshot,
    labels: BranchLabels<'_>,
    thresholds: &Thresholds,
) -> Vec<Block> {
    let mut chart = Chart::new(format!("Resource usage relative to {}", labels.head));
    for metric in Metric::RESOURCE_USAGE {
        if let Some(comparison) = metric.compare(current, baseline, thresholds) {
            let lengths = normalise(comparison.current, comparison.baseline);
            chart = chart.section(section(metric.label(), &comparison, metric.unit(), labels, lengths));
        }
    }
    vec![heading("Resource Usage"), Block::Chart(chart)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::Document;
    use crate::snapshot::test_support;

    const LABELS: BranchLabels<'static> = BranchLabels {
        head: "feature",
        base: "main",
    };

    fn chart_of(blocks: &[Block]) -> &Chart {
        match &blocks[1] {
            Block::Chart(chart) => chart,
            other => panic!("expected chart, got {:?}", other),
        }
    }

    #[test]
    fn test_selection_matches_case_insensitively() {
        let selection = ChartSelection::parse("ANALYSIS RESULTS");
        assert!(selection.analysis_results);
        assert!(!selection.image_details);
        assert!(selection.includes(MetricClass::Analysis));
        assert!(!selection.includes(MetricClass::ResourceUsage));
    }

    #[test]
    fn test_selection_ignores_unknown_text() {
        let selection = ChartSelection::parse("heap, memory");
        assert!(selection.is_empty());
        assert!(ChartSelection::default().is_empty());
        assert!(!ChartSelection::all().is_empty());
    }

    #[test]
    fn test_normalise_scales_baseline_to_current() {
        assert_eq!(normalise(200.0, 100.0), (100, 50));
        assert_eq!(normalise(100.0, 150.0), (100, 150));
        assert_eq!(normalise(0.0, 5.0), (0, 100));
        assert_eq!(normalise(0.0, 0.0), (0, 0));
    }

    #[test]
    fn test_analysis_chart_has_section_per_category() {
        let baseline = test_support::minimal();
        let mut current = test_support::minimal();
        current.analysis_results.methods.reachable = 12_000;

        let blocks = analysis_chart(&current, &baseline, LABELS, &Thresholds::default());
        let chart = chart_of(&blocks);
        assert_eq!(chart.sections.len(), 3);

        let methods = &chart.sections[2];
        assert_eq!(methods.name, "Methods");
        assert_eq!(methods.bars[0].label, "main (10,000)");
        assert_eq!(methods.bars[0].style, BarStyle::Baseline);
        assert_eq!(methods.bars[1].label, "feature (12,000)");
        assert_eq!(methods.bars[1].length, 12_000);
        assert_eq!(methods.bars[1].style, BarStyle::Critical);

        assert_eq!(chart.sections[0].bars[1].style, BarStyle::Current);
    }

    #[test]
    fn test_image_chart_skips_debug_info_unless_both_have_it() {
        let blocks = image_chart(
            &test_support::full(),
            &test_support::minimal(),
            LABELS,
            &Thresholds::default(),
        );
        let names: Vec<_> = chart_of(&blocks).sections.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Code area", "Image heap", "Other data", "Total"]);
    }

    #[test]
    fn test_resource_chart_is_normalised() {
        let baseline = test_support::minimal();
        let mut current = test_support::minimal();
        current.resource_usage.garbage_collection.total_secs = 3.0;

        let blocks = resource_chart(&current, &baseline, LABELS, &Thresholds::default());
        let gc = &chart_of(&blocks).sections[0];
        assert_eq!(gc.bars[0].length, 50);
        assert_eq!(gc.bars[1].length, 100);
        assert_eq!(gc.bars[0].label, "main (1.5s)");
    }

    #[test]
    fn test_rendered_chart_is_fenced_mermaid() {
        let blocks = resource_chart(
            &test_support::minimal(),
            &test_support::minimal(),
            LABELS,
            &Thresholds::default(),
        );
        let mut doc = Document::new();
        doc.extend(blocks);
        let out = doc.render();
        assert!(out.contains("```mermaid\ngantt\n"));
        assert!(out.contains("dateFormat X"));
        assert!(out.contains("    section CPU load\n"));
        assert!(out.contains("    feature (4.000) : active, 0, 100\n"));
        assert!(out.trim_end().ends_with("```"));
    }
}
