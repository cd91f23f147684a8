//! JSON output formatting for CI/CD integration

use crate::classify::{Comparison, MetricClass, Thresholds, Verdict};
use crate::metric::Metric;
use crate::snapshot::BuildSnapshot;
use serde::{Deserialize, Serialize};

/// JSON output structure for CI/CD tools
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonOutput {
    /// False when any compared metric regressed
    pub success: bool,
    /// Image name of the current snapshot
    pub name: String,
    /// Number of improved metrics
    pub improved: usize,
    /// Number of regressed metrics
    pub regressed: usize,
    /// Every metric carried by the current snapshot
    pub metrics: Vec<MetricEntry>,
}

/// One metric value with its classification, if compared
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricEntry {
    /// Stable identifier, e.g. `image.total`
    pub key: String,
    /// Human-readable label
    pub label: String,
    /// Threshold class
    pub class: MetricClass,
    /// Value in the current snapshot
    pub value: f64,
    /// Comparison against the baseline (compare mode only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comparison: Option<Comparison>,
}

impl MetricEntry {
    /// Verdict of the comparison, neutral when not compared
    pub fn verdict(&self) -> Verdict {
        self.comparison
            .map_or(Verdict::Neutral, |comparison| comparison.verdict)
    }
}

impl JsonOutput {
    /// Metric values of a single snapshot
    pub fn from_snapshot(snapshot: &BuildSnapshot) -> Self {
        let metrics = Metric::all()
            .into_iter()
            .filter_map(|metric| {
                Some(MetricEntry {
                    key: metric.key(),
                    label: metric.label(),
                    class: metric.class(),
                    value: metric.value(snapshot)?,
                    comparison: None,
                })
            })
            .collect();
        Self::with_metrics(snapshot, metrics)
    }

    /// Metric values of `current` classified against `baseline`
    ///
    /// Metrics missing from the baseline are listed without a comparison.
    pub fn from_comparison(
        current: &BuildSnapshot,
        baseline: &BuildSnapshot,
        thresholds: &Thresholds,
    ) -> Self {
        let metrics = Metric::all()
            .into_iter()
            .filter_map(|metric| {
                Some(MetricEntry {
                    key: metric.key(),
                    label: metric.label(),
                    class: metric.class(),
                    value: metric.value(current)?,
                    comparison: metric.compare(current, baseline, thresholds),
                })
            })
            .collect();
        Self::with_metrics(current, metrics)
    }

    fn with_metrics(snapshot: &BuildSnapshot, metrics: Vec<MetricEntry>) -> Self {
        let count = |verdict: Verdict| metrics.iter().filter(|m| m.verdict() == verdict).count();
        let improved = count(Verdict::Improved);
        let regressed = count(Verdict::Regressed);
        Self {
            success: regressed == 0,
            name: snapshot.general_info.name.clone(),
            improved,
            regressed,
            metrics,
        }
    }

    /// Entries with the given verdict
    pub fn with_verdict(&self, verdict: Verdict) -> impl Iterator<Item = &MetricEntry> {
        self.metrics.iter().filter(move |m| m.verdict() == verdict)
    }

    /// Convert to JSON string
    pub fn to_json(&self) -> anyhow::Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| anyhow::anyhow!("Failed to serialize JSON output: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::test_support;

    #[test]
    fn test_single_snapshot_lists_present_metrics() {
        let output = JsonOutput::from_snapshot(&test_support::minimal());
        assert!(output.success);
        assert_eq!(output.name, "helloworld");
        // no debug info, no build time
        assert_eq!(output.metrics.len(), Metric::all().len() - 2);
        assert!(output.metrics.iter().all(|m| m.comparison.is_none()));
    }

    #[test]
    fn test_comparison_counts_verdicts() {
        let baseline = test_support::minimal();
        let mut current = test_support::minimal();
        current.image_details.code_area.bytes = 300;
        current.resource_usage.memory.peak_rss_bytes *= 2;

        let output = JsonOutput::from_comparison(&current, &baseline, &Thresholds::default());
        assert!(!output.success);
        assert_eq!(output.improved, 1);
        // peak RSS plus the other data remainder
        assert_eq!(output.regressed, 2);

        let regressed: Vec<_> = output
            .with_verdict(Verdict::Regressed)
            .map(|m| m.key.as_str())
            .collect();
        assert_eq!(regressed, ["image.other_data", "resources.peak_rss_bytes"]);
    }

    #[test]
    fn test_metric_missing_in_baseline_has_no_comparison() {
        let output = JsonOutput::from_comparison(
            &test_support::full(),
            &test_support::minimal(),
            &Thresholds::default(),
        );
        let debug = output
            .metrics
            .iter()
            .find(|m| m.key == "image.debug_info")
            .unwrap();
        assert!(debug.comparison.is_none());
        assert_eq!(debug.verdict(), Verdict::Neutral);
    }

    #[test]
    fn test_json_output_serialization_produces_valid_json() {
        let snapshot = test_support::minimal();
        let output = JsonOutput::from_comparison(&snapshot, &snapshot, &Thresholds::default());
        let json = output.to_json().unwrap();
        assert!(json.contains("\"success\": true"));
        assert!(json.contains("\"key\": \"image.total\""));
        assert!(json.contains("\"verdict\": \"neutral\""));
        assert!(json.contains("\"class\": \"image-details\""));

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["regressed"], 0);
    }
}
