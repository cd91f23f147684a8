//! Catalogue of the metrics that can be compared between two snapshots

use crate::classify::{Comparison, MetricClass, Thresholds};
use crate::fmt;
use crate::snapshot::{AnalysisCategory, BuildSnapshot};

/// Which count of an analysis category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnalysisCount {
    /// Reachable elements
    Reachable,
    /// Registered for reflection
    Reflection,
    /// Registered for JNI
    Jni,
    /// Loaded elements
    Total,
}

impl AnalysisCount {
    /// All counts in row order
    pub const ALL: [AnalysisCount; 4] = [Self::Reachable, Self::Reflection, Self::Jni, Self::Total];

    /// Row label
    pub fn label(self) -> &'static str {
        match self {
            Self::Reachable => "Reachable",
            Self::Reflection => "Reflection",
            Self::Jni => "JNI",
            Self::Total => "Loaded",
        }
    }

    fn key(self) -> &'static str {
        match self {
            Self::Reachable => "reachable",
            Self::Reflection => "reflection",
            Self::Jni => "jni",
            Self::Total => "total",
        }
    }
}

/// How a metric value is displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    /// Plain count
    Count,
    /// Size in bytes
    Bytes,
    /// Duration in seconds
    Seconds,
    /// CPU load average
    Load,
}

impl Unit {
    /// Human-readable value
    pub fn format(self, value: f64) -> String {
        match self {
            Self::Count => fmt::format_number(value.max(0.0) as u64),
            Self::Bytes => fmt::bytes_to_human(value),
            Self::Seconds => fmt::seconds_to_human(value),
            Self::Load => format!("{:.3}", value),
        }
    }
}

/// One comparable quantity of a snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    /// A count from the analysis results grid
    Analysis(AnalysisCategory, AnalysisCount),
    /// Code area bytes
    CodeArea,
    /// Image heap bytes
    ImageHeap,
    /// Debug info bytes (only when both snapshots have it)
    DebugInfo,
    /// Bytes not attributed to another section
    OtherData,
    /// Total image bytes
    ImageTotal,
    /// Time spent in builder garbage collection
    GcTime,
    /// Peak resident set size of the builder
    PeakRss,
    /// Average CPU load during the build
    CpuLoad,
    /// Wall-clock build time
    BuildTime,
}

impl Metric {
    /// Image detail rows in display order
    pub const IMAGE_DETAILS: [Metric; 5] = [
        Self::CodeArea,
        Self::ImageHeap,
        Self::DebugInfo,
        Self::OtherData,
        Self::ImageTotal,
    ];

    /// Resource usage rows in display order
    pub const RESOURCE_USAGE: [Metric; 4] =
        [Self::GcTime, Self::PeakRss, Self::CpuLoad, Self::BuildTime];

    /// Every metric, grouped by report section
    pub fn all() -> Vec<Metric> {
        let analysis = AnalysisCategory::ALL.into_iter().flat_map(|category| {
            AnalysisCount::ALL
                .into_iter()
                .map(move |count| Metric::Analysis(category, count))
        });
        analysis
            .chain(Self::IMAGE_DETAILS)
            .chain(Self::RESOURCE_USAGE)
            .collect()
    }

    /// Section whose threshold policy applies
    pub fn class(self) -> MetricClass {
        match self {
            Self::Analysis(..) => MetricClass::Analysis,
            Self::CodeArea
            | Self::ImageHeap
            | Self::DebugInfo
            | Self::OtherData
            | Self::ImageTotal => MetricClass::ImageDetails,
            Self::GcTime | Self::PeakRss | Self::CpuLoad | Self::BuildTime => {
                MetricClass::ResourceUsage
            }
        }
    }

    /// Display unit
    pub fn unit(self) -> Unit {
        match self {
            Self::Analysis(..) => Unit::Count,
            Self::GcTime | Self::BuildTime => Unit::Seconds,
            Self::CpuLoad => Unit::Load,
            _ => Unit::Bytes,
        }
    }

    /// Row label
    pub fn label(self) -> String {
        match self {
            Self::Analysis(category, count) => format!("{} {}", count.label(), category.label()),
            Self::CodeArea => "Code area".to_string(),
            Self::ImageHeap => "Image heap".to_string(),
            Self::DebugInfo => "Debug info".to_string(),
            Self::OtherData => "Other data".to_string(),
            Self::ImageTotal => "Total".to_string(),
            Self::GcTime => "Garbage collection".to_string(),
            Self::PeakRss => "Peak RSS".to_string(),
            Self::CpuLoad => "CPU load".to_string(),
            Self::BuildTime => "Build time".to_string(),
        }
    }

    /// Stable machine-readable identifier
    pub fn key(self) -> String {
        match self {
            Self::Analysis(category, count) => {
                format!("analysis.{}.{}", category.label().to_lowercase(), count.key())
            }
            Self::CodeArea => "image.code_area".to_string(),
            Self::ImageHeap => "image.image_heap".to_string(),
            Self::DebugInfo => "image.debug_info".to_string(),
            Self::OtherData => "image.other_data".to_string(),
            Self::ImageTotal => "image.total".to_string(),
            Self::GcTime => "resources.gc_secs".to_string(),
            Self::PeakRss => "resources.peak_rss_bytes".to_string(),
            Self::CpuLoad => "resources.cpu_load".to_string(),
            Self::BuildTime => "resources.total_secs".to_string(),
        }
    }

    /// Value in `snapshot`, `None` when the underlying field is absent
    pub fn value(self, snapshot: &BuildSnapshot) -> Option<f64> {
        let details = &snapshot.image_details;
        let usage = &snapshot.resource_usage;
        let value = match self {
            Self::Analysis(category, count) => {
                let counts = snapshot.analysis_results.category(category);
                let n = match count {
                    AnalysisCount::Reachable => counts.reachable,
                    AnalysisCount::Reflection => counts.reflection,
                    AnalysisCount::Jni => counts.jni,
                    AnalysisCount::Total => counts.total,
                };
                n as f64
            }
            Self::CodeArea => details.code_area.bytes as f64,
            Self::ImageHeap => details.image_heap.bytes as f64,
            Self::DebugInfo => details.debug_info?.bytes as f64,
            Self::OtherData => details.other_bytes() as f64,
            Self::ImageTotal => details.total_bytes as f64,
            Self::GcTime => usage.garbage_collection.total_secs,
            Self::PeakRss => usage.memory.peak_rss_bytes as f64,
            Self::CpuLoad => usage.cpu.load,
            Self::BuildTime => usage.total_secs?,
        };
        Some(value)
    }

    /// Classified comparison, `None` unless both snapshots carry the metric
    pub fn compare(
        self,
        current: &BuildSnapshot,
        baseline: &BuildSnapshot,
        thresholds: &Thresholds,
    ) -> Option<Comparison> {
        let policy = thresholds.for_class(self.class());
        Some(Comparison::new(
            self.value(current)?,
            self.value(baseline)?,
            &policy,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::Verdict;
    use crate::snapshot::test_support;

    #[test]
    fn test_all_metrics_cover_every_section() {
        let all = Metric::all();
        assert_eq!(all.len(), 12 + 5 + 4);
        assert_eq!(all[0], Metric::Analysis(AnalysisCategory::Types, AnalysisCount::Reachable));
        assert!(all.contains(&Metric::ImageTotal));
        assert!(all.contains(&Metric::BuildTime));
    }

    #[test]
    fn test_types_metric_reads_classes_when_types_absent() {
        let snapshot = test_support::minimal();
        let metric = Metric::Analysis(AnalysisCategory::Types, AnalysisCount::Total);
        assert_eq!(metric.value(&snapshot), Some(4000.0));
    }

    #[test]
    fn test_optional_metrics_are_absent() {
        let snapshot = test_support::minimal();
        assert_eq!(Metric::DebugInfo.value(&snapshot), None);
        assert_eq!(Metric::BuildTime.value(&snapshot), None);
        assert!(Metric::DebugInfo
            .compare(&snapshot, &test_support::full(), &Thresholds::default())
            .is_none());
    }

    #[test]
    fn test_total_bytes_regression_is_detected() {
        let baseline = test_support::minimal();
        let mut current = test_support::minimal();
        current.image_details.total_bytes = 1100;

        let comparison = Metric::ImageTotal
            .compare(&current, &baseline, &Thresholds::default())
            .unwrap();
        assert_eq!(comparison.verdict, Verdict::Regressed);
        assert_eq!(comparison.delta, 100.0);
    }

    #[test]
    fn test_labels_and_keys() {
        let metric = Metric::Analysis(AnalysisCategory::Methods, AnalysisCount::Jni);
        assert_eq!(metric.label(), "JNI Methods");
        assert_eq!(metric.key(), "analysis.methods.jni");
        assert_eq!(Metric::PeakRss.key(), "resources.peak_rss_bytes");
        assert_eq!(Metric::CpuLoad.unit().format(3.14159), "3.142");
    }
}
