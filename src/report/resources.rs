//! Resource usage section: builder GC, peak RSS and CPU load

use super::block::{code, Block, Cell, Row, Table};
use super::{compared_to, glossary, heading};
use crate::classify::Thresholds;
use crate::fmt;
use crate::metric::Metric;
use crate::snapshot::BuildSnapshot;

const TITLE: &str = "Resource Usage";

fn metric_label(metric: Metric) -> Cell {
    let anchor = match metric {
        Metric::GcTime => "glossary-garbage-collections",
        Metric::PeakRss => "glossary-peak-rss",
        Metric::CpuLoad => "glossary-cpu-load",
        _ => "glossary-build-output",
    };
    Cell::markup(glossary(&metric.label(), anchor)).left()
}

/// Summary of one resource metric, e.g. `2.00GB (12.500% of 16.00GB system memory)`
fn describe(metric: Metric, snapshot: &BuildSnapshot) -> Option<String> {
    let usage = &snapshot.resource_usage;
    let text = match metric {
        Metric::GcTime => {
            let gc = &usage.garbage_collection;
            let share = usage
                .total_secs
                .map(|total| format!(" ({} of total time)", fmt::percent_of(gc.total_secs, total)))
                .unwrap_or_default();
            format!(
                "{}{} in {} GCs",
                fmt::seconds_to_human(gc.total_secs),
                share,
                fmt::format_number(gc.count)
            )
        }
        Metric::PeakRss => {
            let memory = &usage.memory;
            format!(
                "{} ({} of {} system memory)",
                fmt::bytes_to_human(memory.peak_rss_bytes as f64),
                fmt::percent_of(memory.peak_rss_bytes as f64, memory.system_total as f64),
                fmt::bytes_to_human(memory.system_total as f64)
            )
        }
        Metric::CpuLoad => {
            let cpu = &usage.cpu;
            format!(
                "{:.3} ({} of {} CPU cores)",
                cpu.load,
                fmt::percent_of(cpu.load, cpu.total_cores as f64),
                cpu.total_cores
            )
        }
        Metric::BuildTime => fmt::seconds_to_human(usage.total_secs?),
        _ => return None,
    };
    Some(text)
}

/// Render the resource usage of one snapshot
pub fn render(snapshot: &BuildSnapshot) -> Vec<Block> {
    let mut table = Table::new();
    for metric in [Metric::GcTime, Metric::PeakRss, Metric::CpuLoad] {
        if let Some(text) = describe(metric, snapshot) {
            table.push(
                Row::new()
                    .cell(metric_label(metric))
                    .cell(Cell::text(&text).left()),
            );
        }
    }

    vec![heading(TITLE), Block::Table(table)]
}

/// Render resource usage of `current` next to `baseline` with classified deltas
///
/// Build time is only listed when both snapshots report it.
pub fn render_comparison(
    current: &BuildSnapshot,
    baseline: &BuildSnapshot,
    labels: (&str, &str),
    thresholds: &Thresholds,
) -> Vec<Block> {
    let (head_label, base_label) = labels;
    let mut table = Table::new().with_header(
        Row::new()
            .cell(Cell::text("Metric").left())
            .cell(Cell::markup(code(head_label)).left())
            .cell(Cell::markup(code(base_label)).left())
            .cell(Cell::markup(compared_to(base_label)).right()),
    );

    for metric in Metric::RESOURCE_USAGE {
        let Some(comparison) = metric.compare(current, baseline, thresholds) else {
            continue;
        };
        let (Some(now), Some(before)) = (describe(metric, current), describe(metric, baseline))
        else {
            continue;
        };
        table.push(
            Row::new()
                .cell(metric_label(metric))
                .cell(Cell::text(&now).left())
                .cell(Cell::text(&before).left())
                .cell(Cell::text(&comparison.marked_percent()).right()),
        );
    }

    vec![heading(TITLE), Block::Table(table)]
}
