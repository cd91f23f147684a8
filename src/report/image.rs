//! Image details section: size breakdown of the produced binary

use super::block::{code, strong, Block, Cell, Row, Table};
use super::{compared_to, glossary, heading};
use crate::classify::Thresholds;
use crate::fmt;
use crate::metric::Metric;
use crate::snapshot::{BuildSnapshot, ImageDetails};

const TITLE: &str = "Image Details";

fn metric_label(metric: Metric) -> Cell {
    let anchor = match metric {
        Metric::CodeArea => Some("glossary-code-area"),
        Metric::ImageHeap => Some("glossary-image-heap"),
        Metric::DebugInfo => Some("glossary-debug-info"),
        _ => None,
    };
    let label = metric.label();
    match anchor {
        Some(anchor) => Cell::markup(glossary(&label, anchor)).left(),
        None => Cell::text(&label).left(),
    }
}

fn size_cell(metric: Metric, bytes: f64) -> Cell {
    let size = fmt::bytes_to_human(bytes);
    match metric {
        Metric::ImageTotal => Cell::markup(strong(&size)).right(),
        _ => Cell::text(&size).right(),
    }
}

/// Rows shown for `details`; debug info only when present
fn rows_for(details: &ImageDetails) -> impl Iterator<Item = Metric> + '_ {
    Metric::IMAGE_DETAILS
        .into_iter()
        .filter(move |metric| *metric != Metric::DebugInfo || details.debug_info.is_some())
}

fn heap_details(details: &ImageDetails) -> String {
    let heap = &details.image_heap;
    let resources = format!(
        "{} resources ({})",
        fmt::format_number(heap.resources.count),
        fmt::bytes_to_human(heap.resources.bytes as f64)
    );
    let mut text = match heap.objects {
        Some(objects) => format!("{} objects and {}", fmt::format_number(objects.count), resources),
        None => resources,
    };
    if let Some(runtime) = details.runtime_compiled_methods {
        text.push_str(&format!(
            "<br>{} runtime compiled methods ({} graph encodings)",
            fmt::format_number(runtime.count),
            fmt::bytes_to_human(runtime.graph_encoding_bytes as f64)
        ));
    }
    text
}

/// Render the image details of one snapshot
pub fn render(snapshot: &BuildSnapshot) -> Vec<Block> {
    let details = &snapshot.image_details;
    let total = details.total_bytes as f64;
    let mut table = Table::new().with_header(
        Row::new()
            .cell(Cell::text("Category").left())
            .cell(Cell::text("Size").right())
            .cell(Cell::text("in %").right())
            .cell(Cell::text("Details").left()),
    );

    for metric in rows_for(details) {
        let bytes = metric.value(snapshot).unwrap_or_default();
        let extra = match metric {
            Metric::CodeArea => format!(
                "{} compilation units",
                fmt::format_number(details.code_area.compilation_units)
            ),
            Metric::ImageHeap => heap_details(details),
            _ => String::new(),
        };
        table.push(
            Row::new()
                .cell(metric_label(metric))
                .cell(size_cell(metric, bytes))
                .cell(Cell::text(&fmt::percent_of(bytes, total)).right())
                .cell(Cell::markup(extra).left()),
        );
    }

    vec![heading(TITLE), Block::Table(table)]
}

/// Render the image details of `current` next to `baseline` with classified deltas
pub fn render_comparison(
    current: &BuildSnapshot,
    baseline: &BuildSnapshot,
    base_label: &str,
    thresholds: &Thresholds,
) -> Vec<Block> {
    let details = &current.image_details;
    let total = details.total_bytes as f64;
    let mut table = Table::new().with_header(
        Row::new()
            .cell(Cell::text("Category").left())
            .cell(Cell::text("Size").right())
            .cell(Cell::text("in %").right())
            .cell(Cell::markup(code(base_label)).right())
            .cell(Cell::markup(compared_to(base_label)).right()),
    );

    for metric in rows_for(details) {
        let bytes = metric.value(current).unwrap_or_default();
        let (baseline_size, delta) = match metric.compare(current, baseline, thresholds) {
            Some(comparison) => (
                fmt::bytes_to_human(comparison.baseline),
                format!(
                    "{} ({})",
                    comparison.marked_percent(),
                    fmt::bytes_delta_to_human(comparison.delta)
                ),
            ),
            None => (fmt::NOT_APPLICABLE.to_string(), fmt::NOT_APPLICABLE.to_string()),
        };
        table.push(
            Row::new()
                .cell(metric_label(metric))
                .cell(size_cell(metric, bytes))
                .cell(Cell::text(&fmt::percent_of(bytes, total)).right())
                .cell(Cell::text(&baseline_size).right())
                .cell(Cell::text(&delta).right()),
        );
    }

    vec![heading(TITLE), Block::Table(table)]
}
