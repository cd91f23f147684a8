//! Report rendering
//!
//! Section renderers turn snapshots into [`Block`]s; [`ReportAssembler`]
//! arranges them into a [`Document`] that renders as a job summary or a
//! review comment body (HTML tables mixed with fenced mermaid charts).

pub mod analysis;
pub mod assemble;
pub mod block;
pub mod chart;
pub mod environment;
pub mod image;
pub mod resources;

pub use assemble::ReportAssembler;
pub use block::{Block, Document};
pub use chart::ChartSelection;

/// Glossary of the toolchain's build output, target of every label link
pub const DOCS_BASE: &str =
    "https://github.com/oracle/graal/blob/master/docs/reference-manual/native-image/BuildOutput.md";

/// Label linking to a glossary entry
pub(crate) fn glossary(label: &str, anchor: &str) -> String {
    block::link(label, &format!("{}#{}", DOCS_BASE, anchor))
}

/// Section heading
pub(crate) fn heading(title: &str) -> Block {
    Block::Heading(4, title.to_string())
}

/// Column header naming the comparison baseline
pub(crate) fn compared_to(base: &str) -> String {
    format!("compared to {}", block::code(base))
}
