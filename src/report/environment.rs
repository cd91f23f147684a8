//! Environment section: toolchain versions, compiler tuning, C compiler and GC

use super::block::{escape_html, Block, Cell, Row, Table};
use super::{glossary, heading};
use crate::snapshot::{BuildSnapshot, GeneralInfo, GraalCompiler};

/// Render the environment of `snapshot`
pub fn render(snapshot: &BuildSnapshot) -> Vec<Block> {
    let info = &snapshot.general_info;
    let mut table = Table::new().row(version_row(info));

    if let Some(compiler) = &info.graal_compiler {
        table.push(
            Row::new()
                .cell(label("Graal compiler", "glossary-graal-compiler"))
                .cell(Cell::markup(compiler_summary(info, compiler)).colspan(3)),
        );
    }

    if let Some(c_compiler) = &info.c_compiler {
        table.push(
            Row::new()
                .cell(label("C compiler", "glossary-ccompiler"))
                .cell(Cell::text(c_compiler).colspan(3)),
        );
    }

    table.push(
        Row::new()
            .cell(label("Garbage collector", "glossary-gc"))
            .cell(Cell::text(&info.garbage_collector).colspan(3)),
    );

    vec![heading("Environment"), Block::Table(table)]
}

/// Vendor builds report Java and vendor versions; older builds the platform version
fn version_row(info: &GeneralInfo) -> Row {
    let platform = || label("GraalVM version", "glossary-version-info");
    let java = || label("Java version", "glossary-java-info");
    let vendor = || label("Vendor version", "glossary-java-info");

    match (&info.vendor_version, &info.java_version) {
        (Some(vendor_version), Some(java_version)) => Row::new()
            .cell(java())
            .cell(Cell::text(java_version))
            .cell(vendor())
            .cell(Cell::text(vendor_version)),
        (Some(vendor_version), None) => Row::new()
            .cell(vendor())
            .cell(Cell::text(vendor_version).colspan(3)),
        (None, Some(java_version)) => Row::new()
            .cell(platform())
            .cell(Cell::text(&info.graalvm_version))
            .cell(java())
            .cell(Cell::text(java_version)),
        (None, None) => Row::new()
            .cell(platform())
            .cell(Cell::text(&info.graalvm_version).colspan(3)),
    }
}

fn label(text: &str, anchor: &str) -> Cell {
    Cell::markup(glossary(text, anchor)).left()
}

fn compiler_summary(info: &GeneralInfo, compiler: &GraalCompiler) -> String {
    let mut summary = format!(
        "optimization level: {}, target machine: {}",
        escape_html(&compiler.optimization_level),
        escape_html(&compiler.target_machine)
    );
    if info.is_oracle_build() {
        let pgo = compiler
            .pgo
            .as_ref()
            .filter(|sources| !sources.is_empty())
            .map_or_else(|| "off".to_string(), |sources| escape_html(&sources.join("+")));
        summary.push_str(&format!(
            ", {}: {}",
            glossary("PGO", "recommendation-pgo"),
            pgo
        ));
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::Document;
    use crate::snapshot::test_support;

    fn rendered(snapshot: &BuildSnapshot) -> String {
        let mut doc = Document::new();
        doc.extend(render(snapshot));
        doc.render()
    }

    #[test]
    fn test_minimal_environment_shows_platform_version_and_gc() {
        let out = rendered(&test_support::minimal());
        assert!(out.starts_with("#### Environment"));
        assert!(out.contains("GraalVM version"));
        assert!(out.contains("GraalVM CE 22.3.0"));
        assert!(out.contains("Serial GC"));
        assert!(!out.contains("Vendor version"));
        assert!(!out.contains("Graal compiler"));
        assert!(!out.contains("C compiler"));
    }

    #[test]
    fn test_vendor_version_replaces_platform_version() {
        let out = rendered(&test_support::full());
        assert!(out.contains("Vendor version"));
        assert!(out.contains("Oracle GraalVM 21.0.1+12.1"));
        assert!(out.contains("21.0.1+12"));
        assert!(!out.contains("GraalVM version"));
        assert!(out.contains("gcc (linux, x86_64, 11.4.0)"));
    }

    #[test]
    fn test_pgo_shown_for_oracle_builds_only() {
        let mut snapshot = test_support::full();
        let out = rendered(&snapshot);
        assert!(out.contains("optimization level: 2, target machine: x86-64-v3"));
        assert!(out.contains("PGO</a>: ML-inferred"));

        snapshot.general_info.graal_compiler.as_mut().unwrap().pgo = None;
        assert!(rendered(&snapshot).contains("PGO</a>: off"));

        snapshot.general_info.vendor_version = Some("GraalVM CE 21.0.1+12.1".to_string());
        assert!(!rendered(&snapshot).contains("PGO"));
    }

    #[test]
    fn test_multiple_pgo_sources_are_joined() {
        let mut snapshot = test_support::full();
        snapshot.general_info.graal_compiler.as_mut().unwrap().pgo =
            Some(vec!["user-provided".to_string(), "ML-inferred".to_string()]);
        assert!(rendered(&snapshot).contains("PGO</a>: user-provided+ML-inferred"));
    }
}
