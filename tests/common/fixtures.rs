//! Build-output fixtures
//!
//! Documents follow the JSON written by `native-image -H:BuildOutputJSONFile`.

#![allow(dead_code)]

use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Re-export anyhow for convenience
pub use anyhow;

/// Snapshot with every required field and no optional ones
pub fn minimal_snapshot() -> Value {
    json!({
        "general_info": {
            "name": "helloworld",
            "graalvm_version": "GraalVM CE 22.3.0",
            "garbage_collector": "Serial GC"
        },
        "analysis_results": {
            "classes": { "total": 4000, "reachable": 2000, "reflection": 100, "jni": 50 },
            "fields": { "total": 9000, "reachable": 3000, "reflection": 30, "jni": 20 },
            "methods": { "total": 40000, "reachable": 10000, "reflection": 500, "jni": 60 }
        },
        "image_details": {
            "total_bytes": 1_000_000,
            "code_area": { "bytes": 400_000, "compilation_units": 12_345 },
            "image_heap": {
                "bytes": 300_000,
                "resources": { "count": 2, "bytes": 64 }
            }
        },
        "resource_usage": {
            "cpu": { "load": 4.0, "total_cores": 8 },
            "garbage_collection": { "count": 12, "total_secs": 1.5 },
            "memory": {
                "system_total": 17_179_869_184u64,
                "peak_rss_bytes": 2_147_483_648u64
            }
        }
    })
}

/// Snapshot from a recent vendor build with every optional section
pub fn full_snapshot() -> Value {
    let mut snapshot = minimal_snapshot();
    snapshot["general_info"]["java_version"] = json!("21.0.1+12");
    snapshot["general_info"]["vendor_version"] = json!("Oracle GraalVM 21.0.1+12.1");
    snapshot["general_info"]["c_compiler"] = json!("gcc (linux, x86_64, 11.4.0)");
    snapshot["general_info"]["graal_compiler"] = json!({
        "optimization_level": "2",
        "target_machine": "x86-64-v3",
        "pgo": ["ML-inferred"]
    });
    snapshot["analysis_results"]["types"] =
        json!({ "total": 4100, "reachable": 2100, "reflection": 110, "jni": 55 });
    snapshot["image_details"]["debug_info"] = json!({ "bytes": 100_000 });
    snapshot["image_details"]["image_heap"]["objects"] = json!({ "count": 5432 });
    snapshot["resource_usage"]["total_secs"] = json!(125.0);
    snapshot
}

/// Write `snapshot` as `build-output.json` in a fresh temporary directory
///
/// # Returns
///
/// A tuple of (TempDir, PathBuf to the file) - the TempDir must be kept alive
pub fn write_snapshot(snapshot: Value) -> anyhow::Result<(TempDir, PathBuf)> {
    let temp_dir = TempDir::new()?;
    let path = write_named(temp_dir.path(), "build-output.json", &snapshot)?;
    Ok((temp_dir, path))
}

/// Write `snapshot` to `dir/name`
pub fn write_named(dir: &Path, name: &str, snapshot: &Value) -> anyhow::Result<PathBuf> {
    let path = dir.join(name);
    fs::write(&path, serde_json::to_string_pretty(snapshot)?)?;
    Ok(path)
}

/// Current and baseline snapshots in one directory
pub fn write_pair(current: Value, baseline: Value) -> anyhow::Result<(TempDir, PathBuf, PathBuf)> {
    let temp_dir = TempDir::new()?;
    let current = write_named(temp_dir.path(), "current.json", &current)?;
    let baseline = write_named(temp_dir.path(), "baseline.json", &baseline)?;
    Ok((temp_dir, current, baseline))
}
