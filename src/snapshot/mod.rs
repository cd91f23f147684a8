//! Typed model of one native-image build-output record
//!
//! The toolchain writes this document when a build runs with
//! `-H:BuildOutputJSONFile=<path>`. Keys are snake_case. Optional sections
//! are `Option` so renderers branch on presence, never on sentinel values.
//! Unknown keys are ignored because newer toolchains keep adding fields.

pub mod loader;

pub use loader::SnapshotLoader;

use crate::error::ReportError;
use serde::{Deserialize, Serialize};

/// One parsed build-telemetry record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildSnapshot {
    /// Toolchain and environment information
    pub general_info: GeneralInfo,
    /// Reachability counts from the points-to analysis
    pub analysis_results: AnalysisResults,
    /// Size breakdown of the produced image
    pub image_details: ImageDetails,
    /// Resources consumed while building
    pub resource_usage: ResourceUsage,
}

/// Toolchain and environment information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneralInfo {
    /// Name of the generated image
    pub name: String,
    /// Platform version string
    pub graalvm_version: String,
    /// Language-runtime version
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub java_version: Option<String>,
    /// Vendor version string (newer toolchains)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor_version: Option<String>,
    /// C compiler used for linking
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub c_compiler: Option<String>,
    /// Garbage collector compiled into the image
    pub garbage_collector: String,
    /// Compiler tuning used for the build
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub graal_compiler: Option<GraalCompiler>,
}

/// Compiler tuning block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraalCompiler {
    /// Optimization level, e.g. "2" or "b"
    pub optimization_level: String,
    /// Target machine, e.g. "x86-64-v3"
    pub target_machine: String,
    /// Profile-guided optimization sources
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pgo: Option<Vec<String>>,
}

impl GeneralInfo {
    /// Whether the vendor string identifies an Oracle build
    pub fn is_oracle_build(&self) -> bool {
        self.vendor_version
            .as_deref()
            .is_some_and(|vendor| vendor.contains("Oracle GraalVM"))
    }
}

/// Reachability counts per analysis category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResults {
    /// Types (newer toolchains only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub types: Option<AnalysisCounts>,
    /// Classes
    pub classes: AnalysisCounts,
    /// Fields
    pub fields: AnalysisCounts,
    /// Methods
    pub methods: AnalysisCounts,
}

impl AnalysisResults {
    /// The "types" counts, falling back to "classes" for older toolchains
    pub fn types_or_classes(&self) -> &AnalysisCounts {
        self.types.as_ref().unwrap_or(&self.classes)
    }

    /// Counts for one reported category
    pub fn category(&self, category: AnalysisCategory) -> &AnalysisCounts {
        match category {
            AnalysisCategory::Types => self.types_or_classes(),
            AnalysisCategory::Fields => &self.fields,
            AnalysisCategory::Methods => &self.methods,
        }
    }
}

/// Categories shown in the analysis results grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisCategory {
    /// Types, or classes on older toolchains
    Types,
    /// Fields
    Fields,
    /// Methods
    Methods,
}

impl AnalysisCategory {
    /// All categories in column order
    pub const ALL: [AnalysisCategory; 3] = [Self::Types, Self::Fields, Self::Methods];

    /// Column label
    pub fn label(self) -> &'static str {
        match self {
            Self::Types => "Types",
            Self::Fields => "Fields",
            Self::Methods => "Methods",
        }
    }
}

/// Counts for one analysis category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisCounts {
    /// Loaded elements
    pub total: u64,
    /// Reachable elements
    pub reachable: u64,
    /// Elements registered for reflection
    pub reflection: u64,
    /// Elements registered for JNI access
    pub jni: u64,
}

impl AnalysisCounts {
    /// Whether `reachable + reflection + jni` exceeds `total`
    pub fn exceeds_total(&self) -> bool {
        self.reachable
            .saturating_add(self.reflection)
            .saturating_add(self.jni)
            > self.total
    }
}

/// Size breakdown of the produced image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageDetails {
    /// Total image size in bytes
    pub total_bytes: u64,
    /// Compiled code
    pub code_area: CodeArea,
    /// Pre-initialized heap
    pub image_heap: ImageHeap,
    /// Debug information
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug_info: Option<DebugInfo>,
    /// Methods compiled at run time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime_compiled_methods: Option<RuntimeCompiledMethods>,
}

impl ImageDetails {
    /// Debug info size, zero when absent
    pub fn debug_info_bytes(&self) -> u64 {
        self.debug_info.as_ref().map_or(0, |info| info.bytes)
    }

    /// Bytes not attributed to code area, image heap or debug info
    pub fn other_bytes(&self) -> u64 {
        self.total_bytes
            .saturating_sub(self.code_area.bytes)
            .saturating_sub(self.image_heap.bytes)
            .saturating_sub(self.debug_info_bytes())
    }

    /// Whether the attributed sections add up to more than the total
    pub fn components_exceed_total(&self) -> bool {
        self.code_area
            .bytes
            .saturating_add(self.image_heap.bytes)
            .saturating_add(self.debug_info_bytes())
            > self.total_bytes
    }
}

/// Code area segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeArea {
    /// Size in bytes
    pub bytes: u64,
    /// Number of compilation units
    pub compilation_units: u64,
}

/// Image heap segment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageHeap {
    /// Size in bytes
    pub bytes: u64,
    /// Object statistics
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub objects: Option<ObjectCount>,
    /// Embedded resources
    pub resources: Resources,
}

/// Object statistics of the image heap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectCount {
    /// Number of objects
    pub count: u64,
}

/// Embedded resources
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resources {
    /// Number of resources
    pub count: u64,
    /// Size in bytes
    pub bytes: u64,
}

/// Debug info segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebugInfo {
    /// Size in bytes
    pub bytes: u64,
}

/// Runtime compilation support
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeCompiledMethods {
    /// Number of methods
    pub count: u64,
    /// Bytes used for encoded graphs
    pub graph_encoding_bytes: u64,
}

/// Resources consumed while building
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceUsage {
    /// CPU usage
    pub cpu: Cpu,
    /// Garbage collection of the builder process
    pub garbage_collection: GarbageCollection,
    /// Memory usage
    pub memory: Memory,
    /// Wall-clock build time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_secs: Option<f64>,
}

/// CPU usage
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cpu {
    /// Average load
    pub load: f64,
    /// Available cores
    pub total_cores: u64,
}

/// Builder garbage collection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GarbageCollection {
    /// Number of collections
    pub count: u64,
    /// Time spent collecting
    pub total_secs: f64,
}

/// Memory usage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Memory {
    /// Physical memory of the build machine
    pub system_total: u64,
    /// Peak resident set size of the builder
    pub peak_rss_bytes: u64,
}

impl BuildSnapshot {
    /// Parse a build-output JSON document
    ///
    /// # Examples
    ///
    /// ```
    /// use native_image_report::snapshot::BuildSnapshot;
    ///
    /// assert!(BuildSnapshot::from_json("{}").is_err());
    /// ```
    pub fn from_json(json: &str) -> Result<Self, ReportError> {
        Self::from_json_named(json, "<inline>")
    }

    /// Parse a build-output JSON document, naming its origin in errors
    pub fn from_json_named(json: &str, origin: &str) -> Result<Self, ReportError> {
        serde_json::from_str(json).map_err(|source| ReportError::MalformedSnapshot {
            origin: origin.to_string(),
            source,
        })
    }

    /// Data-quality issues that do not prevent rendering
    pub fn quality_warnings(&self) -> Vec<String> {
        let analysis = &self.analysis_results;
        let mut warnings: Vec<String> = [
            ("types", analysis.types.as_ref()),
            ("classes", Some(&analysis.classes)),
            ("fields", Some(&analysis.fields)),
            ("methods", Some(&analysis.methods)),
        ]
        .into_iter()
        .filter_map(|(name, counts)| counts.map(|c| (name, c)))
        .filter(|(_, counts)| counts.exceeds_total())
        .map(|(name, counts)| {
            format!(
                "{}: reachable + reflection + jni ({}) exceeds total ({})",
                name,
                counts
                    .reachable
                    .saturating_add(counts.reflection)
                    .saturating_add(counts.jni),
                counts.total
            )
        })
        .collect();

        if self.image_details.components_exceed_total() {
            warnings.push(format!(
                "image details: code area, image heap and debug info exceed total bytes ({})",
                self.image_details.total_bytes
            ));
        }

        warnings
    }

    /// Issues that make a comparison against `baseline` mix categories
    pub fn comparison_warnings(&self, baseline: &BuildSnapshot) -> Vec<String> {
        let source = |snapshot: &BuildSnapshot| match snapshot.analysis_results.types {
            Some(_) => "types",
            None => "classes",
        };
        let (current, base) = (source(self), source(baseline));
        if current == base {
            return Vec::new();
        }
        vec![format!(
            "Types row compares current {} against baseline {}",
            current, base
        )]
    }
}
