//! Build-output file loading

use super::BuildSnapshot;
use crate::error::ReportError;
use crate::infra::{FileSystem, RealFileSystem};
use anyhow::Result;
use std::io;
use std::path::Path;

/// Reads build-output JSON files into snapshots
pub struct SnapshotLoader;

impl SnapshotLoader {
    /// Load the snapshot at `path`
    ///
    /// Returns `Ok(None)` when the file does not exist: the build may simply not
    /// have run with build-output JSON enabled, so callers skip reporting.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use native_image_report::snapshot::SnapshotLoader;
    /// use std::path::Path;
    ///
    /// if let Some(snapshot) = SnapshotLoader::load(Path::new("build-output.json"))? {
    ///     println!("{}", snapshot.general_info.name);
    /// }
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn load(path: &Path) -> Result<Option<BuildSnapshot>> {
        Self::load_with_fs(path, &RealFileSystem)
    }

    /// Load a snapshot with a custom filesystem implementation
    pub fn load_with_fs<FS: FileSystem>(path: &Path, fs: &FS) -> Result<Option<BuildSnapshot>> {
        let contents = match fs.read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::warn!(
                    "No build output found at {}, skipping report",
                    path.display()
                );
                return Ok(None);
            }
            Err(source) => {
                return Err(ReportError::Io {
                    context: format!("reading {}", path.display()),
                    source,
                }
                .into())
            }
        };

        let snapshot = BuildSnapshot::from_json_named(&contents, &path.display().to_string())?;
        for warning in snapshot.quality_warnings() {
            log::warn!("{}: {}", path.display(), warning);
        }
        log::debug!(
            "Loaded build output for '{}' from {}",
            snapshot.general_info.name,
            path.display()
        );

        Ok(Some(snapshot))
    }

    /// Load a baseline snapshot, which must exist
    pub fn load_baseline(path: &Path) -> Result<BuildSnapshot> {
        Self::load_baseline_with_fs(path, &RealFileSystem)
    }

    /// Load a baseline snapshot with a custom filesystem implementation
    pub fn load_baseline_with_fs<FS: FileSystem>(path: &Path, fs: &FS) -> Result<BuildSnapshot> {
        Self::load_with_fs(path, fs)?.ok_or_else(|| {
            ReportError::BaselineNotFound {
                path: path.to_path_buf(),
            }
            .into()
        })
    }
}
