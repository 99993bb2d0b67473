//! Locating containers and their detection reports on disk.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::pcd_pipeline::common::error::{PcdError, Result};

pub const CONTAINER_EXTENSION: &str = "lc_pcd";

/// Directory, next to the container, that holds detection reports.
pub const REPORT_DIR: &str = "detection_results";

fn has_container_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().eq_ignore_ascii_case(CONTAINER_EXTENSION))
        .unwrap_or(false)
}

/// Resolves `path` to a container file.
///
/// A file path is returned as is. For a directory the first `.lc_pcd` entry in
/// name order is picked.
pub fn locate_container(path: impl AsRef<Path>) -> Result<PathBuf> {
    let path = path.as_ref();
    if !path.is_dir() {
        return Ok(path.to_path_buf());
    }

    let entries = std::fs::read_dir(path)
        .map_err(|e| PcdError::InputReadError(format!("{}: {}", path.display(), e)))?;

    let mut candidates = Vec::new();
    for entry in entries {
        let entry_path = entry?.path();
        if entry_path.is_file() && has_container_extension(&entry_path) {
            candidates.push(entry_path);
        }
    }
    candidates.sort();

    let found = candidates.into_iter().next().ok_or_else(|| {
        PcdError::InputReadError(format!("no .lc_pcd file found in {}", path.display()))
    })?;
    debug!("Located container {}", found.display());
    Ok(found)
}

/// Where the detection tool writes the report for `container`:
/// `<dir>/detection_results/<stem>_results.txt`.
pub fn default_report_path(container: impl AsRef<Path>) -> PathBuf {
    let container = container.as_ref();
    let stem = container
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let dir = container.parent().unwrap_or_else(|| Path::new(""));
    dir.join(REPORT_DIR).join(format!("{stem}_results.txt"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn file_path_is_returned_unchanged() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("scan.lc_pcd");
        std::fs::write(&file, b"").unwrap();
        assert_eq!(locate_container(&file).unwrap(), file);
    }

    #[test]
    fn picks_first_container_in_directory() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("notes.txt"), b"").unwrap();
        std::fs::write(dir.path().join("b.lc_pcd"), b"").unwrap();
        std::fs::write(dir.path().join("a.LC_PCD"), b"").unwrap();

        let found = locate_container(dir.path()).unwrap();
        assert_eq!(found.file_name().unwrap(), "a.LC_PCD");
    }

    #[test]
    fn directory_without_container_is_an_error() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("image.png"), b"").unwrap();
        assert!(matches!(
            locate_container(dir.path()),
            Err(PcdError::InputReadError(_))
        ));
    }

    #[test]
    fn report_path_follows_detection_layout() {
        let path = default_report_path("/data/2-1/scan_01.lc_pcd");
        assert_eq!(
            path,
            PathBuf::from("/data/2-1/detection_results/scan_01_results.txt")
        );
    }
}
