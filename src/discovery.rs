//! Scenario directory discovery.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{ConvertError, Result};

/// Every immediate subdirectory of `root`, sorted by path.
///
/// Plain files at the top level are skipped; nothing below the first
/// level is visited.
pub fn scenario_folder_paths(root: &Path) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(ConvertError::config(format!(
            "Folder path is not existing, folder path: {}",
            root.display()
        )));
    }

    let entries = fs::read_dir(root).map_err(|e| ConvertError::io(root, e))?;
    let mut paths = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| ConvertError::io(root, e))?.path();
        if path.is_dir() {
            paths.push(path);
        } else {
            debug!(path = %path.display(), "skipping non-directory entry");
        }
    }
    paths.sort();
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lists_only_directories() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir(tmp.path().join("SAT11-HAND")).unwrap();
        fs::create_dir(tmp.path().join("ASP-POTASSCO")).unwrap();
        fs::create_dir_all(tmp.path().join("ASP-POTASSCO").join("nested")).unwrap();
        fs::write(tmp.path().join("readme.md"), "x").unwrap();

        let paths = scenario_folder_paths(tmp.path()).unwrap();
        assert_eq!(
            paths,
            vec![
                tmp.path().join("ASP-POTASSCO"),
                tmp.path().join("SAT11-HAND")
            ]
        );
    }

    #[test]
    fn test_empty_root() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(scenario_folder_paths(tmp.path()).unwrap().is_empty());
    }

    #[test]
    fn test_missing_root() {
        let tmp = tempfile::tempdir().unwrap();
        let err = scenario_folder_paths(&tmp.path().join("missing")).unwrap_err();
        assert!(matches!(err, ConvertError::Configuration(_)));
    }

    #[test]
    fn test_root_is_file() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("scenarios.txt");
        fs::write(&file, "").unwrap();
        assert!(scenario_folder_paths(&file).is_err());
    }
}
