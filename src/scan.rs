use std::fs;
use std::path::Path;
use tracing::{debug, warn};

use crate::error::{CollectError, Result};

/// Names of the directories directly under `root`, sorted.
///
/// Symlinks to directories count as directories. Fails if `root` is missing
/// or is not a directory.
pub fn rule_directories(root: &Path) -> Result<Vec<String>> {
    let entries = fs::read_dir(root).map_err(|e| CollectError::io(root, e))?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| CollectError::io(root, e))?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        match entry.file_name().into_string() {
            Ok(name) => names.push(name),
            Err(raw) => {
                warn!(name = ?raw, "Skipping rule directory with non UTF-8 name");
            }
        }
    }
    names.sort();

    debug!(root = %root.display(), count = names.len(), "Scanned rules folder");
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn lists_only_immediate_directories_in_sorted_order() {
        let root = tempdir().unwrap();
        fs::create_dir(root.path().join("zeta")).unwrap();
        fs::create_dir(root.path().join("alpha")).unwrap();
        fs::create_dir_all(root.path().join("alpha").join("nested")).unwrap();
        fs::write(root.path().join("notes.txt"), "not a rule").unwrap();

        let names = rule_directories(root.path()).unwrap();
        assert_eq!(names, vec!["alpha".to_string(), "zeta".to_string()]);
    }

    #[test]
    fn missing_root_is_an_io_error() {
        let root = tempdir().unwrap();
        let missing = root.path().join("does-not-exist");

        let err = rule_directories(&missing).unwrap_err();
        match err {
            CollectError::Io { path, .. } => assert_eq!(path, missing),
            other => panic!("expected Io error, got {other:?}"),
        }
    }

    #[test]
    fn file_as_root_is_an_error() {
        let root = tempdir().unwrap();
        let file = root.path().join("rules");
        fs::write(&file, "").unwrap();

        assert!(rule_directories(&file).is_err());
    }
}
