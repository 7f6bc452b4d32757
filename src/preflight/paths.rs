//! Filesystem preflight checks.

use super::CheckResult;
use crate::core::catalog::Catalog;
use std::path::Path;

/// Check that the source directory exists.
pub fn check_source(path: &Path) -> CheckResult {
    match crate::utils::fs::ensure_directory(path) {
        Ok(()) => CheckResult::ok("Source", &path.display().to_string()),
        Err(e) => CheckResult::fail(
            "Source",
            &e.to_string(),
            "Set paths.source_dir or pass --source",
        ),
    }
}

/// Check that the target root exists or can be created.
pub fn check_target(path: &Path) -> CheckResult {
    if path.is_dir() {
        return CheckResult::ok("Target", &path.display().to_string());
    }
    if path.exists() {
        return CheckResult::fail(
            "Target",
            &format!("{} is not a directory", path.display()),
            "Point paths.target_dir at a directory",
        );
    }
    CheckResult::ok("Target", &format!("{} (will be created)", path.display()))
}

/// Check that an existing catalog can be read.
pub fn check_catalog(path: &Path) -> CheckResult {
    if !path.exists() {
        return CheckResult::ok("Catalog", &format!("{} (will be created)", path.display()));
    }
    match Catalog::load(path) {
        Ok(catalog) => CheckResult::ok(
            "Catalog",
            &format!("{} ({} rows)", path.display(), catalog.len()),
        ),
        Err(e) => CheckResult::fail(
            "Catalog",
            &e.to_string(),
            "Close the workbook in other programs or restore a backup",
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_check_source() {
        let temp_dir = TempDir::new().unwrap();
        assert!(check_source(temp_dir.path()).success);
        assert!(!check_source(&temp_dir.path().join("missing")).success);
    }

    #[test]
    fn test_check_target() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("file");
        std::fs::write(&file, "x").unwrap();

        assert!(check_target(temp_dir.path()).success);
        assert!(check_target(&temp_dir.path().join("new")).success);
        assert!(!check_target(&file).success);
    }

    #[test]
    fn test_check_catalog() {
        let temp_dir = TempDir::new().unwrap();
        let bogus = temp_dir.path().join("bogus.xlsx");
        std::fs::write(&bogus, "not a workbook").unwrap();

        assert!(check_catalog(&temp_dir.path().join("new.xlsx")).success);
        assert!(!check_catalog(&bogus).success);
    }
}
