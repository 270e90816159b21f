//! Copies per-product resources next to a generated Dockerfile.

use std::fs;
use std::path::Path;

use walkdir::WalkDir;

use crate::domain::AppError;

pub const SCRIPTS_DIR: &str = "scripts";
pub const CONFIG_DIR: &str = "config";
pub const README: &str = "README.md";

/// Copy a single file and give the copy the source's permission bits.
pub fn copy_file(from: &Path, to: &Path) -> Result<(), AppError> {
    if !from.is_file() {
        return Err(AppError::ResourceNotFound(from.to_path_buf()));
    }
    if let Some(parent) = to.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::copy(from, to)?;
    fs::set_permissions(to, fs::metadata(from)?.permissions())?;
    Ok(())
}

/// Recursively copy `from` into `to`, merging with whatever `to` already holds.
pub fn copy_dir(from: &Path, to: &Path) -> Result<(), AppError> {
    let walk_error =
        |path: &Path, details: String| AppError::Walk { path: path.to_path_buf(), details };

    for entry in WalkDir::new(from).sort_by_file_name() {
        let entry = entry.map_err(|e| walk_error(from, e.to_string()))?;
        let rel_path =
            entry.path().strip_prefix(from).map_err(|e| walk_error(entry.path(), e.to_string()))?;
        let dest_path = to.join(rel_path);

        if entry.file_type().is_dir() {
            let metadata = entry.metadata().map_err(|e| walk_error(entry.path(), e.to_string()))?;
            fs::create_dir_all(&dest_path)?;
            fs::set_permissions(&dest_path, metadata.permissions())?;
        } else {
            copy_file(entry.path(), &dest_path)?;
        }
    }
    Ok(())
}

/// Copy `<resources>/<subdir>` into `<target>/<subdir>`. A missing source is skipped.
pub fn deploy_subdir(resources: &Path, subdir: &str, target: &Path) -> Result<bool, AppError> {
    let source = resources.join(subdir);
    if !source.is_dir() {
        log::debug!("No {} resources at {}", subdir, source.display());
        return Ok(false);
    }
    copy_dir(&source, &target.join(subdir))?;
    Ok(true)
}

/// Copy the product README. Unlike the resource directories it must exist.
pub fn deploy_readme(resources: &Path, target: &Path) -> Result<(), AppError> {
    copy_file(&resources.join(README), &target.join(README))
}
