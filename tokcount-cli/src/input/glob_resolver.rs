//! Input path resolution
//!
//! An input names a directory (all regular files directly inside it), a
//! single file, or a glob pattern.

use crate::error::CliError;
use anyhow::{Context, Result};
use glob::glob;
use std::fs;
use std::path::{Path, PathBuf};

/// Resolve a counting or conversion input to the files it names
pub fn resolve_input(input: &str) -> Result<Vec<PathBuf>> {
    let path = Path::new(input);
    if path.is_dir() {
        list_directory(path)
    } else if path.is_file() {
        Ok(vec![path.to_path_buf()])
    } else {
        resolve_patterns(&[input.to_string()])
    }
}

/// Regular files directly inside `dir`, sorted by path
pub fn list_directory(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory: {}", dir.display()))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry
            .with_context(|| format!("Failed to read directory: {}", dir.display()))?
            .path();
        if path.is_file() {
            files.push(path);
        }
    }

    if files.is_empty() {
        return Err(CliError::NoInputFiles(dir.display().to_string()).into());
    }

    files.sort();
    Ok(files)
}

/// Resolve file patterns to actual file paths
pub fn resolve_patterns(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for pattern in patterns {
        let paths = glob(pattern).with_context(|| format!("Invalid glob pattern: {}", pattern))?;

        for path_result in paths {
            let path =
                path_result.with_context(|| format!("Error resolving pattern: {}", pattern))?;

            if path.is_file() {
                files.push(path);
            }
        }
    }

    if files.is_empty() {
        return Err(CliError::NoInputFiles(patterns.join(", ")).into());
    }

    // Remove duplicates and sort
    files.sort();
    files.dedup();

    Ok(files)
}
