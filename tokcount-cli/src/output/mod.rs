//! Output placement module
//!
//! A single input writes to a single output file. A directory of inputs
//! writes into an output directory, one file per input with the same name.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tokcount_core::CoreError;

/// Check that `path` can be used as a single output file
///
/// Parent directories are created as needed.
pub fn prepare_file_target(path: &Path) -> Result<()> {
    if path.is_dir() {
        return Err(CoreError::OutputIsDirectory(path.to_path_buf()).into());
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
    }
    Ok(())
}

/// Create the output directory for a directory run
pub fn prepare_directory_target(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory: {}", dir.display()))
}

/// Output path inside `output_dir` for `input`, keeping its file name
pub fn target_in_directory(output_dir: &Path, input: &Path) -> Result<PathBuf> {
    let name = input
        .file_name()
        .with_context(|| format!("Input has no file name: {}", input.display()))?;
    Ok(output_dir.join(name))
}

/// Write a finished output file
pub fn write_output(path: &Path, contents: &[u8]) -> Result<()> {
    fs::write(path, contents).with_context(|| format!("Failed to write to {}", path.display()))
}
