use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, RewriteError};
use crate::patterns;

/// Inserted before the extension of every rewritten file.
pub const OUTPUT_MARKER: &str = "_new";

/// Lists report files directly inside `dir`.
///
/// An entry qualifies when its extension holds three consecutive digits and
/// its path does not carry [`OUTPUT_MARKER`]. Order is whatever the
/// filesystem enumerates.
pub fn discover_inputs(dir: &Path) -> Result<Vec<PathBuf>> {
    let numbered = patterns::numbered_extension()?;
    let entries = fs::read_dir(dir).map_err(|e| RewriteError::io(dir, e))?;

    let mut inputs = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| RewriteError::io(dir, e))?.path();

        let has_numbered_extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| numbered.find(ext).is_some());
        if !has_numbered_extension {
            continue;
        }
        if path.to_string_lossy().contains(OUTPUT_MARKER) {
            log::debug!("Skipping generated output {}", path.display());
            continue;
        }
        inputs.push(path);
    }

    log::info!("Found {} input files in {}", inputs.len(), dir.display());
    Ok(inputs)
}

/// `<stem>_new<.ext>` next to `input`.
pub fn output_path(input: &Path) -> PathBuf {
    let mut name = OsString::from(input.file_stem().unwrap_or_default());
    name.push(OUTPUT_MARKER);
    if let Some(ext) = input.extension() {
        name.push(".");
        name.push(ext);
    }
    input.with_file_name(name)
}

/// Companion mapping file, `<input>.json`.
pub fn mapping_path(input: &Path) -> PathBuf {
    let mut path = input.as_os_str().to_owned();
    path.push(".json");
    PathBuf::from(path)
}
