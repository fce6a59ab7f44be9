use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::error::{Result, RewriteError};

/// Identifier key (`ddd-ddd-ddd dd`, no prefix) to replacement value.
///
/// Iteration order is the order keys appear in the JSON file and decides the
/// order substitutions run in.
pub type Mapping = IndexMap<String, String>;

pub fn load_mapping(path: &Path) -> Result<Mapping> {
    let content = fs::read_to_string(path).map_err(|e| RewriteError::io(path, e))?;
    let mapping: Mapping =
        serde_json::from_str(&content).map_err(|source| RewriteError::MappingParse {
            path: path.to_path_buf(),
            source,
        })?;
    log::info!("Loaded {} mapping entries from {}", mapping.len(), path.display());
    Ok(mapping)
}

/// Writes `mapping` as a 4-space indented UTF-8 JSON object.
pub fn write_mapping(mapping: &Mapping, path: &Path) -> Result<()> {
    let file = File::create(path).map_err(|e| RewriteError::io(path, e))?;
    let mut writer = BufWriter::new(file);

    let mut serializer =
        serde_json::Serializer::with_formatter(&mut writer, PrettyFormatter::with_indent(b"    "));
    mapping
        .serialize(&mut serializer)
        .map_err(|source| RewriteError::MappingSerialize {
            path: path.to_path_buf(),
            source,
        })?;

    writer.flush().map_err(|e| RewriteError::io(path, e))?;
    log::info!("Saved {} mapping entries to {}", mapping.len(), path.display());
    Ok(())
}
