//! Seeds a mapping file from a report.
//!
//! Each loose `СОИ-ddd` anchor is tied to the last identifier found in a
//! bounded window of text before it. The resulting keys get empty values and
//! are meant to be filled in by hand before a rewrite.

use std::path::{Path, PathBuf};

use onig::Regex;

use crate::codec;
use crate::discover;
use crate::error::{Result, RewriteError};
use crate::mapping::{self, Mapping};
use crate::patterns;

/// Characters searched before an anchor for its identifier.
pub const DEFAULT_LOOKBACK: usize = 2595;

#[derive(Debug)]
pub struct IdentifierCollector {
    anchor: Regex,
    identifier: Regex,
    lookback: usize,
}

#[derive(Debug)]
pub struct BootstrapReport {
    pub input: PathBuf,
    pub mapping_path: PathBuf,
    pub identifiers: usize,
}

impl IdentifierCollector {
    pub fn new(lookback: usize) -> Result<Self> {
        Ok(Self {
            anchor: patterns::anchor()?,
            identifier: patterns::identifier()?,
            lookback,
        })
    }

    /// Collects one key per distinct identifier, in order of first sighting.
    pub fn collect(&self, text: &str) -> Result<Mapping> {
        let mut collected = Mapping::new();

        for (start, end) in self.anchor.find_iter(text) {
            let window = &text[self.window_start(text, start)..end];
            match self.identifier.find_iter(window).last() {
                Some((id_start, id_end)) => {
                    let key = patterns::unprefixed(&window[id_start..id_end]);
                    collected.entry(key.to_string()).or_default();
                }
                None => {
                    log::error!("No identifier in window:\n{}", window);
                    return Err(RewriteError::IdentifierNotInWindow {
                        anchor: text[start..end].to_string(),
                        offset: text[..start].chars().count(),
                    });
                }
            }
        }

        log::info!("Collected {} identifiers", collected.len());
        Ok(collected)
    }

    /// Byte offset `lookback` characters before `anchor_start`, clamped to 0.
    fn window_start(&self, text: &str, anchor_start: usize) -> usize {
        if self.lookback == 0 {
            return anchor_start;
        }
        text[..anchor_start]
            .char_indices()
            .rev()
            .nth(self.lookback - 1)
            .map_or(0, |(i, _)| i)
    }

    /// Writes `<input>.json` with an empty value per identifier found.
    ///
    /// An existing mapping file is left alone unless `force` is set.
    pub fn bootstrap_file(&self, input: &Path, force: bool) -> Result<BootstrapReport> {
        let mapping_path = discover::mapping_path(input);
        if !force && mapping_path.exists() {
            return Err(RewriteError::MappingExists { path: mapping_path });
        }

        let text = codec::read_document(input)?;
        let collected = self.collect(&text)?;
        mapping::write_mapping(&collected, &mapping_path)?;

        Ok(BootstrapReport {
            input: input.to_path_buf(),
            mapping_path,
            identifiers: collected.len(),
        })
    }
}
