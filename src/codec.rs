//! Code page 866 document I/O.
//!
//! Reports are single-byte IBM866. Every byte maps to exactly one character,
//! so decoding never fails and decode-then-encode reproduces the input bytes.

use std::fs;
use std::path::Path;

use encoding_rs::IBM866;

use crate::error::{Result, RewriteError};

pub fn decode(bytes: &[u8]) -> String {
    let (text, _) = IBM866.decode_without_bom_handling(bytes);
    text.into_owned()
}

/// Encodes `text` as cp866, or `None` if any character has no cp866 byte.
pub fn encode(text: &str) -> Option<Vec<u8>> {
    let (bytes, _, unmappable) = IBM866.encode(text);
    if unmappable {
        None
    } else {
        Some(bytes.into_owned())
    }
}

pub fn read_document(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|e| RewriteError::io(path, e))?;
    log::debug!("Read {} bytes from {}", bytes.len(), path.display());
    Ok(decode(&bytes))
}
