use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Everything that can stop a rewrite or bootstrap run.
///
/// None of these are recoverable: the first one raised halts the current
/// file and, through the pipeline, every file after it.
#[derive(Debug, Error)]
pub enum RewriteError {
    /// Reading or writing a file or directory failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// Path being accessed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },

    /// The companion mapping file is missing keys/values of the right shape.
    #[error("invalid mapping file {}: {source}", path.display())]
    MappingParse {
        /// Mapping file path.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// Serializing a bootstrapped mapping failed.
    #[error("failed to write mapping file {}: {source}", path.display())]
    MappingSerialize {
        /// Mapping file path.
        path: PathBuf,
        /// Underlying serialization error.
        #[source]
        source: serde_json::Error,
    },

    /// A bootstrap would overwrite a (possibly hand-filled) mapping file.
    #[error("mapping file {} already exists, pass --force to overwrite", path.display())]
    MappingExists {
        /// Existing mapping file.
        path: PathBuf,
    },

    #[error("regex compilation failed: {0}")]
    Regex(#[from] onig::Error),

    /// No fragment equals the prefixed identifier for this key.
    #[error("identifier not found for key {key}")]
    IdentifierNotFound {
        /// Mapping key.
        key: String,
    },

    /// The fragment following the identifier carries no certificate code.
    #[error("certificate code not found after identifier for key {key}")]
    AnchorNotFound {
        /// Mapping key.
        key: String,
    },

    /// Mapping value too short to hold the fixed header.
    #[error("value {value:?} for key {key} is shorter than the {header_len}-character header")]
    MalformedValue {
        /// Mapping key.
        key: String,
        /// Offending value.
        value: String,
        /// Expected header length in characters.
        header_len: usize,
    },

    /// A bootstrap anchor has no identifier within its lookback window.
    #[error("no identifier found before anchor {anchor} at character {offset}")]
    IdentifierNotInWindow {
        /// Anchor text.
        anchor: String,
        /// Character offset of the anchor in the document.
        offset: usize,
    },

    /// Rewritten text holds characters code page 866 cannot represent.
    #[error("rewritten text for {} is not representable in cp866", path.display())]
    Unencodable {
        /// Output path that was not written.
        path: PathBuf,
    },
}

impl RewriteError {
    pub(crate) fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

pub type Result<T, E = RewriteError> = std::result::Result<T, E>;
