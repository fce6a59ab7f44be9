use std::path::PathBuf;

use crate::bootstrap::DEFAULT_LOOKBACK;
use crate::substitute::DEFAULT_HEADER_LEN;

/// Folder scanned when no directory is given.
pub const DEFAULT_DIR: &str = "response";

/// Settings for one invocation.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the reports and their `.json` mappings.
    pub dir: PathBuf,
    /// Header characters stripped from every mapping value.
    pub header_len: usize,
    /// Bootstrap lookback window in characters.
    pub lookback: usize,
    /// Let bootstrap replace existing mapping files.
    pub force: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_DIR),
            header_len: DEFAULT_HEADER_LEN,
            lookback: DEFAULT_LOOKBACK,
            force: false,
        }
    }
}
