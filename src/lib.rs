//! Rewrites certificate codes in cp866 report files.
//!
//! Each report `<name>.<ddd>` is paired with a hand-curated `<name>.<ddd>.json`
//! mapping identifiers to new certificate values. The code that follows each
//! identifier is replaced and the result saved as `<name>_new.<ddd>`.

pub mod bootstrap;
pub mod codec;
pub mod config;
pub mod discover;
pub mod error;
pub mod mapping;
pub mod output;
pub mod patterns;
pub mod pipeline;
pub mod substitute;

pub use bootstrap::{BootstrapReport, IdentifierCollector};
pub use config::Config;
pub use error::{Result, RewriteError};
pub use mapping::Mapping;
pub use pipeline::{FileReport, Progress, RunSummary};
pub use substitute::{CertificateRewriter, Fragments};
