//! Per-file orchestration.
//!
//! Files run one at a time in discovery order and the first error ends the
//! whole run; nothing is retried or skipped.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::bootstrap::{BootstrapReport, IdentifierCollector};
use crate::codec;
use crate::config::Config;
use crate::discover;
use crate::error::Result;
use crate::mapping;
use crate::output;
use crate::substitute::CertificateRewriter;

#[derive(Debug)]
pub struct FileReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub replacements: usize,
}

#[derive(Debug)]
pub struct RunSummary {
    pub files: Vec<FileReport>,
    pub elapsed: Duration,
}

/// Progress events handed to the caller while a run is underway.
#[derive(Debug)]
pub enum Progress<'a> {
    Started(&'a Path),
    Rewritten(&'a FileReport),
    Bootstrapped(&'a BootstrapReport),
}

/// Loads `<input>.json`, rewrites `input` and saves `<stem>_new<.ext>`.
///
/// Nothing is written unless every mapping entry applies.
pub fn process_file(input: &Path, rewriter: &CertificateRewriter) -> Result<FileReport> {
    let mapping = mapping::load_mapping(&discover::mapping_path(input))?;
    let text = codec::read_document(input)?;

    let (fragments, replacements) = rewriter.rewrite(&text, &mapping)?;
    let output = output::write_fragments(input, &fragments)?;

    Ok(FileReport {
        input: input.to_path_buf(),
        output,
        replacements,
    })
}

pub fn run<F>(config: &Config, mut progress: F) -> Result<RunSummary>
where
    F: FnMut(Progress<'_>),
{
    let start = Instant::now();
    log::info!("=== Rewriting certificate codes in {} ===", config.dir.display());

    let rewriter = CertificateRewriter::new(config.header_len)?;
    let mut files = Vec::new();
    for input in discover::discover_inputs(&config.dir)? {
        progress(Progress::Started(&input));
        let report = process_file(&input, &rewriter)?;
        progress(Progress::Rewritten(&report));
        files.push(report);
    }

    Ok(RunSummary {
        files,
        elapsed: start.elapsed(),
    })
}

/// Writes a mapping skeleton next to every discovered report.
pub fn run_bootstrap<F>(config: &Config, mut progress: F) -> Result<Vec<BootstrapReport>>
where
    F: FnMut(Progress<'_>),
{
    log::info!("=== Collecting identifiers in {} ===", config.dir.display());

    let collector = IdentifierCollector::new(config.lookback)?;
    let mut reports = Vec::new();
    for input in discover::discover_inputs(&config.dir)? {
        progress(Progress::Started(&input));
        let report = collector.bootstrap_file(&input, config.force)?;
        progress(Progress::Bootstrapped(&report));
        reports.push(report);
    }
    Ok(reports)
}
