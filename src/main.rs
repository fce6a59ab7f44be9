use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use soi_rewrite::bootstrap::DEFAULT_LOOKBACK;
use soi_rewrite::config::DEFAULT_DIR;
use soi_rewrite::pipeline;
use soi_rewrite::substitute::DEFAULT_HEADER_LEN;
use soi_rewrite::{Config, Progress};

#[derive(Parser)]
#[command(name = "soi_rewrite")]
#[command(version = "1.0")]
#[command(about = "Replace certificate codes in cp866 report files using per-file JSON mappings")]
struct Args {
    #[command(subcommand)]
    command: Option<Commands>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Rewrite every report using its `<report>.json` mapping (default)
    Replace {
        #[arg(short, long, default_value = DEFAULT_DIR, help = "Directory with report files")]
        dir: PathBuf,

        #[arg(long, default_value_t = DEFAULT_HEADER_LEN, help = "Header characters stripped from mapping values")]
        header_len: usize,
    },
    /// Write `<report>.json` skeletons with an empty value per identifier
    Bootstrap {
        #[arg(short, long, default_value = DEFAULT_DIR, help = "Directory with report files")]
        dir: PathBuf,

        #[arg(long, default_value_t = DEFAULT_LOOKBACK, help = "Characters searched before each anchor")]
        lookback: usize,

        #[arg(long, help = "Overwrite existing mapping files")]
        force: bool,
    },
}

fn main() {
    let args = Args::parse();

    // Initialize logging
    env_logger::Builder::from_default_env()
        .filter_level(if args.verbose { log::LevelFilter::Info } else { log::LevelFilter::Warn })
        .format_timestamp_secs()
        .init();

    let start = Instant::now();
    let outcome = match args.command {
        Some(Commands::Bootstrap { dir, lookback, force }) => bootstrap(Config {
            dir,
            lookback,
            force,
            ..Config::default()
        }),
        Some(Commands::Replace { dir, header_len }) => replace(Config {
            dir,
            header_len,
            ..Config::default()
        }),
        None => replace(Config::default()),
    };

    if let Err(e) = outcome {
        log::error!("Run failed: {:#}", e);
        eprintln!("❌ {:#}", e);
        std::process::exit(1);
    }
    println!("⏱️  Total time: {:.2} s", start.elapsed().as_secs_f64());
}

fn replace(config: Config) -> Result<()> {
    println!("🦀 Certificate code rewriter");
    println!("📂 Directory: {}", config.dir.display());

    let summary = pipeline::run(&config, report_progress)
        .with_context(|| format!("Rewriting reports in {}", config.dir.display()))?;

    let total: usize = summary.files.iter().map(|f| f.replacements).sum();
    println!(
        "✅ Rewrote {} files ({} replacements) in {:.2}s",
        summary.files.len(),
        total,
        summary.elapsed.as_secs_f64()
    );
    Ok(())
}

fn bootstrap(config: Config) -> Result<()> {
    println!("🦀 Mapping bootstrap");
    println!("📂 Directory: {}", config.dir.display());

    let reports = pipeline::run_bootstrap(&config, report_progress)
        .with_context(|| format!("Collecting identifiers in {}", config.dir.display()))?;

    println!("✅ Wrote {} mapping files, fill in the values before rewriting", reports.len());
    Ok(())
}

fn report_progress(event: Progress<'_>) {
    match event {
        Progress::Started(input) => println!("📁 Processing file: {}", input.display()),
        Progress::Rewritten(report) => println!(
            "💾 {} replacements saved to {}",
            report.replacements,
            report.output.display()
        ),
        Progress::Bootstrapped(report) => println!(
            "📚 {} identifiers saved to {}",
            report.identifiers,
            report.mapping_path.display()
        ),
    }
}
