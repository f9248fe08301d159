//! Offset prefetcher trace simulator CLI.
//!
//! This binary provides two entry points:
//! 1. **Run:** Replay a memory access trace through the cache and the offset prefetcher.
//! 2. **Synth:** Write a synthetic constant-stride trace for experiments.

use clap::builder::PossibleValuesParser;
use clap::{Parser, Subcommand};
use std::fs::{self, File};
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

use offsetpf_core::common::{DEFAULT_BLOCK_SIZE, SimError};
use offsetpf_core::config::Config;
use offsetpf_core::sim::{self, Simulator};
use offsetpf_core::stats::STATS_SECTIONS;

#[derive(Parser, Debug)]
#[command(
    name = "offsetpf",
    author,
    version,
    about = "Adaptive offset prefetcher trace simulator",
    long_about = "Replay a memory access trace through a set-associative cache driven by an adaptive offset prefetcher.\n\nExamples:\n  offsetpf synth --stride 4 --count 10000 -o stride4.trace\n  offsetpf run --trace stride4.trace\n  offsetpf run --trace app.trace --config l1.json --stats prefetch training"
)]
struct Cli {
    /// Log prefetcher decisions (equivalent to RUST_LOG=debug).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Replay a trace and print statistics.
    Run {
        /// Trace file to replay.
        #[arg(short, long)]
        trace: PathBuf,

        /// JSON configuration file (defaults are used when omitted).
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Statistics sections to print; all when omitted.
        #[arg(long, num_args = 1.., value_parser = PossibleValuesParser::new(STATS_SECTIONS.iter().copied()))]
        stats: Vec<String>,
    },

    /// Write a constant-stride trace.
    Synth {
        /// Stride between accesses, in blocks.
        #[arg(long)]
        stride: u64,

        /// Number of accesses.
        #[arg(long)]
        count: usize,

        /// Address of the first access.
        #[arg(long, default_value_t = 0x8000_0000, value_parser = parse_u64)]
        base: u64,

        /// Block size in bytes.
        #[arg(long, default_value_t = DEFAULT_BLOCK_SIZE)]
        block_size: u64,

        /// Output file (stdout when omitted).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn parse_u64(s: &str) -> Result<u64, String> {
    let parsed = s.strip_prefix("0x").map_or_else(
        || s.parse::<u64>(),
        |hex| u64::from_str_radix(hex, 16),
    );
    parsed.map_err(|e| format!("invalid address {s:?}: {e}"))
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Run {
            trace,
            config,
            stats,
        } => cmd_run(&trace, config.as_deref(), &stats),
        Commands::Synth {
            stride,
            count,
            base,
            block_size,
            output,
        } => cmd_synth(stride, count, base, block_size, output),
    };

    if let Err(e) = result {
        eprintln!("[!] {e}");
        process::exit(1);
    }
}

/// Loads the configuration and trace, replays it, and prints statistics.
fn cmd_run(
    trace: &std::path::Path,
    config: Option<&std::path::Path>,
    sections: &[String],
) -> Result<(), SimError> {
    let config = match config {
        Some(path) => Config::from_json(&fs::read_to_string(path)?)?,
        None => Config::default(),
    };
    tracing::debug!(?config, "configuration loaded");

    let records = sim::load_trace(trace)?;
    println!("[*] Trace: {} ({} accesses)", trace.display(), records.len());
    println!(
        "    cache: {} B, {}-way, {} B lines, prefetch latency {}",
        config.cache.size_bytes,
        config.cache.ways,
        config.cache.line_bytes,
        config.cache.prefetch_latency
    );
    println!(
        "    prefetcher: {} (initial offset {})",
        if config.prefetcher.enabled { "on" } else { "off" },
        config.prefetcher.initial_offset
    );

    let mut simulator = Simulator::new(&config);
    simulator.run(&records);
    simulator.stats().print_sections(sections);
    Ok(())
}

/// Writes a synthetic stride trace to `output` or stdout.
fn cmd_synth(
    stride: u64,
    count: usize,
    base: u64,
    block_size: u64,
    output: Option<PathBuf>,
) -> Result<(), SimError> {
    let records = sim::stride_trace(base, stride, count, block_size);
    match output {
        Some(path) => sim::write_trace(BufWriter::new(File::create(path)?), &records)?,
        None => sim::write_trace(io::stdout().lock(), &records)?,
    }
    Ok(())
}
