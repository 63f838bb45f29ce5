//! CLI tool that finds the pair of Mian-Chowla terms realizing each difference.
//!
//! Usage:
//!   differences [--max-terms 1000] [--max-failures 1000] [--start 1] [--limit N] [--json]
//!
//! Tries `d = start, start + 1, ...` in turn and prints `d = t - (t - d)` for
//! every difference realized within the first `max-terms` terms. Stops after
//! `max-failures` consecutive misses.

mod report;

use std::io::{self, BufWriter, Write};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use mianchowla::MianChowla;
use report::{Outcome, Report};

#[derive(Parser, Debug)]
#[command(
    name = "differences",
    about = "Find the Mian-Chowla terms generating each difference",
    version
)]
struct Args {
    /// Number of terms to consider per lookup (0 = unbounded)
    #[arg(short = 'm', long, env = "MIANCHOWLA_MAX_TERMS", default_value_t = 1000)]
    max_terms: usize,

    /// Stop after this many consecutive differences are not found
    #[arg(short = 'f', long, env = "MIANCHOWLA_MAX_FAILURES", default_value_t = 1000)]
    max_failures: u32,

    /// First difference to look up
    #[arg(short = 's', long, default_value_t = 1)]
    start: u64,

    /// Last difference to look up
    #[arg(short = 'l', long)]
    limit: Option<u64>,

    /// Emit one JSON object per line
    #[arg(long, default_value = "false")]
    json: bool,

    /// Default log level when RUST_LOG is unset
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Logs go to stderr so stdout stays the report stream
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&args.log_level))
        .context("Invalid log level")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    if args.start == 0 {
        anyhow::bail!("Differences start at 1");
    }
    if args.max_failures == 0 {
        anyhow::bail!("--max-failures must be at least 1");
    }

    let bound = (args.max_terms > 0).then_some(args.max_terms);
    info!(max_terms = ?bound, max_failures = args.max_failures, "searching differences");

    let mut mc = MianChowla::new();
    let mut report = Report::new(args.max_failures);
    let mut out = BufWriter::new(io::stdout().lock());

    for d in args.start.. {
        if args.limit.is_some_and(|limit| d > limit) {
            break;
        }

        let outcome = match mc
            .find_witness(d, bound)
            .with_context(|| format!("Failed to look up difference {}", d))?
        {
            Some(witness) => Outcome::Found { witness },
            None => Outcome::Missing {
                difference: d,
                last_term: mc.last_term().context("No terms were generated")?,
            },
        };

        let line = if args.json {
            outcome.to_json().context("Failed to serialize outcome")?
        } else {
            outcome.to_text()
        };
        writeln!(out, "{}", line).context("Failed to write output")?;

        if report.record(&outcome) {
            debug!(d, failures = report.failures(), "too many consecutive misses");
            break;
        }
    }
    out.flush().context("Failed to flush output")?;

    info!(
        found = report.found(),
        missing = report.missing(),
        terms = mc.len(),
        "done"
    );

    Ok(())
}
