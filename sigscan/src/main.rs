use std::io::{self, Read};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use sigscan::verifier::sample::sample_records;
use sigscan::verifier::{BatchSummary, RecordReport, SignatureRecord, Verifier, VerifierConfig};

#[derive(Parser, Debug)]
#[command(name = "sigscan")]
#[command(about = "Check secp256k1 ECDSA signatures for validity and low-S form")]
struct Args {
    /// Check the built-in sample batch instead of reading stdin
    #[arg(long)]
    sample: bool,

    /// Treat signatures with s > n/2 as invalid
    #[arg(long)]
    require_low_s: bool,

    /// Print reports as a JSON array
    #[arg(long)]
    json: bool,
}

fn read_records() -> anyhow::Result<Vec<SignatureRecord>> {
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("failed to read records from stdin")?;
    serde_json::from_str(&input).context("stdin is not a JSON array of signature records")
}

/// Exit status for a finished batch: 0, or 2 when any record hit an internal
/// error. Input errors surface through `main`'s `Err` and exit 1.
fn exit_status(summary: &BatchSummary) -> u8 {
    if summary.internal_errors > 0 {
        2
    } else {
        0
    }
}

fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();

    let records = if args.sample {
        sample_records()
    } else {
        read_records()?
    };

    let config = if args.require_low_s {
        VerifierConfig::strict()
    } else {
        VerifierConfig::standard()
    };
    let verifier = Verifier::new(config);

    let reports: Vec<RecordReport> = verifier.verify_batch(&records).collect();
    let summary: BatchSummary = reports.iter().collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        for report in &reports {
            println!("{}", report);
            println!("------------------------------------------------");
        }
        println!("{}", summary);
    }

    for report in reports.iter().filter(|r| r.is_internal_error()) {
        eprintln!("internal error while checking {}", report.identifier);
    }
    Ok(ExitCode::from(exit_status(&summary)))
}
