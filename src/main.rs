//! # chatpulse CLI
//!
//! Command-line interface for the chatpulse library.

use std::io::{self, Read};
use std::path::Path;
use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;

use chatpulse::ChatpulseError;
use chatpulse::cli::Args;
use chatpulse::format::{OutputFormat, to_format_string, write_to_format};
use chatpulse::logging;
use chatpulse::pipeline::{Analysis, Analyzer};

fn main() {
    if let Err(e) = run() {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<(), ChatpulseError> {
    let start = Instant::now();
    let args = <Args as ClapParser>::parse();
    logging::init(args.verbose);

    let analyzer = Analyzer::new(args.analysis_config()?)?.with_classifier(args.roster());

    let analysis = if args.reads_stdin() {
        let mut bytes = Vec::new();
        io::stdin().read_to_end(&mut bytes)?;
        analyzer.analyze_bytes(bytes)?
    } else {
        analyzer.analyze_file(Path::new(&args.input))?
    };

    if args.anomalies {
        report_anomalies(&analysis);
    }

    let format: OutputFormat = args.format.into();
    let output_config = args.output_config();

    match args.output {
        None => {
            print!("{}", to_format_string(&analysis, format, &output_config)?);
        }
        Some(ref path) => {
            write_to_format(&analysis, path, format, &output_config)?;

            println!("📊 chatpulse v{}", env!("CARGO_PKG_VERSION"));
            println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
            println!("📂 Input:     {}", args.input);
            println!("💾 Output:    {}", path);
            println!("📄 Format:    {}", format);
            println!("💬 Messages:  {}", analysis.records.len());
            if let Some(ref series) = analysis.series {
                println!("📅 Days:      {} ({})", series.len(), series.range());
            } else {
                println!("📅 Days:      no data");
            }
            println!("⚠️  Anomalies: {}", analysis.anomalies.len());
            println!("⚡ Done in {:.2}s", start.elapsed().as_secs_f64());
        }
    }

    Ok(())
}

/// Prints parse anomalies to stderr, one per line.
fn report_anomalies(analysis: &Analysis) {
    if analysis.anomalies.is_empty() {
        return;
    }
    eprintln!("⚠️  {} anomalies:", analysis.anomalies.len());
    for anomaly in &analysis.anomalies {
        eprintln!("   {}", anomaly);
    }
}
