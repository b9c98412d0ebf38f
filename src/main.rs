use std::io::Read;
use std::path::Path;

use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use esd_outliers::{CriticalValueCache, EsdError, EsdReport, Sample};

mod config;
mod output;

use config::{Cli, OutputFormat};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr so stdout stays clean for reports
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(true)
                .with_writer(std::io::stderr),
        )
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "esd_outliers=info".into()),
        )
        .init();

    let cli = Cli::parse();

    // Samples of equal size share critical values
    let mut cache = CriticalValueCache::new();
    let mut failures = 0;

    for path in &cli.files {
        let source = path.display().to_string();

        match run_file(&cli, path, &mut cache) {
            Ok(report) => {
                let rendered = match cli.format {
                    OutputFormat::Text => output::render_text(&source, &report),
                    OutputFormat::Json => output::render_json(&source, &report)?,
                };
                println!("{}", rendered);
            }
            Err(e) => {
                tracing::error!("{}: {}", source, e);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        tracing::error!("{} of {} samples failed", failures, cli.files.len());
        std::process::exit(1);
    }

    Ok(())
}

/// Load one sample and run the test on it
fn run_file(
    cli: &Cli,
    path: &Path,
    cache: &mut CriticalValueCache,
) -> Result<EsdReport, EsdError> {
    let sample = if Cli::is_stdin(path) {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        Sample::parse(&text)?
    } else {
        Sample::from_path(path)?
    };

    let test = cli.to_esd_test(sample.len());
    tracing::info!(
        "Testing {} values from {} for up to {} outliers at alpha={}",
        sample.len(),
        path.display(),
        test.max_outliers(),
        test.alpha()
    );

    test.run_cached(&sample, cache)
}
