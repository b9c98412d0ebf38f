use std::path::PathBuf;

use clap::Parser;

use esd_outliers::{DEFAULT_ALPHA, EsdTest};

#[derive(Parser, Debug)]
#[command(name = "esd-outliers")]
#[command(about = "Generalized ESD outlier test (Rosner, 1983)")]
#[command(version)]
pub struct Cli {
    /// Sample files, one sample per file ("-" reads stdin)
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Upper bound on the number of outliers to test for
    #[arg(short = 'k', long, env = "ESD_MAX_OUTLIERS", default_value = "10")]
    pub max_outliers: usize,

    /// Significance level of the test
    #[arg(short, long, env = "ESD_ALPHA", default_value_t = DEFAULT_ALPHA)]
    pub alpha: f64,

    /// Output format
    #[arg(long, value_enum, env = "ESD_FORMAT", default_value = "text")]
    pub format: OutputFormat,

    /// Lower the bound to n - 2 for samples too small for it
    #[arg(long)]
    pub clamp: bool,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Per-rank table (default)
    #[default]
    Text,
    /// Pretty-printed JSON report
    Json,
}

impl Cli {
    /// Build the test configuration for a sample of `sample_size` values
    pub fn to_esd_test(&self, sample_size: usize) -> EsdTest {
        let max_outliers = if self.clamp {
            let clamped = self.max_outliers.min(sample_size.saturating_sub(2));
            if clamped < self.max_outliers {
                tracing::info!(
                    "Clamping max outliers from {} to {} for {} values",
                    self.max_outliers,
                    clamped,
                    sample_size
                );
            }
            clamped
        } else {
            self.max_outliers
        };

        EsdTest::new(max_outliers).with_alpha(self.alpha)
    }

    /// Whether a path argument means standard input
    pub fn is_stdin(path: &std::path::Path) -> bool {
        path.as_os_str() == "-"
    }
}
