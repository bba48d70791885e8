//! extract transcription-factor binding-site sequences from ChIP-seq peaks
//!
//! Command-line arguments of the `tfbs-extract` binary.

use crate::consts::{DEFAULT_LOG_DIR, DEFAULT_OUTDIR};

use clap::{ArgAction, Parser};
use log::Level;

use std::{fmt, num::NonZeroUsize, path::PathBuf};

#[derive(Parser, Debug, Clone)]
#[command(
    author = env!("CARGO_PKG_AUTHORS"),
    version = env!("CARGO_PKG_VERSION"),
    about = env!("CARGO_PKG_DESCRIPTION"),
    long_about = None
)]
pub struct Args {
    /// Path to the genome FASTA file (.fa or .fa.gz, single sequence)
    #[arg(short = 'g', long)]
    pub genome: PathBuf,

    /// Path to the peaks table (TSV with TF_name, Peak_start, Peak_end columns)
    #[arg(short = 'p', long)]
    pub peaks: PathBuf,

    /// Output directory for the per-TF FASTA files
    #[arg(short = 'o', long, default_value = DEFAULT_OUTDIR)]
    pub outdir: PathBuf,

    /// Directory for the timestamped log file
    #[arg(long = "logs", default_value = DEFAULT_LOG_DIR)]
    pub logs: PathBuf,

    /// Log to the console only
    #[arg(long = "no-log-file", default_value = "false", action = ArgAction::SetTrue)]
    pub no_log_file: bool,

    /// Logging verbosity level
    #[arg(short = 'L', long, default_value = "info")]
    pub level: Level,

    /// Shortcut for --level debug
    #[arg(short = 'v', long, default_value = "false", action = ArgAction::SetTrue)]
    pub verbose: bool,

    /// Maximum number of bases per FASTA body line
    #[arg(short = 'l', long = "line-length", visible_alias = "line_length", default_value = "80")]
    pub line_length: NonZeroUsize,

    /// Gzip-compress output files
    #[arg(short = 'Z', long, default_value = "false", action = ArgAction::SetTrue)]
    pub compress: bool,
}

impl Args {
    /// Level actually used for logging: `--verbose` wins over `--level`.
    pub fn effective_level(&self) -> Level {
        if self.verbose {
            Level::Debug
        } else {
            self.level
        }
    }

    /// Log directory, unless file logging is disabled.
    pub fn log_dir(&self) -> Option<&std::path::Path> {
        (!self.no_log_file).then_some(self.logs.as_path())
    }
}

/// Formats the Args struct as a comma-separated string of key=value pairs.
impl fmt::Display for Args {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "genome={}, peaks={}, outdir={}, logs={}, no_log_file={}, level={}, verbose={}, line_length={}, compress={}",
            self.genome.display(),
            self.peaks.display(),
            self.outdir.display(),
            self.logs.display(),
            self.no_log_file,
            self.level,
            self.verbose,
            self.line_length,
            self.compress,
        )
    }
}
