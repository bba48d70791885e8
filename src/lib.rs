//! extract transcription-factor binding-site sequences from ChIP-seq peaks
//! Ashley Yael Montiel Vargas, 2025
//!
//! Given a single-sequence genome FASTA and a tab-separated peaks table with
//! `TF_name`, `Peak_start` and `Peak_end` columns, this tool slices every
//! peak (0-based, half-open) out of the genome and writes one FASTA file per
//! transcription factor. Bad rows and out-of-range peaks are counted, logged
//! and dropped; only file-level problems abort the run.
//!
//! # Usage
//!
//! ```bash
//! Usage: tfbs-extract [OPTIONS] --genome <GENOME> --peaks <PEAKS>
//!
//! Options:
//!   -g, --genome <GENOME>            Path to the genome FASTA file (.fa or .fa.gz, single sequence)
//!   -p, --peaks <PEAKS>              Path to the peaks table (TSV with TF_name, Peak_start, Peak_end columns)
//!   -o, --outdir <OUTDIR>            Output directory for the per-TF FASTA files [default: tf_peaks_fasta]
//!       --logs <LOGS>                Directory for the timestamped log file [default: logs]
//!       --no-log-file                Log to the console only
//!   -L, --level <LEVEL>              Logging verbosity level [default: info]
//!   -v, --verbose                    Shortcut for --level debug
//!   -l, --line-length <LINE_LENGTH>  Maximum number of bases per FASTA body line [default: 80] [aliases: --line_length]
//!   -Z, --compress                   Gzip-compress output files
//!   -h, --help                       Print help
//!   -V, --version                    Print version
//! ```

pub mod cli;
pub mod consts;
pub mod core;
pub mod error;
pub mod extract;
pub mod fasta;
pub mod genome;
pub mod input;
pub mod logging;
pub mod peaks;
pub mod sink;
pub mod types;

pub use cli::Args;
pub use crate::core::tfbs_extract;
pub use error::{ExtractError, Result};
pub use extract::{ExtractStats, extract, extract_with_stats};
pub use fasta::{FastaWriter, write_fasta};
pub use genome::load_genome;
pub use logging::init_logging;
pub use peaks::{PeakStats, parse_peaks, parse_peaks_with_stats};
pub use sink::{LogSink, MemorySink, Sink};
pub use types::{Genome, PeakInterval, TfCoordinates, TfMap, TfSequences};
