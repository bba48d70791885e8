//! extract transcription-factor binding-site sequences from ChIP-seq peaks
//!
//! Fixed names and defaults shared across the pipeline.

/// Required columns of the peaks table, in the order missing ones are reported.
pub const REQUIRED_COLUMNS: [&str; 3] = [TF_NAME_COLUMN, PEAK_START_COLUMN, PEAK_END_COLUMN];

pub const TF_NAME_COLUMN: &str = "TF_name";
pub const PEAK_START_COLUMN: &str = "Peak_start";
pub const PEAK_END_COLUMN: &str = "Peak_end";

/// Field delimiter of the peaks table.
pub const DELIMITER: char = '\t';

/// FASTA header marker.
pub const HEADER_MARKER: char = '>';

/// Separates the TF name from the 1-based peak index in output headers.
pub const PEAK_TAG: &str = "_pico_";

pub const DEFAULT_LINE_WIDTH: usize = 80;

pub const FASTA_EXTENSION: &str = "fa";
pub const GZIP_EXTENSION: &str = "gz";

pub const DEFAULT_OUTDIR: &str = "tf_peaks_fasta";
pub const DEFAULT_LOG_DIR: &str = "logs";

/// strftime pattern of log file names (`log_20250529_142501.log`).
pub const LOG_FILE_TIMESTAMP: &str = "%Y%m%d_%H%M%S";
