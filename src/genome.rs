//! Loading a single-sequence FASTA genome.

use crate::{
    consts::HEADER_MARKER,
    error::{ExtractError, Result},
    input::{next_line, open_input},
    sink::Sink,
    types::Genome,
};

use std::path::Path;

const WHAT: &str = "genome file";

/// Loads the genome at `path` as one uppercase sequence.
///
/// The first line must be a FASTA header. Every following line that does not
/// start with `>` is trimmed, upper-cased and appended; additional `>` lines
/// are skipped, so a multi-record file collapses into one sequence.
///
/// # Errors
///
/// - [`ExtractError::NotFound`] if `path` is not a regular file
/// - [`ExtractError::Format`] if the header is missing, the sequence is empty
///   or contains non-ASCII characters, the text is not UTF-8 (or not gzip for
///   a `.gz` path), or read access is denied
///
/// # Example
///
/// ```rust,ignore
/// use tfbs_extract::{load_genome, LogSink};
///
/// let genome = load_genome("genome.fa", &LogSink::default())?;
/// println!("{} bp", genome.len());
/// ```
pub fn load_genome<P: AsRef<Path>>(path: P, sink: &dyn Sink) -> Result<Genome> {
    let path = path.as_ref();
    sink.info(format_args!("Reading genome from file {}", path.display()));

    let mut reader = open_input(path, WHAT).inspect_err(|e| sink.error(format_args!("{}", e)))?;
    let mut line = String::new();

    let has_header = next_line(reader.as_mut(), &mut line, path, WHAT)
        .inspect_err(|e| sink.error(format_args!("{}", e)))?
        && line.trim().starts_with(HEADER_MARKER);

    if !has_header {
        let err = ExtractError::format(path, "invalid FASTA: missing '>' header line");
        sink.error(format_args!("{}", err));
        return Err(err);
    }

    let mut seq = String::new();
    let mut extra_headers = 0usize;

    while next_line(reader.as_mut(), &mut line, path, WHAT)
        .inspect_err(|e| sink.error(format_args!("{}", e)))?
    {
        if line.starts_with(HEADER_MARKER) {
            extra_headers += 1;
            continue;
        }

        let bases = line.trim();
        if !bases.is_ascii() {
            let err = ExtractError::format(path, "non-ASCII character in sequence");
            sink.error(format_args!("{}", err));
            return Err(err);
        }

        seq.reserve(bases.len());
        seq.extend(bases.chars().map(|c| c.to_ascii_uppercase()));
    }

    if extra_headers > 0 {
        sink.warn(format_args!(
            "{} additional header line(s) in {} skipped; records were concatenated into one sequence",
            extra_headers,
            path.display()
        ));
    }

    if seq.is_empty() {
        let err = ExtractError::format(path, "empty FASTA: no sequence after header");
        sink.error(format_args!("{}", err));
        return Err(err);
    }

    sink.info(format_args!("Genome loaded; length: {} bp", seq.len()));

    Ok(Genome::new(seq))
}
