use crate::{
    cli::Args,
    error::Result,
    extract::extract,
    fasta::FastaWriter,
    genome::load_genome,
    peaks::parse_peaks,
    sink::Sink,
};

use std::path::PathBuf;

/// Runs the whole pipeline: genome -> peaks -> sequences -> FASTA files.
///
/// The genome is loaded first, so a missing or malformed genome fails the
/// run before the peaks table is touched. Returns the files written.
pub fn tfbs_extract(args: &Args, sink: &dyn Sink) -> Result<Vec<PathBuf>> {
    sink.info(format_args!("Starting tfbs-extract with args: {}", args));

    let genome = load_genome(&args.genome, sink)?;
    let coords = parse_peaks(&args.peaks, sink)?;
    let sequences = extract(&coords, &genome, sink);

    let written = FastaWriter::new(&args.outdir)
        .line_width(args.line_length)
        .compress(args.compress)
        .write(&sequences, sink)?;

    sink.info(format_args!(
        "Process completed. Files written: {}",
        written.len()
    ));

    Ok(written)
}
