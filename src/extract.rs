//! Slicing peak sequences out of the genome.

use crate::{
    sink::Sink,
    types::{Genome, TfCoordinates, TfSequences},
};

use std::fmt;

/// Counters for one extraction run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractStats {
    pub total: usize,
    pub valid: usize,
    pub invalid: usize,
}

impl fmt::Display for ExtractStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "total={}, valid={}, invalid={}",
            self.total, self.valid, self.invalid
        )
    }
}

/// Extracts `genome[start..end]` for every interval of every TF.
///
/// Intervals must satisfy `start < end <= genome.len()`; any other interval
/// is dropped with a warning. Every input TF is present in the output, even
/// when none of its intervals survive.
pub fn extract(coords: &TfCoordinates, genome: &Genome, sink: &dyn Sink) -> TfSequences {
    extract_with_stats(coords, genome, sink).0
}

/// Same as [`extract`], also returning the counters.
pub fn extract_with_stats(
    coords: &TfCoordinates,
    genome: &Genome,
    sink: &dyn Sink,
) -> (TfSequences, ExtractStats) {
    let mut sequences = TfSequences::new();
    let mut stats = ExtractStats::default();

    for (tf, intervals) in coords.iter() {
        let target = sequences.entry(tf);

        for interval in intervals {
            stats.total += 1;

            match genome.slice(interval.start, interval.end) {
                Some(seq) => {
                    target.push(seq.to_vec());
                    stats.valid += 1;
                }
                None => {
                    stats.invalid += 1;
                    sink.warn(format_args!(
                        "{}: invalid coordinates {} for genome of length {}, skipping",
                        tf,
                        interval,
                        genome.len()
                    ));
                }
            }
        }
    }

    sink.info(format_args!("Extraction completed: {}", stats));

    (sequences, stats)
}
