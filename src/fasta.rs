//! Writing per-TF FASTA files.

use crate::{
    consts::{DEFAULT_LINE_WIDTH, FASTA_EXTENSION, GZIP_EXTENSION, HEADER_MARKER, PEAK_TAG},
    error::{ExtractError, Result},
    sink::Sink,
    types::TfSequences,
};

use flate2::{Compression, write::GzEncoder};

use std::{
    collections::HashMap,
    fs::{File, create_dir_all},
    io::{self, BufWriter, Write},
    num::NonZeroUsize,
    path::{Path, PathBuf},
};

/// Default body line width.
pub const DEFAULT_WIDTH: NonZeroUsize = match NonZeroUsize::new(DEFAULT_LINE_WIDTH) {
    Some(width) => width,
    None => panic!("default line width must be non-zero"),
};

/// Writes one `<TF>.fa` per TF with at least one sequence.
///
/// Headers read `>{TF}_pico_{i}_len={len}` with `i` starting at 1; bodies
/// are wrapped at `line_width` characters.
///
/// # Errors
///
/// [`ExtractError::Io`] if `outdir` cannot be created, any file cannot be
/// written, or two TF names map to the same file name. The first failure
/// stops the run; files already written stay.
///
/// # Example
///
/// ```rust,ignore
/// use tfbs_extract::{write_fasta, LogSink};
///
/// let written = write_fasta(&seqs, "out", 60.try_into()?, &LogSink::default())?;
/// ```
pub fn write_fasta<P: AsRef<Path>>(
    sequences: &TfSequences,
    outdir: P,
    line_width: NonZeroUsize,
    sink: &dyn Sink,
) -> Result<Vec<PathBuf>> {
    FastaWriter::new(outdir.as_ref())
        .line_width(line_width)
        .write(sequences, sink)
}

/// Configurable writer behind [`write_fasta`].
#[derive(Debug, Clone)]
pub struct FastaWriter {
    outdir: PathBuf,
    line_width: NonZeroUsize,
    compress: bool,
}

impl FastaWriter {
    pub fn new<P: Into<PathBuf>>(outdir: P) -> Self {
        Self {
            outdir: outdir.into(),
            line_width: DEFAULT_WIDTH,
            compress: false,
        }
    }

    pub fn line_width(mut self, line_width: NonZeroUsize) -> Self {
        self.line_width = line_width;
        self
    }

    /// Gzip each file and name it `<TF>.fa.gz`.
    pub fn compress(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    /// Path the file for `tf` is written to.
    pub fn path_for(&self, tf: &str) -> PathBuf {
        let stem: String = tf
            .chars()
            .map(|c| if std::path::is_separator(c) { '_' } else { c })
            .collect();

        let path = self.outdir.join(format!("{}.{}", stem, FASTA_EXTENSION));
        with_gzip_extension(path, self.compress)
    }

    pub fn write(&self, sequences: &TfSequences, sink: &dyn Sink) -> Result<Vec<PathBuf>> {
        if sequences.is_empty() {
            sink.debug(format_args!("No sequences to write"));
            return Ok(Vec::new());
        }

        create_dir_all(&self.outdir)
            .map_err(|e| ExtractError::io("create directory", &self.outdir, e))
            .inspect_err(|e| sink.error(format_args!("{}", e)))?;

        let mut written = Vec::new();
        let mut owners: HashMap<PathBuf, &str> = HashMap::new();

        for (tf, seqs) in sequences.iter() {
            if seqs.is_empty() {
                sink.debug(format_args!("No sequences for {}; skipping", tf));
                continue;
            }

            let path = self.path_for(tf);
            if let Some(owner) = owners.insert(path.clone(), tf) {
                let clash = io::Error::new(
                    io::ErrorKind::AlreadyExists,
                    format!("TF names '{}' and '{}' map to the same file", owner, tf),
                );
                let err = ExtractError::io("write", &path, clash);
                sink.error(format_args!("{}", err));
                return Err(err);
            }

            self.write_file(&path, tf, seqs)
                .map_err(|e| ExtractError::io("write", &path, e))
                .inspect_err(|e| sink.error(format_args!("{}", e)))?;

            sink.info(format_args!(
                "File written: {} ({} sequences)",
                path.display(),
                seqs.len()
            ));
            written.push(path);
        }

        Ok(written)
    }

    fn write_file(&self, path: &Path, tf: &str, seqs: &[Vec<u8>]) -> io::Result<()> {
        let file = File::create(path)?;

        if self.compress {
            let mut writer = GzEncoder::new(BufWriter::new(file), Compression::default());
            write_records(&mut writer, tf, seqs, self.line_width)?;
            writer.finish()?.flush()
        } else {
            let mut writer = BufWriter::new(file);
            write_records(&mut writer, tf, seqs, self.line_width)?;
            writer.flush()
        }
    }
}

/// Writes all records of one TF.
fn write_records<W: Write>(
    writer: &mut W,
    tf: &str,
    seqs: &[Vec<u8>],
    line_width: NonZeroUsize,
) -> io::Result<()> {
    for (idx, seq) in seqs.iter().enumerate() {
        writeln!(
            writer,
            "{}{}{}{}_len={}",
            HEADER_MARKER,
            tf,
            PEAK_TAG,
            idx + 1,
            seq.len()
        )?;

        for line in seq.chunks(line_width.get()) {
            writer.write_all(line)?;
            writer.write_all(b"\n")?;
        }
    }

    Ok(())
}

fn with_gzip_extension(mut path: PathBuf, compress: bool) -> PathBuf {
    if compress && path.extension().and_then(|ext| ext.to_str()) != Some(GZIP_EXTENSION) {
        path.as_mut_os_string().push(".");
        path.as_mut_os_string().push(GZIP_EXTENSION);
    }

    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::MemorySink;
    use flate2::read::MultiGzDecoder;
    use log::Level;
    use std::io::Read;
    use tempfile::TempDir;

    fn width(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    fn seqs(entries: &[(&str, Vec<&str>)]) -> TfSequences {
        entries
            .iter()
            .map(|(tf, s)| {
                (
                    tf.to_string(),
                    s.iter().map(|x| x.as_bytes().to_vec()).collect(),
                )
            })
            .collect()
    }

    #[test]
    fn test_exact_layout() {
        let temp = TempDir::new().unwrap();
        let outdir = temp.path().join("out");
        let input = seqs(&[("TF1", vec!["ACGT", "TGCA"])]);

        let written = write_fasta(&input, &outdir, width(4), &MemorySink::new()).unwrap();

        assert_eq!(written, vec![outdir.join("TF1.fa")]);
        let text = std::fs::read_to_string(&written[0]).unwrap();
        assert_eq!(text, ">TF1_pico_1_len=4\nACGT\n>TF1_pico_2_len=4\nTGCA\n");
    }

    #[test]
    fn test_wrapping() {
        let temp = TempDir::new().unwrap();
        let seq = "ACGT".repeat(10);
        let input = seqs(&[("TFX", vec![seq.as_str()])]);

        let written = write_fasta(&input, temp.path(), width(15), &MemorySink::new()).unwrap();
        let text = std::fs::read_to_string(&written[0]).unwrap();
        let body: Vec<&str> = text.lines().filter(|l| !l.starts_with('>')).collect();

        assert_eq!(body.len(), 3);
        assert!(body.iter().all(|l| l.len() <= 15));
        assert_eq!(body[2].len(), 10);
        assert_eq!(body.concat(), seq);
    }

    #[test]
    fn test_empty_lists_are_skipped() {
        let temp = TempDir::new().unwrap();
        let input = seqs(&[
            ("TF1", vec!["ACGT".repeat(10).as_str(), "TGCA".repeat(5).as_str()]),
            ("TF2", vec!["ATCG".repeat(25).as_str()]),
            ("TF3", vec![]),
        ]);

        let sink = MemorySink::new();
        let written = write_fasta(&input, temp.path(), width(20), &sink).unwrap();

        assert_eq!(
            written,
            vec![temp.path().join("TF1.fa"), temp.path().join("TF2.fa")]
        );
        assert!(!temp.path().join("TF3.fa").exists());
        assert!(sink.contains("(2 sequences)"));

        let headers: Vec<String> = std::fs::read_to_string(&written[0])
            .unwrap()
            .lines()
            .filter(|l| l.starts_with('>'))
            .map(String::from)
            .collect();
        assert_eq!(headers, vec![">TF1_pico_1_len=40", ">TF1_pico_2_len=20"]);
    }

    #[test]
    fn test_nothing_to_write() {
        let temp = TempDir::new().unwrap();
        let outdir = temp.path().join("never");

        let sink = MemorySink::new();
        let written = write_fasta(&TfSequences::new(), &outdir, DEFAULT_WIDTH, &sink).unwrap();

        assert!(written.is_empty());
        assert!(!outdir.exists());
        assert_eq!(sink.messages(Level::Debug).len(), 1);
    }

    #[test]
    fn test_creates_nested_outdir_and_overwrites() {
        let temp = TempDir::new().unwrap();
        let outdir = temp.path().join("a").join("b");
        let input = seqs(&[("TF1", vec!["ACGTACGTAC"])]);

        let first = write_fasta(&input, &outdir, width(3), &MemorySink::new()).unwrap();
        let before = std::fs::read(&first[0]).unwrap();
        let second = write_fasta(&input, &outdir, width(3), &MemorySink::new()).unwrap();
        let after = std::fs::read(&second[0]).unwrap();

        assert_eq!(first, second);
        assert_eq!(before, after);
    }

    #[test]
    fn test_outdir_blocked_by_file() {
        let temp = TempDir::new().unwrap();
        let blocker = temp.path().join("blocker");
        std::fs::write(&blocker, "x").unwrap();

        let sink = MemorySink::new();
        let err = write_fasta(
            &seqs(&[("TF1", vec!["A"])]),
            blocker.join("out"),
            DEFAULT_WIDTH,
            &sink,
        )
        .unwrap_err();

        assert!(matches!(
            err,
            ExtractError::Io {
                action: "create directory",
                ..
            }
        ));
        assert_eq!(sink.messages(Level::Error).len(), 1);
    }

    #[test]
    fn test_write_failure_aborts() {
        let temp = TempDir::new().unwrap();
        // a directory squatting on TF1.fa makes File::create fail
        std::fs::create_dir(temp.path().join("TF1.fa")).unwrap();
        let input = seqs(&[("TF1", vec!["ACGT"]), ("TF2", vec!["ACGT"])]);

        let err = write_fasta(&input, temp.path(), DEFAULT_WIDTH, &MemorySink::new()).unwrap_err();

        assert!(matches!(err, ExtractError::Io { action: "write", .. }));
        assert!(!temp.path().join("TF2.fa").exists());
    }

    #[test]
    fn test_separator_in_tf_name_stays_inside_outdir() {
        let writer = FastaWriter::new("out");
        assert_eq!(writer.path_for("Fis/H-NS"), PathBuf::from("out/Fis_H-NS.fa"));
    }

    #[test]
    fn test_colliding_file_names_fail() {
        let temp = TempDir::new().unwrap();
        let input = seqs(&[("a/b", vec!["AAAA"]), ("a_b", vec!["CCCC"])]);

        let sink = MemorySink::new();
        let err = write_fasta(&input, temp.path(), DEFAULT_WIDTH, &sink).unwrap_err();

        assert!(matches!(err, ExtractError::Io { action: "write", .. }));
        assert!(err.to_string().contains("'a/b' and 'a_b'"));
        assert_eq!(sink.messages(Level::Error).len(), 1);

        let text = std::fs::read_to_string(temp.path().join("a_b.fa")).unwrap();
        assert_eq!(text, ">a/b_pico_1_len=4\nAAAA\n");
    }

    #[test]
    fn test_compressed_matches_plain() {
        let temp = TempDir::new().unwrap();
        let input = seqs(&[("TF1", vec!["ACGTACGTAC", "GG"])]);

        let plain = FastaWriter::new(temp.path().join("plain"))
            .line_width(width(4))
            .write(&input, &MemorySink::new())
            .unwrap();
        let gz = FastaWriter::new(temp.path().join("gz"))
            .line_width(width(4))
            .compress(true)
            .write(&input, &MemorySink::new())
            .unwrap();

        assert_eq!(gz[0].file_name().unwrap(), "TF1.fa.gz");

        let mut decoded = Vec::new();
        MultiGzDecoder::new(File::open(&gz[0]).unwrap())
            .read_to_end(&mut decoded)
            .unwrap();
        assert_eq!(decoded, std::fs::read(&plain[0]).unwrap());
    }
}
