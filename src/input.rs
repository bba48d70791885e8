//! Opening input files as buffered text, gzip-aware.

use crate::error::{ExtractError, Result};

use flate2::read::MultiGzDecoder;

use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
};

/// Opens `path` for line-oriented reading.
///
/// Files ending in `.gz` are decompressed on the fly. The `what` label names
/// the input in error messages ("genome file", "peaks file").
///
/// # Errors
///
/// - [`ExtractError::NotFound`] if `path` is not an existing regular file
/// - [`ExtractError::Format`] if read access is denied
/// - [`ExtractError::Io`] for any other failure to open
pub fn open_input(path: &Path, what: &'static str) -> Result<Box<dyn BufRead>> {
    if !path.is_file() {
        return Err(ExtractError::NotFound {
            what,
            path: path.to_path_buf(),
        });
    }

    let file = File::open(path).map_err(|e| read_error(path, what, e))?;

    let reader: Box<dyn BufRead> = if is_compressed_path(path) {
        Box::new(BufReader::new(MultiGzDecoder::new(file)))
    } else {
        Box::new(BufReader::new(file))
    };

    Ok(reader)
}

/// Reads one line into `buf` (cleared first), returning `Ok(false)` at EOF.
pub fn next_line(
    reader: &mut dyn BufRead,
    buf: &mut String,
    path: &Path,
    what: &'static str,
) -> Result<bool> {
    buf.clear();
    let n = reader
        .read_line(buf)
        .map_err(|e| read_error(path, what, e))?;
    Ok(n > 0)
}

/// Maps an OS error raised while opening or reading an input.
///
/// Permission problems, undecodable text and broken gzip streams are
/// format/access problems of the input, not raw I/O failures.
pub fn read_error(path: &Path, what: &'static str, e: io::Error) -> ExtractError {
    match e.kind() {
        io::ErrorKind::NotFound => ExtractError::NotFound {
            what,
            path: path.to_path_buf(),
        },
        io::ErrorKind::PermissionDenied => {
            ExtractError::format(path, format!("permission denied reading {}", what))
        }
        io::ErrorKind::InvalidData => {
            ExtractError::format(path, format!("{} is not valid UTF-8 text: {}", what, e))
        }
        _ if is_compressed_path(path) => {
            ExtractError::format(path, format!("{} is not valid gzip: {}", what, e))
        }
        _ => ExtractError::io("read", path, e),
    }
}

/// Strips a trailing `\n` or `\r\n`.
pub fn trim_newline(line: &str) -> &str {
    line.strip_suffix('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .unwrap_or(line)
}

fn is_compressed_path(path: &Path) -> bool {
    matches!(path.extension().and_then(|ext| ext.to_str()), Some("gz"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::{Compression, write::GzEncoder};
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_missing_path_is_not_found() {
        let temp = TempDir::new().unwrap();
        let err = open_input(&temp.path().join("nope.fa"), "genome file").err();
        assert!(matches!(err, Some(ExtractError::NotFound { what: "genome file", .. })));
    }

    #[test]
    fn test_directory_is_not_found() {
        let temp = TempDir::new().unwrap();
        let err = open_input(temp.path(), "peaks file").err();
        assert!(matches!(err, Some(ExtractError::NotFound { .. })));
    }

    #[test]
    fn test_gzip_is_transparent() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("peaks.tsv.gz");
        let mut enc = GzEncoder::new(File::create(&path).unwrap(), Compression::default());
        enc.write_all(b"line one\nline two\n").unwrap();
        enc.finish().unwrap();

        let mut reader = open_input(&path, "peaks file").unwrap();
        let mut buf = String::new();
        assert!(next_line(reader.as_mut(), &mut buf, &path, "peaks file").unwrap());
        assert_eq!(buf, "line one\n");
        assert!(next_line(reader.as_mut(), &mut buf, &path, "peaks file").unwrap());
        assert_eq!(trim_newline(&buf), "line two");
        assert!(!next_line(reader.as_mut(), &mut buf, &path, "peaks file").unwrap());
    }

    #[test]
    fn test_invalid_utf8_is_format_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bin.fa");
        std::fs::write(&path, [b'>', b'x', b'\n', 0xff, 0xfe, b'\n']).unwrap();

        let mut reader = open_input(&path, "genome file").unwrap();
        let mut buf = String::new();
        assert!(next_line(reader.as_mut(), &mut buf, &path, "genome file").unwrap());
        let err = next_line(reader.as_mut(), &mut buf, &path, "genome file").err();
        assert!(matches!(err, Some(ExtractError::Format { .. })));
    }

    #[test]
    fn test_plain_text_behind_gz_extension() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("genome.fa.gz");
        std::fs::write(&path, b">chr1\nACGT\n").unwrap();

        let mut reader = open_input(&path, "genome file").unwrap();
        let mut buf = String::new();
        let err = next_line(reader.as_mut(), &mut buf, &path, "genome file").err();
        assert!(matches!(err, Some(ExtractError::Format { .. })));
    }

    #[test]
    fn test_read_error_mapping() {
        let path = Path::new("genome.fa");

        let err = read_error(path, "genome file", io::Error::from(io::ErrorKind::PermissionDenied));
        assert!(matches!(err, ExtractError::Format { .. }));
        assert!(err.to_string().contains("permission denied reading genome file"));

        let err = read_error(path, "genome file", io::Error::from(io::ErrorKind::NotFound));
        assert!(matches!(err, ExtractError::NotFound { what: "genome file", .. }));

        let err = read_error(path, "genome file", io::Error::from(io::ErrorKind::Interrupted));
        assert!(matches!(err, ExtractError::Io { action: "read", .. }));

        let gz = Path::new("genome.fa.gz");
        let err = read_error(gz, "genome file", io::Error::from(io::ErrorKind::InvalidInput));
        assert!(matches!(err, ExtractError::Format { .. }));
        assert!(err.to_string().contains("not valid gzip"));
    }

    #[test]
    fn test_trim_newline() {
        assert_eq!(trim_newline("abc\r\n"), "abc");
        assert_eq!(trim_newline("abc\n"), "abc");
        assert_eq!(trim_newline("abc"), "abc");
        assert_eq!(trim_newline("abc\r"), "abc\r");
    }
}
