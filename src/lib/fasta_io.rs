//! FASTA input and output for methylation runs.
//!
//! Reading and writing are delegated to `noodles`. This module only decides where bytes come
//! from and go to:
//!
//! - Input paths `-` and `/dev/stdin` read standard input; `.gz`/`.bgz` paths are
//!   decompressed with a multi-member gzip decoder (which also reads BGZF); anything else is
//!   read as plain text.
//! - Output `None` or `-` writes standard output; a `.gz` path is gzip-compressed; anything else
//!   is written as plain text.
//!
//! Output sequences are wrapped at a fixed number of bases per line and every record keeps its
//! full definition line (name and description).

use anyhow::{Context, Result};
use flate2::Compression;
use flate2::read::MultiGzDecoder;
use flate2::write::GzEncoder;
use noodles::fasta;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::scanner::{ScanResult, Scanner};

/// Bases per output line unless overridden.
pub const DEFAULT_LINE_WIDTH: usize = 60;

/// A FASTA reader over any supported input.
pub type FastaReader = fasta::io::Reader<Box<dyn BufRead>>;

/// Returns true if `path` names standard input.
///
/// ```
/// use methylref_lib::fasta_io::is_stdin_path;
/// use std::path::Path;
///
/// assert!(is_stdin_path(Path::new("-")));
/// assert!(is_stdin_path(Path::new("/dev/stdin")));
/// assert!(!is_stdin_path(Path::new("ref.fa")));
/// ```
pub fn is_stdin_path<P: AsRef<Path>>(path: P) -> bool {
    let path_str = path.as_ref().to_string_lossy();
    path_str == "-" || path_str == "/dev/stdin"
}

/// Returns true if `path` names standard output.
pub fn is_stdout_path<P: AsRef<Path>>(path: P) -> bool {
    let path_str = path.as_ref().to_string_lossy();
    path_str == "-" || path_str == "/dev/stdout"
}

fn has_gzip_extension(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "gz" || ext == "bgz")
}

/// Opens a FASTA reader over a file, a gzip-compressed file, or standard input.
///
/// # Errors
///
/// Returns an error if the file cannot be opened.
pub fn open_fasta_reader<P: AsRef<Path>>(path: P) -> Result<FastaReader> {
    let path = path.as_ref();

    let inner: Box<dyn BufRead> = if is_stdin_path(path) {
        log::debug!("Reading FASTA from standard input");
        Box::new(BufReader::new(io::stdin()))
    } else {
        let file = File::open(path)
            .with_context(|| format!("Failed to open input FASTA: {}", path.display()))?;
        if has_gzip_extension(path) {
            log::debug!("Reading gzip-compressed FASTA: {}", path.display());
            Box::new(BufReader::new(MultiGzDecoder::new(file)))
        } else {
            Box::new(BufReader::new(file))
        }
    };

    Ok(fasta::io::Reader::new(inner))
}

/// Iterator over the records of a [`FastaReader`] that keeps each definition line verbatim.
///
/// `noodles` splits a definition into a name and a description and rejoins them with a single
/// space, which turns a tab separator into a space. Here the whole line after `>` is stored as
/// the record name so it is written back byte for byte; use [`record_name`] for the name alone.
pub struct FastaRecords<'r> {
    reader: &'r mut FastaReader,
}

impl Iterator for FastaRecords<'_> {
    type Item = io::Result<fasta::Record>;

    fn next(&mut self) -> Option<Self::Item> {
        read_record(self.reader).transpose()
    }
}

/// Returns an iterator over the records of `reader`.
pub fn fasta_records(reader: &mut FastaReader) -> FastaRecords<'_> {
    FastaRecords { reader }
}

/// Reads the next record, or `None` at the end of the input.
fn read_record(reader: &mut FastaReader) -> io::Result<Option<fasta::Record>> {
    let mut line = String::new();
    if reader.read_definition(&mut line)? == 0 {
        return Ok(None);
    }

    // Parsed only to reject lines that are not definitions.
    line.parse::<fasta::record::Definition>()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    let raw = line.strip_prefix('>').unwrap_or(&line).to_string();

    let mut sequence = Vec::new();
    reader.read_sequence(&mut sequence)?;

    let definition = fasta::record::Definition::new(raw, None);
    Ok(Some(fasta::Record::new(definition, fasta::record::Sequence::from(sequence))))
}

/// The byte sink underneath a [`FastaWriter`].
enum Sink {
    Plain(BufWriter<Box<dyn Write>>),
    Gzip(GzEncoder<BufWriter<File>>),
}

impl Write for Sink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Sink::Plain(w) => w.write(buf),
            Sink::Gzip(w) => w.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Sink::Plain(w) => w.flush(),
            Sink::Gzip(w) => w.flush(),
        }
    }
}

/// Writes FASTA records with a fixed line width.
///
/// Call [`FastaWriter::finish`] once all records are written so buffered and compressed data
/// reaches the output.
pub struct FastaWriter {
    inner: fasta::io::Writer<Sink>,
}

impl FastaWriter {
    /// Creates a writer to `output`, or to standard output when `output` is `None` or `-`.
    ///
    /// # Errors
    ///
    /// Returns an error if the output file cannot be created.
    pub fn new(output: Option<&Path>, line_width: usize) -> Result<Self> {
        let sink = match output {
            Some(path) if !is_stdout_path(path) => {
                let file = File::create(path).with_context(|| {
                    format!("Failed to create output FASTA: {}", path.display())
                })?;
                if has_gzip_extension(path) {
                    Sink::Gzip(GzEncoder::new(BufWriter::new(file), Compression::default()))
                } else {
                    let out: Box<dyn Write> = Box::new(file);
                    Sink::Plain(BufWriter::new(out))
                }
            }
            _ => {
                let out: Box<dyn Write> = Box::new(io::stdout().lock());
                Sink::Plain(BufWriter::new(out))
            }
        };

        let inner = fasta::io::writer::Builder::default()
            .set_line_base_count(line_width)
            .build_from_writer(sink);
        Ok(Self { inner })
    }

    /// Writes one record.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying write fails.
    pub fn write_record(&mut self, record: &fasta::Record) -> Result<()> {
        self.inner.write_record(record).context("Failed to write FASTA record")
    }

    /// Flushes all buffered output and completes a gzip stream.
    ///
    /// # Errors
    ///
    /// Returns an error if flushing fails.
    pub fn finish(mut self) -> Result<()> {
        let result = match self.inner.get_mut() {
            Sink::Plain(w) => w.flush(),
            Sink::Gzip(w) => w.try_finish().and_then(|()| w.get_mut().flush()),
        };
        result.context("Failed to flush output FASTA")
    }
}

/// A record rewritten by the scanner.
pub struct MethylatedRecord {
    /// The record with its original definition and methylated sequence.
    pub record: fasta::Record,
    /// Number of windows replaced.
    pub sites: usize,
}

/// Returns the bases of a record.
#[must_use]
pub fn record_bases(record: &fasta::Record) -> &[u8] {
    record.sequence().as_ref()
}

/// Returns the record name: the definition line up to the first whitespace.
#[must_use]
pub fn record_name(record: &fasta::Record) -> String {
    let line: &[u8] = record.name();
    let name = line.split(u8::is_ascii_whitespace).next().unwrap_or_default();
    String::from_utf8_lossy(name).into_owned()
}

/// Scans `record` and returns a copy with the same definition line and methylated bases.
#[must_use]
pub fn methylate_record(scanner: &Scanner<'_>, record: &fasta::Record) -> MethylatedRecord {
    let ScanResult { bases, sites } = scanner.scan(record_bases(record));
    let record =
        fasta::Record::new(record.definition().clone(), fasta::record::Sequence::from(bases));
    MethylatedRecord { record, sites }
}
