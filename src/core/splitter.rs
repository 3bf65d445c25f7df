use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::SplitError;
use crate::models::{Destination, LineSequence, Partition, WriteMode};

/// Everything needed for one split invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitRequest {
    pub source: PathBuf,
    pub first: PathBuf,
    pub second: PathBuf,
    pub mode: WriteMode,
}

/// What a completed split did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitSummary {
    pub source: PathBuf,
    pub first: PathBuf,
    pub second: PathBuf,
    pub mode: WriteMode,
    pub lines_read: usize,
    pub first_lines: usize,
    pub second_lines: usize,
}

impl fmt::Display for SplitSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "File split completed!")?;
        writeln!(f, "  Source: {} ({} lines)", self.source.display(), self.lines_read)?;
        writeln!(
            f,
            "  Odd lines:  {} line(s) -> {}",
            self.first_lines,
            self.first.display()
        )?;
        writeln!(
            f,
            "  Even lines: {} line(s) -> {}",
            self.second_lines,
            self.second.display()
        )?;
        write!(f, "  Mode: {}", self.mode)
    }
}

/// Partition lines by 1-based position parity.
///
/// The first line is line 1 and lands in `odd`; the second lands in `even`,
/// and so on. Values are moved, never modified.
pub fn split_lines<T, I>(lines: I) -> Partition<T>
where
    I: IntoIterator<Item = T>,
{
    let mut partition = Partition::default();
    for (index, line) in lines.into_iter().enumerate() {
        if index % 2 == 0 {
            partition.odd.push(line);
        } else {
            partition.even.push(line);
        }
    }
    partition
}

/// Read the whole source before anything else happens
pub fn read_lines(source: &Path) -> Result<LineSequence, SplitError> {
    let content = fs::read(source).map_err(|e| SplitError::SourceRead {
        path: source.to_path_buf(),
        source: e,
    })?;
    let lines = LineSequence::from_bytes(&content);
    debug!("Read {} line(s) from {}", lines.len(), source.display());
    Ok(lines)
}

/// Write `odd` to `first` and `even` to `second`.
///
/// The first destination is written completely before the second is opened.
/// A failure on the second leaves the first as written.
pub fn write_partition<L: AsRef<[u8]>>(
    partition: &Partition<L>,
    first: &Path,
    second: &Path,
    mode: WriteMode,
) -> Result<(), SplitError> {
    write_lines(Destination::First, first, &partition.odd, mode)?;
    write_lines(Destination::Second, second, &partition.even, mode)
}

fn write_lines<L: AsRef<[u8]>>(
    destination: Destination,
    path: &Path,
    lines: &[L],
    mode: WriteMode,
) -> Result<(), SplitError> {
    let to_error = |e: std::io::Error| SplitError::DestinationWrite {
        destination,
        path: path.to_path_buf(),
        source: e,
    };

    let mut options = OpenOptions::new();
    options.create(true);
    match mode {
        WriteMode::Overwrite => options.write(true).truncate(true),
        WriteMode::Append => options.append(true),
    };

    let file = options.open(path).map_err(to_error)?;
    let mut writer = BufWriter::new(file);
    for line in lines {
        writer.write_all(line.as_ref()).map_err(to_error)?;
    }
    writer.flush().map_err(to_error)?;

    debug!("Wrote {} line(s) to {} ({})", lines.len(), destination, path.display());
    Ok(())
}

/// Read the source, partition it and write both halves
pub fn split_file(request: &SplitRequest) -> Result<SplitSummary, SplitError> {
    let lines = read_lines(&request.source)?;
    let lines_read = lines.len();
    let partition = split_lines(lines);

    write_partition(&partition, &request.first, &request.second, request.mode)?;

    info!(
        "Split {} line(s) from {} into {} + {}",
        lines_read,
        request.source.display(),
        partition.odd.len(),
        partition.even.len()
    );

    Ok(SplitSummary {
        source: request.source.clone(),
        first: request.first.clone(),
        second: request.second.clone(),
        mode: request.mode,
        lines_read,
        first_lines: partition.odd.len(),
        second_lines: partition.even.len(),
    })
}
