use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use csv::StringRecord;
use tempfile::NamedTempFile;

use crate::model::row::header_record;
use crate::model::{COLUMNS, LeaderboardRow};

pub mod lock;

pub use lock::StoreLock;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("cannot read leaderboard {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("leaderboard {path} is not valid CSV: {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },
    #[error("leaderboard {path} has unexpected shape (line {line}): {message}")]
    Shape {
        path: String,
        line: u64,
        message: String,
    },
    #[error("cannot write leaderboard {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot lock {path}: {source}")]
    Lock {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl StoreError {
    pub fn lock(path: &Path, source: std::io::Error) -> Self {
        StoreError::Lock {
            path: path.display().to_string(),
            source,
        }
    }

    fn write(path: &Path, source: std::io::Error) -> Self {
        StoreError::Write {
            path: path.display().to_string(),
            source,
        }
    }

    fn shape(path: &Path, line: u64, message: impl Into<String>) -> Self {
        StoreError::Shape {
            path: path.display().to_string(),
            line,
            message: message.into(),
        }
    }
}

/// Line terminator of an existing store, reused for rows appended to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEnding {
    Lf,
    CrLf,
}

impl LineEnding {
    fn detect(header: &[u8]) -> Self {
        if header.ends_with(b"\r\n") {
            LineEnding::CrLf
        } else {
            LineEnding::Lf
        }
    }

    fn as_bytes(self) -> &'static [u8] {
        match self {
            LineEnding::Lf => b"\n",
            LineEnding::CrLf => b"\r\n",
        }
    }

    fn terminator(self) -> csv::Terminator {
        match self {
            LineEnding::Lf => csv::Terminator::Any(b'\n'),
            LineEnding::CrLf => csv::Terminator::CRLF,
        }
    }
}

/// A row as loaded from disk. `raw` holds the record's original bytes,
/// terminator included, and is copied through unchanged on rewrite.
#[derive(Debug, Clone)]
pub struct StoredRow {
    pub raw: Vec<u8>,
    pub row: LeaderboardRow,
}

#[derive(Debug, Clone)]
pub struct Leaderboard {
    path: PathBuf,
    exists: bool,
    header: Vec<u8>,
    line_ending: LineEnding,
    rows: Vec<StoredRow>,
}

impl Leaderboard {
    /// Loads the whole store. A missing file is an empty, not-yet-created
    /// leaderboard.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(store = %path.display(), "leaderboard does not exist yet");
                let header = encode_record(&header_record(), LineEnding::Lf)
                    .map_err(|e| StoreError::write(path, csv_io_error(e)))?;
                return Ok(Self {
                    path: path.to_path_buf(),
                    exists: false,
                    header,
                    line_ending: LineEnding::Lf,
                    rows: Vec::new(),
                });
            }
            Err(e) => {
                return Err(StoreError::Read {
                    path: path.display().to_string(),
                    source: e,
                });
            }
        };
        let parsed = parse_store(path, &bytes)?;
        tracing::debug!(
            store = %path.display(),
            rows = parsed.rows.len(),
            line_ending = ?parsed.line_ending,
            "leaderboard loaded"
        );
        Ok(Self {
            path: path.to_path_buf(),
            exists: true,
            header: parsed.header,
            line_ending: parsed.line_ending,
            rows: parsed.rows,
        })
    }

    pub fn exists(&self) -> bool {
        self.exists
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> impl Iterator<Item = &LeaderboardRow> {
        self.rows.iter().map(|r| &r.row)
    }

    pub fn contains_username(&self, username: &str) -> bool {
        self.rows.iter().any(|r| r.row.username == username)
    }

    /// Appends `row` and atomically replaces the store with the full table.
    pub fn append_and_persist(&mut self, row: LeaderboardRow) -> Result<(), StoreError> {
        let raw = encode_record(&row.to_record(), self.line_ending)
            .map_err(|e| StoreError::write(&self.path, csv_io_error(e)))?;
        self.rows.push(StoredRow { raw, row });
        if let Err(err) = self.persist() {
            self.rows.pop();
            return Err(err);
        }
        self.exists = true;
        Ok(())
    }

    fn persist(&self) -> Result<(), StoreError> {
        let dir = parent_dir(&self.path);
        fs::create_dir_all(&dir).map_err(|e| StoreError::write(&dir, e))?;

        let mut tmp = NamedTempFile::new_in(&dir).map_err(|e| StoreError::write(&dir, e))?;
        self.write_table(tmp.as_file_mut())
            .map_err(|e| StoreError::write(&self.path, e))?;
        // Temp files are created 0600; keep the store's existing mode.
        if let Ok(meta) = fs::metadata(&self.path) {
            if let Err(err) = tmp.as_file().set_permissions(meta.permissions()) {
                tracing::warn!(
                    store = %self.path.display(),
                    "could not carry over permissions: {err}"
                );
            }
        }
        tmp.as_file()
            .sync_all()
            .map_err(|e| StoreError::write(&self.path, e))?;
        tmp.persist(&self.path)
            .map_err(|e| StoreError::write(&self.path, e.error))?;
        tracing::debug!(
            store = %self.path.display(),
            rows = self.rows.len(),
            "leaderboard written"
        );
        Ok(())
    }

    fn write_table<W: Write>(&self, mut out: W) -> std::io::Result<()> {
        let chunks = std::iter::once(self.header.as_slice())
            .chain(self.rows.iter().map(|r| r.raw.as_slice()));
        let mut needs_break = false;
        for chunk in chunks {
            // A last line without a terminator gets one before the next row.
            if needs_break {
                out.write_all(self.line_ending.as_bytes())?;
            }
            out.write_all(chunk)?;
            needs_break = !chunk.is_empty() && !chunk.ends_with(b"\n");
        }
        out.flush()
    }
}

struct ParsedStore {
    header: Vec<u8>,
    line_ending: LineEnding,
    rows: Vec<StoredRow>,
}

fn parse_store(path: &Path, bytes: &[u8]) -> Result<ParsedStore, StoreError> {
    if bytes.iter().all(|b| b.is_ascii_whitespace()) {
        return Err(StoreError::shape(path, 1, "file is empty; expected a header row"));
    }

    let csv_err = |source| StoreError::Csv {
        path: path.display().to_string(),
        source,
    };
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let header = reader.headers().map_err(csv_err)?.clone();
    let header_fields: Vec<&str> = header
        .iter()
        .enumerate()
        .map(|(idx, f)| {
            let f = if idx == 0 { f.trim_start_matches('\u{feff}') } else { f };
            f.trim()
        })
        .collect();
    if header_fields != COLUMNS {
        return Err(StoreError::shape(
            path,
            1,
            format!(
                "header must be `{}`, found `{}`",
                COLUMNS.join(","),
                header_fields.join(",")
            ),
        ));
    }

    let mut parsed = Vec::new();
    for result in reader.records() {
        let record = result.map_err(csv_err)?;
        let (line, start) = record
            .position()
            .map(|p| (p.line(), p.byte() as usize))
            .unwrap_or((0, bytes.len()));
        let row = LeaderboardRow::from_record(&record).map_err(|e| {
            let message = match e.column {
                Some(column) => format!("{column}: {}", e.message),
                None => e.message,
            };
            StoreError::shape(path, line, message)
        })?;
        parsed.push((start, row));
    }

    // Each record spans from its own start to the next record's start, so
    // header plus spans reproduce the file exactly.
    let header_end = parsed.first().map(|(start, _)| *start).unwrap_or(bytes.len());
    let header_bytes = bytes[..header_end].to_vec();
    let mut rows = Vec::with_capacity(parsed.len());
    for (idx, (start, row)) in parsed.iter().enumerate() {
        let end = parsed
            .get(idx + 1)
            .map(|(next, _)| *next)
            .unwrap_or(bytes.len());
        rows.push(StoredRow {
            raw: bytes[*start..end].to_vec(),
            row: row.clone(),
        });
    }

    Ok(ParsedStore {
        line_ending: LineEnding::detect(&header_bytes),
        header: header_bytes,
        rows,
    })
}

fn encode_record(record: &StringRecord, line_ending: LineEnding) -> csv::Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(line_ending.terminator())
        .from_writer(Vec::new());
    writer.write_record(record)?;
    writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))
}

fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn csv_io_error(err: csv::Error) -> std::io::Error {
    match err.into_kind() {
        csv::ErrorKind::Io(e) => e,
        other => std::io::Error::other(format!("{other:?}")),
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/store/tests.rs"]
mod tests;
