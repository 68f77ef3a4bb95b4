// src/index/build.rs

use std::{
    collections::{hash_map::Entry, HashMap},
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
};
use tracing::{debug, info, instrument, warn};

use crate::{
    error::IndexError,
    index::{
        header::{resolve_columns, Columns},
        key::{build_key, PackageKey},
        split::{split_row, DELIMITER},
    },
};

/// Log target of the per-line malformed-row warning. The binary always
/// enables it at `warn`, whatever `RUST_LOG` says.
pub const MALFORMED_TARGET: &str = "pkgindex::malformed";

/// Counters gathered during one indexing pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexStats {
    /// Lines read after the header.
    pub data_lines: usize,
    /// Well-formed rows inserted, including ones later superseded.
    pub indexed_rows: usize,
    /// 1-based line numbers of rows skipped for a field-count mismatch.
    pub skipped_lines: Vec<usize>,
    /// Rows replaced by a later row with the same key.
    pub superseded_rows: usize,
}

/// In-memory index of rows keyed by (package, architecture, release).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageIndex {
    headers: Vec<String>,
    columns: Columns,
    entries: HashMap<PackageKey, Vec<String>>,
    stats: IndexStats,
}

impl PackageIndex {
    /// Open `path` and index its contents. The file is closed on return.
    #[instrument(level = "info", skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, IndexError> {
        let file = File::open(&path).map_err(|source| IndexError::Open {
            path: path.as_ref().to_path_buf(),
            source,
        })?;
        Self::from_reader(BufReader::new(file))
    }

    /// Index every line of `reader`.
    ///
    /// Line 1 is the header and must name `package`, `architecture` and
    /// `release`; otherwise nothing else is read. Each later line whose field
    /// count differs from the header's is skipped with a warning. For rows
    /// sharing a key the last one in file order wins.
    pub fn from_reader<R: BufRead>(mut reader: R) -> Result<Self, IndexError> {
        let mut buf = Vec::new();

        // an empty input has an empty header, which then misses every column
        let header_line = next_line(&mut reader, &mut buf)
            .map_err(|source| IndexError::Read { line: 1, source })?
            .unwrap_or_default();
        let headers: Vec<String> = split_row(&header_line, DELIMITER)
            .into_iter()
            .map(str::to_owned)
            .collect();
        let columns = resolve_columns(headers.as_slice())?;
        debug!(width = headers.len(), ?columns, "resolved header");

        let mut entries: HashMap<PackageKey, Vec<String>> = HashMap::new();
        let mut stats = IndexStats::default();
        let mut line_num = 1;

        loop {
            line_num += 1;
            let line = match next_line(&mut reader, &mut buf) {
                Ok(Some(line)) => line,
                Ok(None) => break,
                Err(source) => {
                    return Err(IndexError::Read {
                        line: line_num,
                        source,
                    })
                }
            };
            stats.data_lines += 1;

            let fields = split_row(&line, DELIMITER);
            if fields.len() != headers.len() {
                warn!(
                    target: MALFORMED_TARGET,
                    expected = headers.len(),
                    found = fields.len(),
                    "Skipping malformed line {}",
                    line_num
                );
                stats.skipped_lines.push(line_num);
                continue;
            }

            let key = build_key(fields.as_slice(), &columns);
            let row: Vec<String> = fields.into_iter().map(str::to_owned).collect();
            match entries.entry(key) {
                Entry::Occupied(mut slot) => {
                    debug!(line = line_num, key = %slot.key(), "superseding earlier row");
                    slot.insert(row);
                    stats.superseded_rows += 1;
                }
                Entry::Vacant(slot) => {
                    slot.insert(row);
                }
            }
            stats.indexed_rows += 1;
        }

        info!(
            entries = entries.len(),
            skipped = stats.skipped_lines.len(),
            superseded = stats.superseded_rows,
            "index built"
        );

        Ok(Self {
            headers,
            columns,
            entries,
            stats,
        })
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn columns(&self) -> Columns {
        self.columns
    }

    pub fn stats(&self) -> &IndexStats {
        &self.stats
    }

    pub fn get(&self, key: &PackageKey) -> Option<&[String]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PackageKey, &[String])> {
        self.entries.iter().map(|(k, v)| (k, v.as_slice()))
    }
}

/// Read one line without its `\n` or `\r\n`, or `None` at end of input.
///
/// Bytes that are not valid UTF-8 become U+FFFD instead of failing the read.
fn next_line<R: BufRead>(reader: &mut R, buf: &mut Vec<u8>) -> io::Result<Option<String>> {
    buf.clear();
    if reader.read_until(b'\n', buf)? == 0 {
        return Ok(None);
    }
    if buf.last() == Some(&b'\n') {
        buf.pop();
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }
    }
    Ok(Some(String::from_utf8_lossy(buf).into_owned()))
}
