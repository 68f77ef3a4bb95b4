// src/error.rs

use std::{io, path::PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IndexError {
    #[error("error opening file: {}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("error reading line {line}")]
    Read {
        line: usize,
        #[source]
        source: io::Error,
    },

    /// The header row lacks one or more of `package`, `architecture`, `release`.
    #[error("missing required columns: {} (need package, architecture, release)", missing.join(", "))]
    MissingColumns { missing: Vec<&'static str> },

    #[error("invalid key {0:?}: expected <package>|<architecture>|<release>")]
    InvalidKey(String),
}
