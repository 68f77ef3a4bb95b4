// src/index/key.rs

use serde::Serialize;
use std::{fmt, str::FromStr};

use crate::{error::IndexError, index::header::Columns};

/// Joins the key components in the textual form of a key.
pub const KEY_SEPARATOR: char = '|';

/// Composite lookup key: one (package, architecture, release) triple.
///
/// Kept as a struct so that values containing `|` never collide; the
/// `|`-joined string is only its display form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct PackageKey {
    pub package: String,
    pub architecture: String,
    pub release: String,
}

impl PackageKey {
    pub fn new(
        package: impl Into<String>,
        architecture: impl Into<String>,
        release: impl Into<String>,
    ) -> Self {
        Self {
            package: package.into(),
            architecture: architecture.into(),
            release: release.into(),
        }
    }
}

impl fmt::Display for PackageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{sep}{}{sep}{}",
            self.package,
            self.architecture,
            self.release,
            sep = KEY_SEPARATOR
        )
    }
}

impl FromStr for PackageKey {
    type Err = IndexError;

    /// Parse `package|architecture|release`. Exactly three parts are required.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(KEY_SEPARATOR).collect();
        match parts.as_slice() {
            [package, architecture, release] => Ok(Self::new(*package, *architecture, *release)),
            _ => Err(IndexError::InvalidKey(s.to_string())),
        }
    }
}

/// Build the key of a row that already passed the field-count check.
pub fn build_key<S: AsRef<str>>(row: &[S], cols: &Columns) -> PackageKey {
    PackageKey::new(
        row[cols.package].as_ref(),
        row[cols.architecture].as_ref(),
        row[cols.release].as_ref(),
    )
}
