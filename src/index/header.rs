// src/index/header.rs

use crate::error::IndexError;

/// Header names every input must carry, in key order.
pub const REQUIRED_COLUMNS: [&str; 3] = ["package", "architecture", "release"];

/// Zero-based positions of the key columns within a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Columns {
    pub package: usize,
    pub architecture: usize,
    pub release: usize,
}

/// Locate `package`, `architecture` and `release` in the header row.
///
/// Matching is exact and case-sensitive. If a name repeats, its last
/// position is used. Every absent name is reported in the error.
pub fn resolve_columns<S: AsRef<str>>(header: &[S]) -> Result<Columns, IndexError> {
    let mut found: [Option<usize>; 3] = [None; 3];
    for (pos, name) in header.iter().enumerate() {
        if let Some(slot) = REQUIRED_COLUMNS.iter().position(|r| *r == name.as_ref()) {
            found[slot] = Some(pos);
        }
    }

    match found {
        [Some(package), Some(architecture), Some(release)] => Ok(Columns {
            package,
            architecture,
            release,
        }),
        _ => {
            let missing = REQUIRED_COLUMNS
                .iter()
                .zip(found)
                .filter(|(_, pos)| pos.is_none())
                .map(|(name, _)| *name)
                .collect();
            Err(IndexError::MissingColumns { missing })
        }
    }
}
