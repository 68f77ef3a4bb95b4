pub mod build;
pub mod header;
pub mod key;
pub mod query;
pub mod split;

pub use build::{IndexStats, PackageIndex, MALFORMED_TARGET};
pub use header::{resolve_columns, Columns, REQUIRED_COLUMNS};
pub use key::{build_key, PackageKey, KEY_SEPARATOR};
pub use query::{Lookup, OutputFormat};
pub use split::{split_row, DELIMITER};
