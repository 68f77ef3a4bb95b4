pub mod error;
pub mod index;

pub use error::IndexError;
pub use index::{Columns, IndexStats, Lookup, PackageIndex, PackageKey};
