// src/index/query.rs

use serde_json::{json, Value};
use std::fmt;

use crate::index::{build::PackageIndex, key::PackageKey};

/// How a lookup result is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// `🔍 Found: a | b | c` or `❌ Not found: <key>`
    #[default]
    Text,
    /// One JSON object pairing each header name with its value
    Json,
}

/// Outcome of a single point lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<'a> {
    Found { key: PackageKey, row: &'a [String] },
    NotFound { key: PackageKey },
}

impl<'a> Lookup<'a> {
    pub fn key(&self) -> &PackageKey {
        match self {
            Lookup::Found { key, .. } | Lookup::NotFound { key } => key,
        }
    }

    pub fn row(&self) -> Option<&'a [String]> {
        match self {
            Lookup::Found { row, .. } => Some(*row),
            Lookup::NotFound { .. } => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found { .. })
    }

    /// JSON view; `headers` names the fields of a found row positionally.
    pub fn to_json(&self, headers: &[String]) -> Value {
        let key = self.key();
        match self.row() {
            Some(row) => {
                let fields: Vec<Value> = headers
                    .iter()
                    .zip(row)
                    .map(|(column, value)| json!({ "column": column, "value": value }))
                    .collect();
                json!({
                    "key": key.to_string(),
                    "query": key,
                    "found": true,
                    "fields": fields,
                })
            }
            None => json!({
                "key": key.to_string(),
                "query": key,
                "found": false,
            }),
        }
    }

    pub fn render(&self, headers: &[String], format: OutputFormat) -> String {
        match format {
            OutputFormat::Text => self.to_string(),
            OutputFormat::Json => self.to_json(headers).to_string(),
        }
    }
}

impl fmt::Display for Lookup<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lookup::Found { row, .. } => write!(f, "🔍 Found: {}", row.join(" | ")),
            Lookup::NotFound { key } => write!(f, "❌ Not found: {}", key),
        }
    }
}

impl PackageIndex {
    /// Look up one key. Never modifies the index.
    pub fn lookup(&self, key: &PackageKey) -> Lookup<'_> {
        match self.get(key) {
            Some(row) => Lookup::Found {
                key: key.clone(),
                row,
            },
            None => Lookup::NotFound { key: key.clone() },
        }
    }

    pub fn lookup_parts(&self, package: &str, architecture: &str, release: &str) -> Lookup<'_> {
        self.lookup(&PackageKey::new(package, architecture, release))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::io::Cursor;

    fn sample() -> Result<PackageIndex> {
        let text = "package,architecture,release,version\n\
                    openssl,amd64,22.04,3.0.2\n\
                    foo,amd64,20.04,1.0\n\
                    zlib,arm64,22.04,1.2.11\n\
                    foo,amd64,20.04,2.0\n";
        Ok(PackageIndex::from_reader(Cursor::new(text.as_bytes()))?)
    }

    #[test]
    fn found_row_is_joined_with_pipes() -> Result<()> {
        let idx = sample()?;
        let hit = idx.lookup_parts("openssl", "amd64", "22.04");
        assert!(hit.is_found());
        assert_eq!(hit.to_string(), "🔍 Found: openssl | amd64 | 22.04 | 3.0.2");
        Ok(())
    }

    #[test]
    fn not_found_names_the_key() -> Result<()> {
        let idx = sample()?;
        let miss = idx.lookup(&"openssl|arm64|22.04".parse()?);
        assert!(!miss.is_found());
        assert_eq!(miss.row(), None);
        assert_eq!(miss.to_string(), "❌ Not found: openssl|arm64|22.04");
        Ok(())
    }

    #[test]
    fn duplicate_key_returns_later_row() -> Result<()> {
        let idx = sample()?;
        let hit = idx.lookup_parts("foo", "amd64", "20.04");
        assert_eq!(hit.row().map(|r| r[3].as_str()), Some("2.0"));
        Ok(())
    }

    #[test]
    fn lookup_leaves_index_untouched() -> Result<()> {
        let idx = sample()?;
        let before = idx.clone();
        let _ = idx.lookup_parts("openssl", "amd64", "22.04");
        let _ = idx.lookup_parts("nope", "amd64", "22.04");
        assert_eq!(idx, before);
        Ok(())
    }

    #[test]
    fn json_pairs_headers_with_values() -> Result<()> {
        let idx = sample()?;
        let hit = idx.lookup_parts("zlib", "arm64", "22.04");
        let value: Value = serde_json::from_str(&hit.render(idx.headers(), OutputFormat::Json))?;
        assert_eq!(value["found"], json!(true));
        assert_eq!(value["key"], json!("zlib|arm64|22.04"));
        assert_eq!(value["query"]["architecture"], json!("arm64"));
        assert_eq!(value["fields"][3], json!({ "column": "version", "value": "1.2.11" }));

        let miss = idx.lookup_parts("zlib", "amd64", "22.04").to_json(idx.headers());
        assert_eq!(miss["found"], json!(false));
        assert!(miss.get("fields").is_none());
        Ok(())
    }
}
