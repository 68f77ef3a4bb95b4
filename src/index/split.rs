// src/index/split.rs

/// Field separator for both the header and data rows.
pub const DELIMITER: char = ',';

/// Split one line into its fields at every `delimiter`.
///
/// Empty fields between consecutive delimiters and at either end of the line
/// are kept, so `"a,,b,"` yields four fields. No trimming and no quote
/// handling: a `,` inside quotes still splits.
pub fn split_row(line: &str, delimiter: char) -> Vec<&str> {
    line.split(delimiter).collect()
}
