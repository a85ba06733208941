// SPDX-License-Identifier: MIT OR Apache-2.0
//! Console output parsing: delimiter-split (name, value) discovery.

use crate::execution::DEFAULT_DELIMITER;

/// Split captured stdout into (name, value) pairs.
///
/// Each non-empty line is split on the first occurrence of `delimiter`;
/// the name is everything before it, the value everything after. Lines
/// without the delimiter, or where it appears at position zero (no name),
/// are dropped. An empty delimiter falls back to [`DEFAULT_DELIMITER`].
///
/// Name and value whitespace is preserved as the script emitted it.
pub fn parse_output(text: &str, delimiter: &str) -> Vec<(String, String)> {
    let delimiter = if delimiter.is_empty() {
        DEFAULT_DELIMITER
    } else {
        delimiter
    };

    let mut values = Vec::new();
    for line in text.lines() {
        if line.is_empty() {
            continue;
        }
        if let Some(idx) = line.find(delimiter) {
            if idx > 0 {
                let name = &line[..idx];
                let value = &line[idx + delimiter.len()..];
                values.push((name.to_string(), value.to_string()));
            }
        }
    }
    values
}
