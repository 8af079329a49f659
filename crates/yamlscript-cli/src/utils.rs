//! Shared CLI utilities for reading input and rendering output

use serde_json::Value;
use std::fs;
use std::io::{self, Read};

/// Read source code from a file or stdin.
/// If `file` is "-", reads from stdin. Otherwise reads from the specified file.
pub fn read_source(file: &str) -> io::Result<String> {
    if file == "-" {
        let mut source = String::new();
        io::stdin().read_to_string(&mut source)?;
        Ok(source)
    } else {
        fs::read_to_string(file)
    }
}

/// Render evaluated data as pretty or single-line JSON
pub fn render_json(value: &Value, compact: bool) -> serde_json::Result<String> {
    if compact {
        serde_json::to_string(value)
    } else {
        serde_json::to_string_pretty(value)
    }
}
