//! Plain-text output and human-readable errors.

use std::io::{self, Write};

use crate::processor::DecodeError;
use crate::processor::preprocess::physical_lines;

/// Writes the decoded output exactly as produced, without a trailing newline.
pub fn emit<W: Write>(output: &str, out: &mut W) -> io::Result<()> {
    out.write_all(output.as_bytes())?;
    out.flush()
}

/// Error message followed by the offending source line, when there is one.
pub fn render_error(err: &DecodeError, source: &str) -> String {
    let mut rendered = err.to_string();

    let offending = err.line().and_then(|line| {
        physical_lines(source)
            .nth(line.checked_sub(1)?)
            .map(|text| (line, text.trim_end().to_string()))
    });

    if let Some((line, text)) = offending {
        rendered.push_str(&format!("\n{line:>5} | {text}"));
    }
    rendered
}
