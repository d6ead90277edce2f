//! Turns raw source text into numbered logical lines.

use super::error::DecodeError;
use super::lexer::{COMMENT_MARKER, INLINE_BREAK};

/// One non-empty source line with its comment stripped and whitespace
/// trimmed. `number` is the 1-based physical line it came from; segments
/// split off by an inline break share their line's number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalLine {
    pub number: usize,
    pub text: String,
}

/// Validates that raw bytes are text before anything else looks at them.
pub fn decode_source(bytes: &[u8]) -> Result<&str, DecodeError> {
    Ok(std::str::from_utf8(bytes)?)
}

/// Strip everything from the first comment marker on and trim the rest.
pub fn clean_line(raw: &str) -> &str {
    let code = match raw.find(COMMENT_MARKER) {
        Some(at) => &raw[..at],
        None => raw,
    };
    code.trim()
}

/// Splits on every line terminator, `\r\n` counting once.
pub fn physical_lines(source: &str) -> impl Iterator<Item = &str> {
    source
        .split("\r\n")
        .flat_map(|chunk| chunk.split(is_line_break))
}

fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\u{0b}' | '\u{0c}' | '\u{1c}'..='\u{1e}' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// Full preprocessing pass. Inline breaks split a physical line into
/// several logical ones. Empty lines are dropped, order and numbering of
/// the remaining lines are kept.
pub fn preprocess(source: &str) -> Vec<LogicalLine> {
    physical_lines(source)
        .enumerate()
        .flat_map(|(i, raw)| raw.split(INLINE_BREAK).map(move |segment| (i + 1, segment)))
        .filter_map(|(number, segment)| {
            let text = clean_line(segment);
            if text.is_empty() {
                None
            } else {
                Some(LogicalLine {
                    number,
                    text: text.to_string(),
                })
            }
        })
        .collect()
}
