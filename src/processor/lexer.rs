//! Classifies logical lines into marker tokens and plain text.
//!
//! The language is line oriented: a whole logical line is either one of
//! the utterance markers or free text. Free text is interpreted later by
//! the block parser, either as a glyph run (inside an utterance) or as a
//! statement (outside one).
//
//  Marker lines:
//
//      Start      ::= "와타시는"
//      Separator  ::= "~"
//      Control    ::= "ㅢ?!"
//      End        ::= "한다는 것이야"      (character output)
//                   | "이라는 것이야"      (numeric output)

use super::ast::OutputMode;
use super::preprocess::LogicalLine;

pub const COMMENT_MARKER: char = '#';
pub const INLINE_BREAK: &str = "으이?";

pub const START_MARKER: &str = "와타시는";
pub const WORD_SEPARATOR: &str = "~";
pub const CONTROL_MARKER: &str = "ㅢ?!";
pub const END_CHAR_MARKER: &str = "한다는 것이야";
pub const END_NUMERIC_MARKER: &str = "이라는 것이야";

/// Every reserved marker line, in no particular order.
pub const MARKERS: &[&str] = &[
    START_MARKER,
    WORD_SEPARATOR,
    CONTROL_MARKER,
    END_CHAR_MARKER,
    END_NUMERIC_MARKER,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    Start,
    Separator,
    Control,
    End(OutputMode),
    Text(&'a str),
}

impl<'a> Token<'a> {
    pub fn classify(text: &'a str) -> Self {
        match text {
            START_MARKER => Token::Start,
            WORD_SEPARATOR => Token::Separator,
            CONTROL_MARKER => Token::Control,
            END_CHAR_MARKER => Token::End(OutputMode::Char),
            END_NUMERIC_MARKER => Token::End(OutputMode::Numeric),
            other => Token::Text(other),
        }
    }

    /// The source text this token was classified from.
    pub fn as_str(&self) -> &'a str {
        match *self {
            Token::Start => START_MARKER,
            Token::Separator => WORD_SEPARATOR,
            Token::Control => CONTROL_MARKER,
            Token::End(OutputMode::Char) => END_CHAR_MARKER,
            Token::End(OutputMode::Numeric) => END_NUMERIC_MARKER,
            Token::Text(text) => text,
        }
    }
}

/// Yields `(line number, token)` pairs over preprocessed lines.
#[derive(Clone)]
pub struct Lexer<'a> {
    lines: std::slice::Iter<'a, LogicalLine>,
}

impl<'a> Lexer<'a> {
    pub fn new(lines: &'a [LogicalLine]) -> Self {
        Self {
            lines: lines.iter(),
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = (usize, Token<'a>);

    fn next(&mut self) -> Option<Self::Item> {
        let line = self.lines.next()?;
        Some((line.number, Token::classify(&line.text)))
    }
}

/// True when `text` is one of the reserved marker lines.
pub fn is_marker(text: &str) -> bool {
    MARKERS.contains(&text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processor::preprocess::preprocess;

    #[test]
    fn test_tokenisation() {
        let test_cases = vec![
            ("와타시는", Token::Start),
            ("~", Token::Separator),
            ("ㅢ?!", Token::Control),
            ("한다는 것이야", Token::End(OutputMode::Char)),
            ("이라는 것이야", Token::End(OutputMode::Numeric)),
            ("훠러훳훳훠훠", Token::Text("훠러훳훳훠훠")),
            ("누이 좋고 훠", Token::Text("누이 좋고 훠")),
        ];

        for (src, expected) in test_cases {
            assert_eq!(Token::classify(src), expected);
        }
    }

    #[test]
    fn test_lexer_keeps_line_numbers() {
        let lines = preprocess("와타시는\n\n허훠 # e\n한다는 것이야\n");
        let tokens: Vec<_> = Lexer::new(&lines).collect();
        assert_eq!(
            tokens,
            vec![
                (1, Token::Start),
                (3, Token::Text("허훠")),
                (4, Token::End(OutputMode::Char)),
            ]
        );
    }

    #[test]
    fn test_markers_need_the_whole_line() {
        assert_eq!(Token::classify("와타시는 허"), Token::Text("와타시는 허"));
        assert!(!is_marker("~~"));
        assert!(is_marker("ㅢ?!"));
    }
}
