//! The symbol table: glyph runs to character codes.
//!
//! Lookup is an exact string match. The standard entries below are written
//! out by hand, one per character, and the table is never extended while a
//! run is in progress. Hosts that need more characters build a new table
//! with [`SymbolTable::extended`] before running anything.

use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

use thiserror::Error;
use tracing::debug;

use super::ast::GlyphRun;
use super::lexer::{COMMENT_MARKER, INLINE_BREAK, is_marker};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SymbolError {
    #[error("glyph run `{glyphs}` can never appear as a single source line")]
    Unreachable { glyphs: String },

    #[error("glyph run `{glyphs}` is a reserved marker")]
    Reserved { glyphs: String },

    #[error("code {code} for glyph run `{glyphs}` is not a valid character")]
    InvalidCode { glyphs: String, code: u32 },

    #[error("glyph run `{glyphs}` is listed more than once")]
    Duplicate { glyphs: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolTable {
    entries: HashMap<String, u32>,
}

impl SymbolTable {
    /// Process-wide table built from the standard entries on first use.
    pub fn standard() -> &'static SymbolTable {
        static STANDARD_TABLE: OnceLock<SymbolTable> = OnceLock::new();
        STANDARD_TABLE.get_or_init(|| {
            let entries: HashMap<String, u32> = STANDARD
                .iter()
                .map(|(glyphs, code)| (glyphs.to_string(), *code))
                .collect();
            debug!(entries = entries.len(), "built standard symbol table");
            SymbolTable { entries }
        })
    }

    /// Builds a table holding exactly `entries`.
    pub fn from_entries<I, S>(entries: I) -> Result<Self, SymbolError>
    where
        I: IntoIterator<Item = (S, u32)>,
        S: Into<String>,
    {
        SymbolTable::default().extended(entries)
    }

    /// Copy of this table with `entries` added. An added entry replaces an
    /// existing one with the same glyph run.
    pub fn extended<I, S>(&self, entries: I) -> Result<Self, SymbolError>
    where
        I: IntoIterator<Item = (S, u32)>,
        S: Into<String>,
    {
        let mut table = self.clone();
        let mut seen = HashSet::new();

        for (glyphs, code) in entries {
            let glyphs = glyphs.into();
            validate(&glyphs, code)?;
            if !seen.insert(glyphs.clone()) {
                return Err(SymbolError::Duplicate { glyphs });
            }
            table.entries.insert(glyphs, code);
        }

        Ok(table)
    }

    pub fn resolve(&self, run: &GlyphRun) -> Option<u32> {
        self.entries.get(run.as_str()).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn validate(glyphs: &str, code: u32) -> Result<(), SymbolError> {
    if glyphs.is_empty()
        || glyphs.trim() != glyphs
        || glyphs.contains(['\n', '\r', COMMENT_MARKER])
        || glyphs.contains(INLINE_BREAK)
    {
        return Err(SymbolError::Unreachable {
            glyphs: glyphs.to_string(),
        });
    }
    if is_marker(glyphs) {
        return Err(SymbolError::Reserved {
            glyphs: glyphs.to_string(),
        });
    }
    if char::from_u32(code).is_none() {
        return Err(SymbolError::InvalidCode {
            glyphs: glyphs.to_string(),
            code,
        });
    }
    Ok(())
}

/// Standard entries: newline and printable ASCII.
pub const STANDARD: &[(&str, u32)] = &[
    ("훳", 10), // newline
    ("훳훳훳훠훠", 32), // space
    ("훳훳훳훠훠훠", 33), // !
    ("훳훳훳훠훠훠훠", 34), // "
    ("훳훳훳훠훠훠훠훠", 35), // #
    ("훳훳훳훠러훠", 36), // $
    ("훳훳훳훠러훠훠", 37), // %
    ("훳훳훳훠러훠훠훠", 38), // &
    ("훳훳훳훠러훠훠훠훠", 39), // '
    ("훳훳훳훳", 40), // (
    ("훳훳훳훳훠", 41), // )
    ("훳훳훳훳훠훠", 42), // *
    ("훳훳훳훳훠훠훠", 43), // +
    ("훳훳훳훳훠훠훠훠", 44), // ,
    ("훳훳훳훳훠훠훠훠훠", 45), // -
    ("훳훳훳훳훠러훠", 46), // .
    ("훳훳훳훳훠러훠훠", 47), // /
    ("훳훳훳훳훠러훠훠훠", 48), // 0
    ("훳훳훳훳훠러훠훠훠훠", 49), // 1
    ("훳훳훳훳훳", 50), // 2
    ("훳훳훳훳훳훠", 51), // 3
    ("훳훳훳훳훳훠훠", 52), // 4
    ("훳훳훳훳훳훠훠훠", 53), // 5
    ("훳훳훳훳훳훠훠훠훠", 54), // 6
    ("훳훳훳훳훳훠훠훠훠훠", 55), // 7
    ("훳훳훳훳훳훠러훠", 56), // 8
    ("훳훳훳훳훳훠러훠훠", 57), // 9
    ("훳훳훳훳훳훠러훠훠훠", 58), // :
    ("훳훳훳훳훳훠러훠훠훠훠", 59), // ;
    ("훠러훳", 60), // <
    ("훠러훳훠", 61), // =
    ("훠러훳훠훠", 62), // >
    ("훠러훳훠훠훠", 63), // ?
    ("훠러훳훠훠훠훠", 64), // @
    ("훠러훳훠훠훠훠훠", 65), // A
    ("훠러훳훠러훠", 66), // B
    ("훠러훳훠러훠훠", 67), // C
    ("훠러훳훠러훠훠훠", 68), // D
    ("훠러훳훠러훠훠훠훠", 69), // E
    ("훠러훳훳", 70), // F
    ("훠러훳훳훠", 71), // G
    ("훠러훳훳훠훠", 72), // H
    ("훠러훳훳훠훠훠", 73), // I
    ("훠러훳훳훠훠훠훠", 74), // J
    ("훠러훳훳훠훠훠훠훠", 75), // K
    ("훠러훳훳훠러훠", 76), // L
    ("훠러훳훳훠러훠훠", 77), // M
    ("훠러훳훳훠러훠훠훠", 78), // N
    ("훠러훳훳훠러훠훠훠훠", 79), // O
    ("훠러훳훳훳", 80), // P
    ("훠러훳훳훳훠", 81), // Q
    ("훠러훳훳훳훠훠", 82), // R
    ("훠러훳훳훳훠훠훠", 83), // S
    ("훠러훳훳훳훠훠훠훠", 84), // T
    ("훠러훳훳훳훠훠훠훠훠", 85), // U
    ("훠러훳훳훳훠러훠", 86), // V
    ("훠러훳훳훳훠러훠훠", 87), // W
    ("훠러훳훳훳훠러훠훠훠", 88), // X
    ("훠러훳훳훳훠러훠훠훠훠", 89), // Y
    ("훠러훳훳훳훳", 90), // Z
    ("훠러훳훳훳훳훠", 91), // [
    ("훠러훳훳훳훳훠훠", 92), // \
    ("훠러훳훳훳훳훠훠훠", 93), // ]
    ("훠러훳훳훳훳훠훠훠훠", 94), // ^
    ("훠러훳훳훳훳훠훠훠훠훠", 95), // _
    ("훠러훳훳훳훳훠러훠", 96), // `
    ("훠러훳훳훳훳훠러훠훠", 97), // a
    ("훠러훳훳훳훳훠러훠훠훠", 98), // b
    ("훠러훳훳훳훳훠러훠훠훠훠", 99), // c
    ("허", 100), // d
    ("허훠", 101), // e
    ("허훠훠", 102), // f
    ("허훠훠훠", 103), // g
    ("허훠훠훠훠", 104), // h
    ("허훠훠훠훠훠", 105), // i
    ("허훠러훠", 106), // j
    ("허훠러훠훠", 107), // k
    ("허훠러훠훠훠", 108), // l
    ("허훠러훠훠훠훠", 109), // m
    ("허훳", 110), // n
    ("허훳훠", 111), // o
    ("허훳훠훠", 112), // p
    ("허훳훠훠훠", 113), // q
    ("허훳훠훠훠훠", 114), // r
    ("허훳훠훠훠훠훠", 115), // s
    ("허훳훠러훠", 116), // t
    ("허훳훠러훠훠", 117), // u
    ("허훳훠러훠훠훠", 118), // v
    ("허훳훠러훠훠훠훠", 119), // w
    ("허훳훳", 120), // x
    ("허훳훳훠", 121), // y
    ("허훳훳훠훠", 122), // z
    ("허훳훳훠훠훠", 123), // {
    ("허훳훳훠훠훠훠", 124), // |
    ("허훳훳훠훠훠훠훠", 125), // }
    ("허훳훳훠러훠", 126), // ~
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processor::numeral::parse_laugh;

    #[test]
    fn test_standard_entries_are_valid() {
        let table = SymbolTable::from_entries(STANDARD.iter().copied()).expect("valid entries");
        assert_eq!(&table, SymbolTable::standard());
        assert_eq!(table.len(), 96);
    }

    #[test]
    fn test_standard_entries_spell_their_codes() {
        for (glyphs, code) in STANDARD {
            assert_eq!(parse_laugh(glyphs), Some(i64::from(*code)), "entry {glyphs}");
        }
    }

    #[test]
    fn test_resolve_is_exact() {
        let table = SymbolTable::standard();
        let test_cases = vec![
            ("훠러훳훳훠훠", Some(72)),
            ("허훠", Some(101)),
            ("훳", Some(10)),
            ("허훠 ", None),
            ("허 훠", None),
            ("훠", None),
        ];

        for (glyphs, expected) in test_cases {
            assert_eq!(table.resolve(&GlyphRun::new(glyphs)), expected, "{glyphs:?}");
        }
    }

    #[test]
    fn test_extended_overrides_and_validates() {
        let base = SymbolTable::standard();
        let table = base
            .extended([("허훠", 69), ("찢찢", 0x1F600)])
            .expect("valid extension");
        assert_eq!(table.resolve(&GlyphRun::new("허훠")), Some(69));
        assert_eq!(table.resolve(&GlyphRun::new("찢찢")), Some(0x1F600));
        assert_eq!(base.resolve(&GlyphRun::new("허훠")), Some(101));

        let test_cases = vec![
            (vec![("", 65)], "Unreachable"),
            (vec![(" 허", 65)], "Unreachable"),
            (vec![("허#", 65)], "Unreachable"),
            (vec![("~", 65)], "Reserved"),
            (vec![("와타시는", 65)], "Reserved"),
            (vec![("허허허", 0xD800)], "InvalidCode"),
            (vec![("허허허", 65), ("허허허", 66)], "Duplicate"),
        ];

        for (entries, expected) in test_cases {
            let err = base.extended(entries).unwrap_err();
            assert!(format!("{err:?}").starts_with(expected), "got {err:?}");
        }
    }
}
