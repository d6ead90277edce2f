//! Parsed program, before it is executed.

use std::fmt;

/// Token content of one character line. Compared by exact string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GlyphRun(String);

impl GlyphRun {
    pub fn new(glyphs: impl Into<String>) -> Self {
        Self(glyphs.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GlyphRun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A glyph run together with the source line it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharLine {
    pub line: usize,
    pub run: GlyphRun,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordGroup {
    pub lines: Vec<CharLine>,
}

/// Selected by the end marker that closes an utterance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// `한다는 것이야`: every line prints one character.
    Char,
    /// `이라는 것이야`: every line prints a decimal number.
    Numeric,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    /// Checked for placement only.
    Inert,
    /// Ends the utterance's output with a newline.
    LineBreak,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlAnnotation {
    pub line: usize,
    pub kind: ControlKind,
}

/// `와타시는 … 한다는 것이야` with its word groups in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Utterance {
    /// Line of the start marker.
    pub line: usize,
    pub groups: Vec<WordGroup>,
    pub control: Option<ControlAnnotation>,
    pub mode: OutputMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Eq,
    Gt,
    Lt,
}

/// Compares the current register against `value`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Condition {
    pub op: Comparison,
    pub value: i64,
}

impl Condition {
    pub fn holds(&self, current: i64) -> bool {
        match self.op {
            Comparison::Eq => current == self.value,
            Comparison::Gt => current > self.value,
            Comparison::Lt => current < self.value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    Number(i64),
    Register(usize),
}

/// One instruction of the flattened program. Blocks are resolved to jump
/// targets (indexes into [`Program::code`]) by the block parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt {
    Utter(Utterance),

    /// A bare register name makes it the current register.
    Select { line: usize, register: usize },

    /// `하요하요 [n]` and `바요바요`.
    Set { line: usize, value: i64 },

    /// `누이 좋고 [n]`
    Add { line: usize, delta: i64 },

    /// `매부 좋고 [n]`
    Sub { line: usize, delta: i64 },

    /// `아주 좋고 <register | n>`
    Mul { line: usize, by: Operand },

    /// `건방진` and `좋다좋다`: falls through while `condition` holds,
    /// continues at `target` otherwise.
    Branch {
        line: usize,
        condition: Condition,
        target: usize,
    },

    /// Continues at `target`. Skips the else branch at `정신이 나갔어 정신이`
    /// and loops back from the `쉐끼마` closing a `좋다좋다`.
    Jump { line: usize, target: usize },
}

/// A whole parsed program.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    pub code: Vec<Stmt>,
}

impl Program {
    /// Utterances in source order, including those inside blocks.
    pub fn utterances(&self) -> Vec<&Utterance> {
        self.code
            .iter()
            .filter_map(|stmt| match stmt {
                Stmt::Utter(u) => Some(u),
                _ => None,
            })
            .collect()
    }
}
