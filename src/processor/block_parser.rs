//! Block parser: groups logical lines into utterances and statements.
//
//  Utterance states:
//
//      Idle        --start-->      InUtterance
//      InUtterance --text-->       InWordGroup   (append glyph run)
//      InWordGroup --text-->       InWordGroup
//      InWordGroup --separator-->  InUtterance   (close word group)
//      In*         --control-->    same state    (once, right before end)
//      In*         --end-->        Idle
//
//  Anything else is a malformed block. Outside utterances, text lines are
//  register-machine statements. IF/WHILE blocks nest but are emitted flat:
//  the opener becomes a Branch, ELSE and the END of a loop become Jumps, and
//  their targets are patched when the block closes.

use tracing::{debug, trace};

use super::ast::*;
use super::error::DecodeError;
use super::lexer::{Lexer, Token};
use super::numeral::parse_number;
use super::preprocess::LogicalLine;
use super::registers;

pub const KW_SET: &str = "하요하요";
pub const KW_RESET: &str = "바요바요";
pub const KW_ADD: &str = "누이 좋고";
pub const KW_SUB: &str = "매부 좋고";
pub const KW_MUL: &str = "아주 좋고";
pub const KW_IF: &str = "건방진";
pub const KW_ELSE: &str = "정신이 나갔어 정신이";
pub const KW_WHILE: &str = "좋다좋다";
pub const KW_END: &str = "쉐끼마";

pub const CMP_GT: &str = "응나멘똔";
pub const CMP_LT: &str = "응너도혁";

/// Parses preprocessed lines into a [`Program`].
pub fn parse_program(lines: &[LogicalLine], control: ControlKind) -> Result<Program, DecodeError> {
    let program = Parser::new(lines, control).parse()?;
    debug!(
        instructions = program.code.len(),
        utterances = program.utterances().len(),
        "parsed program"
    );
    Ok(program)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,
    InUtterance,
    InWordGroup,
}

struct OpenUtterance {
    line: usize,
    groups: Vec<WordGroup>,
    current: WordGroup,
    control: Option<ControlAnnotation>,
}

impl OpenUtterance {
    fn new(line: usize) -> Self {
        Self {
            line,
            groups: Vec::new(),
            current: WordGroup::default(),
            control: None,
        }
    }

    fn close_group(&mut self) {
        let group = std::mem::take(&mut self.current);
        if !group.lines.is_empty() {
            self.groups.push(group);
        }
    }

    fn finish(mut self, mode: OutputMode) -> Utterance {
        self.close_group();
        Utterance {
            line: self.line,
            groups: self.groups,
            control: self.control,
            mode,
        }
    }
}

/// An open IF or WHILE, by the index of its opening instruction.
enum Frame {
    If {
        line: usize,
        branch: usize,
        skip_else: Option<usize>,
    },
    While {
        line: usize,
        head: usize,
    },
}

impl Frame {
    fn line(&self) -> usize {
        match self {
            Frame::If { line, .. } | Frame::While { line, .. } => *line,
        }
    }
}

/// Points the `Branch` or `Jump` at `at` to `to`.
fn patch(code: &mut [Stmt], at: usize, to: usize) {
    if let Some(Stmt::Branch { target, .. } | Stmt::Jump { target, .. }) = code.get_mut(at) {
        *target = to;
    }
}

struct Parser<'a> {
    lex: Lexer<'a>,
    control: ControlKind,
    state: State,
    open: Option<OpenUtterance>,
    frames: Vec<Frame>,
    code: Vec<Stmt>,
}

impl<'a> Parser<'a> {
    fn new(lines: &'a [LogicalLine], control: ControlKind) -> Self {
        Self {
            lex: Lexer::new(lines),
            control,
            state: State::Idle,
            open: None,
            frames: Vec::new(),
            code: Vec::new(),
        }
    }

    fn parse(mut self) -> Result<Program, DecodeError> {
        while let Some((line, token)) = self.lex.next() {
            self.step(line, token)?;
        }

        if let Some(open) = &self.open {
            return Err(DecodeError::UnterminatedUtterance { line: open.line });
        }
        if let Some(frame) = self.frames.last() {
            return Err(DecodeError::UnclosedBlock { line: frame.line() });
        }

        Ok(Program { code: self.code })
    }

    fn step(&mut self, line: usize, token: Token<'a>) -> Result<(), DecodeError> {
        let reject = || DecodeError::MalformedBlock {
            line,
            found: token.as_str().to_string(),
        };

        match (self.state, token) {
            (State::Idle, Token::Start) => {
                self.open = Some(OpenUtterance::new(line));
                self.state = State::InUtterance;
            }
            (State::Idle, Token::Text(text)) => self.statement(line, text)?,
            (State::Idle, _) => return Err(reject()),

            (_, Token::Start) => return Err(reject()),
            (State::InUtterance, Token::Separator) => return Err(reject()),

            (_, Token::Text(text)) => {
                let open = self.open.as_mut().ok_or_else(reject)?;
                if open.control.is_some() {
                    return Err(reject());
                }
                open.current.lines.push(CharLine {
                    line,
                    run: GlyphRun::new(text),
                });
                self.state = State::InWordGroup;
            }
            (State::InWordGroup, Token::Separator) => {
                let open = self.open.as_mut().ok_or_else(reject)?;
                if open.control.is_some() {
                    return Err(reject());
                }
                open.close_group();
                self.state = State::InUtterance;
            }
            (_, Token::Control) => {
                let open = self.open.as_mut().ok_or_else(reject)?;
                if open.control.is_some() {
                    return Err(reject());
                }
                open.control = Some(ControlAnnotation {
                    line,
                    kind: self.control,
                });
            }
            (_, Token::End(mode)) => {
                let open = self.open.take().ok_or_else(reject)?;
                let utterance = open.finish(mode);
                trace!(
                    line = utterance.line,
                    groups = utterance.groups.len(),
                    "closed utterance"
                );
                self.emit(Stmt::Utter(utterance));
                self.state = State::Idle;
            }
        }

        Ok(())
    }

    /// A text line outside any utterance.
    fn statement(&mut self, line: usize, text: &str) -> Result<(), DecodeError> {
        if let Some(register) = registers::lookup(text) {
            self.emit(Stmt::Select { line, register });
        } else if let Some(rest) = text.strip_prefix(KW_IF) {
            let condition = condition(line, rest)?;
            let branch = self.emit(Stmt::Branch {
                line,
                condition,
                target: 0,
            });
            self.frames.push(Frame::If {
                line,
                branch,
                skip_else: None,
            });
        } else if text == KW_ELSE {
            let Some(Frame::If {
                branch, skip_else, ..
            }) = self.frames.last_mut()
            else {
                return Err(malformed(line, text));
            };
            if skip_else.is_some() {
                return Err(malformed(line, text));
            }
            let jump = self.code.len();
            self.code.push(Stmt::Jump { line, target: 0 });
            patch(&mut self.code, *branch, jump + 1);
            *skip_else = Some(jump);
        } else if let Some(rest) = text.strip_prefix(KW_WHILE) {
            let condition = condition(line, rest)?;
            let head = self.emit(Stmt::Branch {
                line,
                condition,
                target: 0,
            });
            self.frames.push(Frame::While { line, head });
        } else if text == KW_END {
            let frame = self.frames.pop().ok_or_else(|| malformed(line, text))?;
            match frame {
                Frame::If {
                    branch,
                    skip_else: None,
                    ..
                } => {
                    let end = self.code.len();
                    patch(&mut self.code, branch, end);
                }
                Frame::If {
                    skip_else: Some(jump),
                    ..
                } => {
                    let end = self.code.len();
                    patch(&mut self.code, jump, end);
                }
                Frame::While { head, .. } => {
                    let back = self.emit(Stmt::Jump { line, target: head });
                    patch(&mut self.code, head, back + 1);
                }
            }
        } else if let Some(rest) = text.strip_prefix(KW_SET) {
            let value = number_or(line, rest, 0)?;
            self.emit(Stmt::Set { line, value });
        } else if text == KW_RESET {
            self.emit(Stmt::Set { line, value: 0 });
        } else if let Some(rest) = text.strip_prefix(KW_ADD) {
            let delta = number_or(line, rest, 1)?;
            self.emit(Stmt::Add { line, delta });
        } else if let Some(rest) = text.strip_prefix(KW_SUB) {
            let delta = number_or(line, rest, 1)?;
            self.emit(Stmt::Sub { line, delta });
        } else if let Some(rest) = text.strip_prefix(KW_MUL) {
            let by = operand(line, rest, text)?;
            self.emit(Stmt::Mul { line, by });
        } else {
            return Err(malformed(line, text));
        }
        Ok(())
    }

    /// Appends `stmt` and returns its index.
    fn emit(&mut self, stmt: Stmt) -> usize {
        self.code.push(stmt);
        self.code.len() - 1
    }
}

fn malformed(line: usize, text: &str) -> DecodeError {
    DecodeError::MalformedBlock {
        line,
        found: text.to_string(),
    }
}

fn invalid(line: usize, operand: &str) -> DecodeError {
    DecodeError::InvalidOperand {
        line,
        operand: operand.to_string(),
    }
}

fn number_or(line: usize, rest: &str, default: i64) -> Result<i64, DecodeError> {
    let rest = rest.trim();
    if rest.is_empty() {
        return Ok(default);
    }
    parse_number(rest).ok_or_else(|| invalid(line, rest))
}

fn operand(line: usize, rest: &str, text: &str) -> Result<Operand, DecodeError> {
    let rest = rest.trim();
    if rest.is_empty() {
        return Err(invalid(line, text));
    }
    if let Some(register) = registers::lookup(rest) {
        return Ok(Operand::Register(register));
    }
    parse_number(rest)
        .map(Operand::Number)
        .ok_or_else(|| invalid(line, rest))
}

/// `<n> [응나멘똔 | 응너도혁]`, equality when no comparator is given.
fn condition(line: usize, rest: &str) -> Result<Condition, DecodeError> {
    let mut parts = rest.split_whitespace();

    let raw = parts.next().ok_or_else(|| invalid(line, rest))?;
    let value = parse_number(raw).ok_or_else(|| invalid(line, raw))?;

    let op = match parts.next() {
        None => Comparison::Eq,
        Some(CMP_GT) => Comparison::Gt,
        Some(CMP_LT) => Comparison::Lt,
        Some(other) => return Err(invalid(line, other)),
    };

    if let Some(extra) = parts.next() {
        return Err(invalid(line, extra));
    }

    Ok(Condition { op, value })
}
