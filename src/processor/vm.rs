//! Decoder/executor: walks a parsed program and builds its output.
//!
//! Output is collected into a private buffer and handed back only when the
//! whole program ran. A failed run returns the error and nothing else.

use tracing::{debug, trace};

use super::Options;
use super::ast::*;
use super::error::DecodeError;
use super::numeral::parse_number;
use super::registers;
use super::symbols::SymbolTable;

pub fn execute(
    program: &Program,
    symbols: &SymbolTable,
    options: &Options,
) -> Result<String, DecodeError> {
    let mut machine = Machine::new(symbols, options);
    machine.run(&program.code)?;
    debug!(
        chars = machine.out.chars().count(),
        steps = machine.steps,
        "program finished"
    );
    Ok(machine.out)
}

struct Machine<'c> {
    symbols: &'c SymbolTable,
    options: &'c Options,
    regs: [i64; registers::COUNT],
    current: usize,
    out: String,
    steps: u64,
}

impl<'c> Machine<'c> {
    fn new(symbols: &'c SymbolTable, options: &'c Options) -> Self {
        Self {
            symbols,
            options,
            regs: [0; registers::COUNT],
            current: registers::DEFAULT,
            out: String::new(),
            steps: 0,
        }
    }

    fn tick(&mut self) -> Result<(), DecodeError> {
        self.steps += 1;
        match self.options.max_steps {
            Some(limit) if self.steps > limit => Err(DecodeError::StepLimitExceeded { limit }),
            _ => Ok(()),
        }
    }

    fn run(&mut self, code: &[Stmt]) -> Result<(), DecodeError> {
        let mut pc = 0;
        while let Some(stmt) = code.get(pc) {
            self.tick()?;
            pc = match stmt {
                Stmt::Branch {
                    condition, target, ..
                } => {
                    if condition.holds(self.regs[self.current]) {
                        pc + 1
                    } else {
                        *target
                    }
                }
                Stmt::Jump { target, .. } => *target,
                _ => {
                    self.stmt(stmt)?;
                    pc + 1
                }
            };
        }
        Ok(())
    }

    fn stmt(&mut self, stmt: &Stmt) -> Result<(), DecodeError> {
        match stmt {
            Stmt::Utter(utterance) => self.utter(utterance)?,
            Stmt::Select { register, .. } => self.current = *register,
            Stmt::Set { value, .. } => self.regs[self.current] = *value,
            Stmt::Add { line, delta } => {
                self.update(*line, |v| v.checked_add(*delta))?;
            }
            Stmt::Sub { line, delta } => {
                self.update(*line, |v| v.checked_sub(*delta))?;
            }
            Stmt::Mul { line, by } => {
                let rhs = match *by {
                    Operand::Number(n) => n,
                    Operand::Register(r) => self.regs[r],
                };
                self.update(*line, |v| v.checked_mul(rhs))?;
            }
            Stmt::Branch { .. } | Stmt::Jump { .. } => {}
        }

        Ok(())
    }

    fn update<F>(&mut self, line: usize, op: F) -> Result<(), DecodeError>
    where
        F: FnOnce(i64) -> Option<i64>,
    {
        let value = op(self.regs[self.current]).ok_or(DecodeError::Overflow { line })?;
        self.regs[self.current] = value;
        Ok(())
    }

    fn utter(&mut self, utterance: &Utterance) -> Result<(), DecodeError> {
        trace!(line = utterance.line, mode = ?utterance.mode, "decoding utterance");

        for (i, group) in utterance.groups.iter().enumerate() {
            // numbers of separate word groups must not run together
            if i > 0 && utterance.mode == OutputMode::Numeric {
                self.out.push(' ');
            }
            for char_line in &group.lines {
                match utterance.mode {
                    OutputMode::Char => {
                        let c = self.character(char_line)?;
                        self.out.push(c);
                    }
                    OutputMode::Numeric => {
                        let n = self.number(char_line)?;
                        self.out.push_str(&n.to_string());
                    }
                }
            }
        }

        if let Some(ControlAnnotation {
            kind: ControlKind::LineBreak,
            ..
        }) = utterance.control
        {
            self.out.push('\n');
        }

        Ok(())
    }

    fn character(&self, char_line: &CharLine) -> Result<char, DecodeError> {
        if let Some(c) = self.symbols.resolve(&char_line.run).and_then(char::from_u32) {
            return Ok(c);
        }
        self.fallback(char_line)
            .map(|v| char::from(v.rem_euclid(256) as u8))
            .ok_or_else(|| unknown(char_line))
    }

    fn number(&self, char_line: &CharLine) -> Result<i64, DecodeError> {
        if let Some(register) = registers::lookup(char_line.run.as_str()) {
            return Ok(self.regs[register]);
        }
        if let Some(code) = self.symbols.resolve(&char_line.run) {
            return Ok(i64::from(code));
        }
        self.fallback(char_line).ok_or_else(|| unknown(char_line))
    }

    fn fallback(&self, char_line: &CharLine) -> Option<i64> {
        if self.options.numeral_fallback {
            parse_number(char_line.run.as_str())
        } else {
            None
        }
    }
}

fn unknown(char_line: &CharLine) -> DecodeError {
    DecodeError::UnknownGlyphPattern {
        line: char_line.line,
        glyphs: char_line.run.to_string(),
    }
}
