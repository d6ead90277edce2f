//! Errors produced by one decoder run.

use std::str::Utf8Error;
use thiserror::Error;

/// Every way a single `run` can fail.
///
/// Errors are local to one invocation. None of them is recovered
/// internally: the caller shows it and the user edits the source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("source is not valid UTF-8 text: {0}")]
    InputEncoding(#[from] Utf8Error),

    #[error("line {line}: `{found}` is not allowed here")]
    MalformedBlock { line: usize, found: String },

    #[error("utterance opened at line {line} is never closed")]
    UnterminatedUtterance { line: usize },

    #[error("line {line}: no character is assigned to glyph run `{glyphs}`")]
    UnknownGlyphPattern { line: usize, glyphs: String },

    #[error("block opened at line {line} has no matching end")]
    UnclosedBlock { line: usize },

    #[error("line {line}: invalid operand `{operand}`")]
    InvalidOperand { line: usize, operand: String },

    #[error("line {line}: arithmetic overflow")]
    Overflow { line: usize },

    #[error("step limit of {limit} exceeded")]
    StepLimitExceeded { limit: u64 },
}

impl DecodeError {
    /// Source line the error points at, when it has one.
    pub fn line(&self) -> Option<usize> {
        match self {
            DecodeError::MalformedBlock { line, .. }
            | DecodeError::UnterminatedUtterance { line }
            | DecodeError::UnknownGlyphPattern { line, .. }
            | DecodeError::UnclosedBlock { line }
            | DecodeError::InvalidOperand { line, .. }
            | DecodeError::Overflow { line } => Some(*line),
            DecodeError::InputEncoding(_) | DecodeError::StepLimitExceeded { .. } => None,
        }
    }

    /// Short machine-readable name, used by the JSON report.
    pub fn kind(&self) -> &'static str {
        match self {
            DecodeError::InputEncoding(_) => "input_encoding",
            DecodeError::MalformedBlock { .. } => "malformed_block",
            DecodeError::UnterminatedUtterance { .. } => "unterminated_utterance",
            DecodeError::UnknownGlyphPattern { .. } => "unknown_glyph_pattern",
            DecodeError::UnclosedBlock { .. } => "unclosed_block",
            DecodeError::InvalidOperand { .. } => "invalid_operand",
            DecodeError::Overflow { .. } => "overflow",
            DecodeError::StepLimitExceeded { .. } => "step_limit_exceeded",
        }
    }
}
