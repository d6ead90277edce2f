//! Shared data types for the application edge: the configuration file as
//! it comes out of the JSON loader, and the report handed to writers.

use serde::{Deserialize, Serialize};

use crate::processor::{Context, ControlKind, DecodeError, Options, SymbolError, SymbolTable};

/// Entire configuration file.
///
/// Every field is optional; an empty object gives the standard context.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawConfig {
    /// Entries added on top of the standard symbol table.
    pub symbols: Vec<SymbolEntry>,
    /// Start from an empty table instead of the standard one.
    pub replace_standard: bool,
    pub control_marker: ControlMarker,
    pub numeral_fallback: bool,
    pub max_steps: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SymbolEntry {
    pub glyphs: String,
    pub code: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ControlMarker {
    #[default]
    Inert,
    LineBreak,
}

impl From<ControlMarker> for ControlKind {
    fn from(marker: ControlMarker) -> Self {
        match marker {
            ControlMarker::Inert => ControlKind::Inert,
            ControlMarker::LineBreak => ControlKind::LineBreak,
        }
    }
}

impl RawConfig {
    pub fn options(&self) -> Options {
        Options {
            control: self.control_marker.into(),
            numeral_fallback: self.numeral_fallback,
            max_steps: self.max_steps,
        }
    }

    /// Builds the immutable run context this configuration describes.
    pub fn into_context(self) -> Result<Context, SymbolError> {
        let options = self.options();
        if self.symbols.is_empty() && !self.replace_standard {
            return Ok(Context::standard().with_options(options));
        }

        let entries = self.symbols.into_iter().map(|e| (e.glyphs, e.code));
        let symbols = if self.replace_standard {
            SymbolTable::from_entries(entries)?
        } else {
            SymbolTable::standard().extended(entries)?
        };
        Ok(Context::new(symbols, options))
    }
}

/// Outcome of one run, as written by the JSON writer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorReport>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorReport {
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    pub message: String,
}

impl From<&Result<String, DecodeError>> for RunReport {
    fn from(result: &Result<String, DecodeError>) -> Self {
        match result {
            Ok(output) => RunReport {
                ok: true,
                output: Some(output.clone()),
                error: None,
            },
            Err(err) => RunReport {
                ok: false,
                output: None,
                error: Some(ErrorReport {
                    kind: err.kind(),
                    line: err.line(),
                    message: err.to_string(),
                }),
            },
        }
    }
}
