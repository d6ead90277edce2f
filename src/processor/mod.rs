//! The functional core: source text in, decoded output out.
//!
//! Passes run strictly in order: preprocess, parse, execute. Nothing is
//! kept between runs except the immutable [`Context`].
pub mod ast;
pub mod block_parser;
pub mod error;
pub mod lexer;
pub mod numeral;
pub mod preprocess;
pub mod registers;
pub mod symbols;
pub mod vm;

pub use ast::{ControlKind, GlyphRun, OutputMode, Program};
pub use error::DecodeError;
pub use symbols::{SymbolError, SymbolTable};

use std::borrow::Cow;
use tracing::debug;

/// Knobs that change how a program is decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// Meaning given to the control marker.
    pub control: ControlKind,
    /// Accept unlisted glyph runs that read as numbers.
    pub numeral_fallback: bool,
    /// Upper bound on executed statements and loop iterations.
    pub max_steps: Option<u64>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            control: ControlKind::Inert,
            numeral_fallback: false,
            max_steps: None,
        }
    }
}

/// Everything a run reads: the symbol table and the options.
///
/// Build it once and reuse it; it is never mutated by a run and can be
/// shared between threads.
#[derive(Debug, Clone)]
pub struct Context {
    symbols: Cow<'static, SymbolTable>,
    options: Options,
}

impl Default for Context {
    fn default() -> Self {
        Self::standard()
    }
}

impl Context {
    /// Standard symbol table, default options.
    pub fn standard() -> Self {
        Self {
            symbols: Cow::Borrowed(SymbolTable::standard()),
            options: Options::default(),
        }
    }

    pub fn new(symbols: SymbolTable, options: Options) -> Self {
        Self {
            symbols: Cow::Owned(symbols),
            options,
        }
    }

    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Preprocess, parse and execute `source`.
    pub fn run(&self, source: &str) -> Result<String, DecodeError> {
        let lines = preprocess::preprocess(source);
        debug!(lines = lines.len(), "preprocessed source");

        let program = block_parser::parse_program(&lines, self.options.control)?;
        vm::execute(&program, &self.symbols, &self.options)
    }

    /// Like [`Context::run`] for input that has not been checked to be text.
    pub fn run_bytes(&self, bytes: &[u8]) -> Result<String, DecodeError> {
        self.run(preprocess::decode_source(bytes)?)
    }
}

/// Runs `source` with the standard context.
pub fn run(source: &str) -> Result<String, DecodeError> {
    Context::standard().run(source)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HELLO: &str = "\
와타시는
훠러훳훳훠훠           # H
허훠                   # e
허훠러훠훠훠           # l
허훠러훠훠훠           # l
허훳훠                 # o
훳훳훳훳훠훠훠훠       # ,
훳훳훳훠훠             # space
~
훠러훳훳훳훠러훠훠     # W
허훳훠                 # o
허훳훠훠훠훠           # r
허훠러훠훠훠           # l
허                     # d
훳훳훳훠훠훠           # !
한다는 것이야
";

    #[test]
    fn test_hello_world() {
        assert_eq!(run(HELLO), Ok("Hello, World!".to_string()));
    }

    #[test]
    fn test_run_is_repeatable() {
        let ctx = Context::standard();
        let first = ctx.run(HELLO);
        let second = ctx.run(HELLO);
        assert_eq!(first, second);

        let bad = "와타시는\n허훠";
        assert_eq!(ctx.run(bad), ctx.run(bad));
    }

    #[test]
    fn test_unknown_pattern_yields_no_output() {
        let src = HELLO.replace("허훳훠훠훠훠           # r", "훠훠훠훠훠훠");
        assert_eq!(
            run(&src),
            Err(DecodeError::UnknownGlyphPattern {
                line: 12,
                glyphs: "훠훠훠훠훠훠".into(),
            })
        );
    }

    #[test]
    fn test_comment_does_not_change_output() {
        let plain = "와타시는\n허훠\n한다는 것이야";
        let commented = "와타시는\n허훠 # explanatory text\n한다는 것이야";
        assert_eq!(run(plain), run(commented));
        assert_eq!(run(commented), Ok("e".into()));
    }

    #[test]
    fn test_run_bytes() {
        let ctx = Context::standard();
        assert_eq!(ctx.run_bytes(HELLO.as_bytes()), Ok("Hello, World!".into()));
        assert!(matches!(
            ctx.run_bytes(b"\xe5\x00"),
            Err(DecodeError::InputEncoding(_))
        ));
    }

    #[test]
    fn test_custom_table() {
        let symbols = SymbolTable::from_entries([("하", 0x48), ("하하", 0x69)]).expect("valid");
        let ctx = Context::new(symbols, Options::default());
        assert_eq!(ctx.run("와타시는\n하\n하하\n한다는 것이야"), Ok("Hi".into()));
        assert!(ctx.run("와타시는\n허훠\n한다는 것이야").is_err());
    }

    #[test]
    fn test_context_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Context>();

        let ctx = Context::standard();
        let outputs: Vec<_> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..4).map(|_| s.spawn(|| ctx.run(HELLO))).collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        assert!(outputs.iter().all(|o| o.as_deref() == Ok("Hello, World!")));
    }
}
