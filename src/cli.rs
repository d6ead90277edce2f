use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// MentonLang source file
    pub input: PathBuf,
    /// JSON configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// How to write the result
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    pub format: Format,
    /// Log pipeline progress to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    /// Decoded output only
    Text,
    /// A JSON report with either the output or the error
    Json,
}
