//! Renders a run's result for the terminal.
pub mod json;
pub mod text;
