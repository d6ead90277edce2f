//! JSON report of a run, for tools driving the decoder.

use std::io::Write;

use anyhow::Result;

use crate::model::RunReport;
use crate::processor::DecodeError;

pub fn emit<W: Write>(result: &Result<String, DecodeError>, out: &mut W) -> Result<()> {
    let report = RunReport::from(result);
    serde_json::to_writer_pretty(&mut *out, &report)?;
    writeln!(out)?;
    Ok(())
}
