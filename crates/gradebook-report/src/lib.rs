//! gradebook-report — turn report values into terminal output.
//!
//! Every report type from `gradebook_core::report` implements [`Render`],
//! and [`write_report`] picks the layout from an [`OutputFormat`].

use std::io::Write;

use anyhow::Result;
use serde::Serialize;

use gradebook_core::OutputFormat;

pub mod classic;
pub mod json;
pub mod table;

/// A report that can be laid out as a console table or in the classic
/// fixed-width format.
pub trait Render: Serialize {
    fn to_table(&self) -> String;
    fn to_classic(&self) -> String;
}

/// Render `report` in `format` and write it to `out`.
pub fn write_report<R: Render + ?Sized>(
    report: &R,
    format: OutputFormat,
    out: &mut dyn Write,
) -> Result<()> {
    let text = match format {
        OutputFormat::Table => report.to_table(),
        OutputFormat::Classic => report.to_classic(),
        OutputFormat::Json => json::to_json(report)?,
    };
    out.write_all(text.as_bytes())?;
    if !text.ends_with('\n') {
        out.write_all(b"\n")?;
    }
    Ok(())
}

/// Format an average the way the original reports did: always with a
/// fractional part (`85.0`), otherwise the shortest exact representation.
pub fn format_average(average: f64) -> String {
    if average.is_finite() && average.fract() == 0.0 {
        format!("{average:.1}")
    } else {
        format!("{average}")
    }
}

/// Message printed when a student id is not in the store.
pub const NO_SUCH_STUDENT: &str = "No such student.";
