//! Output of the depth counts

use std::io::Write;
use std::str::FromStr;

use simple_error::SimpleError;

use crate::base::BoxResult;
use crate::query::{DepthCount, DepthReport};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
    Cbor,
}

impl FromStr for ReportFormat {
    type Err = SimpleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            "cbor" => Ok(ReportFormat::Cbor),
            other => Err(SimpleError::new(format!("unknown report format {}", other))),
        }
    }
}

fn write_counts<W: Write>(out: &mut W, title: &str, counts: &[DepthCount]) -> std::io::Result<()> {
    writeln!(out, "{}", title)?;
    for count in counts {
        writeln!(out, "{}", count)?;
    }
    Ok(())
}

/// Writes the report in the given format
pub fn write_report<W: Write>(report: &DepthReport, format: ReportFormat, mut out: W) -> BoxResult<()> {
    match format {
        ReportFormat::Text => {
            write_counts(
                &mut out,
                "The number of users who watched at least the number of videos:",
                &report.at_least,
            )?;
            write_counts(
                &mut out,
                "Number of users who watched exactly the number of videos:",
                &report.exactly,
            )?;
        }
        ReportFormat::Json => {
            serde_json::to_writer_pretty(&mut out, report)?;
            writeln!(out)?;
        }
        ReportFormat::Cbor => ciborium::ser::into_writer(report, &mut out)?,
    }
    out.flush()?;
    Ok(())
}
