//! JSON export implementation.
//!
//! Exports query reports in JSON format for machine-readable output. Each
//! tree is a pre-order list of nodes with their `depth`, so arbitrarily deep
//! trees stay flat; nodes that were not expanded carry a `stop` reason.

use super::Exporter;
use crate::query::Report;
use std::io::{self, Write};

/// JSON exporter implementation.
pub struct JsonExporter;

impl Exporter for JsonExporter {
    fn export<W: Write>(&self, report: &Report, writer: &mut W) -> io::Result<()> {
        let json = serde_json::to_string_pretty(report)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        writeln!(writer, "{}", json)
    }
}
