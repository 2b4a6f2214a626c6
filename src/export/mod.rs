//! Export functionality for query reports.
//!
//! This module provides exporters for writing a [`Report`] in the
//! supported output formats: an indented text tree and JSON.

pub mod json;
pub mod text;

use crate::query::Report;
use std::io::{self, Write};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Box-drawing tree - human-readable
    #[default]
    Text,
    /// JSON format - machine-readable, nested trees
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "tree" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!(
                "Unknown output format: '{}'. Valid formats: text, json",
                s
            )),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Trait for exporters.
pub trait Exporter {
    /// Export the report to the given writer.
    fn export<W: Write>(&self, report: &Report, writer: &mut W) -> io::Result<()>;
}

/// Export a report in the specified format.
pub fn export<W: Write>(format: OutputFormat, report: &Report, writer: &mut W) -> io::Result<()> {
    match format {
        OutputFormat::Text => text::TextExporter.export(report, writer),
        OutputFormat::Json => json::JsonExporter.export(report, writer),
    }
}

/// Export a report to a string.
pub fn export_to_string(format: OutputFormat, report: &Report) -> io::Result<String> {
    let mut buffer = Vec::new();
    export(format, report, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::TreeNode;

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert_eq!("TREE".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!("yaml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_output_format_display() {
        assert_eq!(format!("{}", OutputFormat::Text), "text");
        assert_eq!(format!("{}", OutputFormat::Json), "json");
        assert_eq!(OutputFormat::default(), OutputFormat::Text);
    }

    #[test]
    fn test_export_to_string_dispatches() {
        let report = Report::Project {
            root: "root".to_string(),
            tree: TreeNode::new("root", false),
        };

        let text = export_to_string(OutputFormat::Text, &report).unwrap();
        assert!(text.ends_with("root\n"));

        let json = export_to_string(OutputFormat::Json, &report).unwrap();
        assert!(json.trim_start().starts_with('{'));
    }
}
