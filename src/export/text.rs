//! Text export implementation.
//!
//! Writes reports as box-drawing trees, one module per line.

use super::Exporter;
use crate::query::Report;
use crate::tree::TreeNode;
use std::io::{self, Write};

/// Shown when the search term matches no module with requirements.
pub const NO_DEPENDENCIES: &str = "(no dependencies found)";

/// Shown when the search term matches no required module.
pub const NO_DEPENDENTS: &str = "(no dependents found)";

/// Text exporter implementation.
pub struct TextExporter;

impl Exporter for TextExporter {
    fn export<W: Write>(&self, report: &Report, writer: &mut W) -> io::Result<()> {
        match report {
            Report::Project { root, tree } => {
                writeln!(writer, "project module: {}", root)?;
                tree.write_to(writer)
            }
            Report::Search {
                term,
                dependencies,
                dependents,
            } => {
                writeln!(writer, "# Dependencies of {}", term)?;
                write_section(writer, dependencies, NO_DEPENDENCIES)?;

                writeln!(writer)?;

                writeln!(writer, "# Dependents of {}", term)?;
                write_section(writer, dependents, NO_DEPENDENTS)
            }
        }
    }
}

fn write_section<W: Write>(writer: &mut W, trees: &[TreeNode], empty: &str) -> io::Result<()> {
    if trees.is_empty() {
        return writeln!(writer, "{}", empty);
    }

    // Only label the trees when there is more than one to tell apart
    let labelled = trees.len() > 1;
    for tree in trees {
        if labelled {
            writeln!(writer, "## {}", tree.id)?;
        }
        tree.write_to(writer)?;
    }
    Ok(())
}
