//! Command line interface definition.

use clap::Parser;
use std::path::PathBuf;

use crate::export::OutputFormat;
use crate::logging::Verbosity;
use crate::query::QueryOptions;
use crate::source::GoToolchain;

#[derive(Debug, Parser)]
#[command(name = "modtree")]
#[command(author = "Zachary Woods <143150513+zach-fau@users.noreply.github.com>")]
#[command(version)]
#[command(about = "Print a Go module dependency graph as a tree", long_about = None)]
pub struct Cli {
    /// Path to the Go module to inspect
    #[arg(long, default_value = ".")]
    pub path: PathBuf,

    /// Show what the given module requires and what requires it
    /// (bare `pkg/foo` or versioned `pkg/foo@v1.2.3`)
    #[arg(long, default_value = "")]
    pub search: String,

    /// Mark indirect dependencies with "(Indirect)"
    #[arg(long)]
    pub color: bool,

    /// Maximum depth of the project tree (0 means unlimited; ignored with --search)
    #[arg(long, default_value_t = 0)]
    pub depth: usize,

    /// Go toolchain executable
    #[arg(long, env = "MODTREE_GO", default_value = GoToolchain::DEFAULT_BINARY)]
    pub go: PathBuf,

    /// Output format: text or json
    #[arg(long, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Print debug logs to stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Only print errors to stderr
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Cli {
    /// The query described by the flags.
    pub fn query_options(&self) -> QueryOptions {
        QueryOptions {
            search: Some(self.search.clone()).filter(|term| !term.is_empty()),
            max_depth: self.depth,
            annotate_indirect: self.color,
        }
    }

    /// The toolchain runner described by the flags.
    pub fn toolchain(&self) -> GoToolchain {
        GoToolchain::new(&self.path).with_binary(&self.go)
    }

    /// The requested log verbosity.
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.verbose, self.quiet)
    }
}
