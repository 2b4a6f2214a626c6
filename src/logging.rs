//! Logging setup for the modtree CLI.
//!
//! Diagnostics are emitted through `tracing` and written to stderr, so the
//! tree printed on stdout can be piped without noise.
//!
//! The filter is chosen in this order:
//! 1. `--verbose`: `modtree=debug`
//! 2. `--quiet`: `modtree=error`
//! 3. `RUST_LOG`, when set
//! 4. Default: `modtree=warn`

use std::io::IsTerminal;

use tracing_subscriber::EnvFilter;

/// Verbosity requested on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Errors only
    Quiet,
    /// Warnings, unless `RUST_LOG` says otherwise
    #[default]
    Normal,
    /// Debug events from this crate
    Verbose,
}

impl Verbosity {
    /// Resolves `--verbose` / `--quiet`; verbose wins when both are given.
    pub fn from_flags(verbose: bool, quiet: bool) -> Self {
        if verbose {
            Verbosity::Verbose
        } else if quiet {
            Verbosity::Quiet
        } else {
            Verbosity::Normal
        }
    }

    /// The filter directive for this verbosity, ignoring the environment.
    pub fn directive(&self) -> &'static str {
        match self {
            Verbosity::Quiet => "modtree=error",
            Verbosity::Normal => "modtree=warn",
            Verbosity::Verbose => "modtree=debug",
        }
    }

    fn filter(&self) -> EnvFilter {
        match self {
            Verbosity::Normal => EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(self.directive())),
            _ => EnvFilter::new(self.directive()),
        }
    }
}

/// Initialize the global tracing subscriber.
///
/// Call once at startup. Later calls are ignored, which keeps tests that
/// initialize logging more than once from panicking.
pub fn init_logging(verbosity: Verbosity) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(verbosity.filter())
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal())
        .compact()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_from_flags() {
        assert_eq!(Verbosity::from_flags(false, false), Verbosity::Normal);
        assert_eq!(Verbosity::from_flags(true, false), Verbosity::Verbose);
        assert_eq!(Verbosity::from_flags(false, true), Verbosity::Quiet);
        assert_eq!(Verbosity::from_flags(true, true), Verbosity::Verbose);
    }

    #[test]
    fn test_directive() {
        assert_eq!(Verbosity::Quiet.directive(), "modtree=error");
        assert_eq!(Verbosity::Normal.directive(), "modtree=warn");
        assert_eq!(Verbosity::Verbose.directive(), "modtree=debug");
    }

    #[test]
    fn test_init_logging_twice_does_not_panic() {
        init_logging(Verbosity::Quiet);
        init_logging(Verbosity::Verbose);
    }
}
