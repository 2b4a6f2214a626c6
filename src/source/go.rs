//! Go toolchain backed graph source.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use super::{GraphSource, SourceError, SourceResult};
use crate::parser::{parse_edges, parse_module_list, Edge};

const MOD_GRAPH_ARGS: &[&str] = &["mod", "graph"];
const INDIRECT_ARGS: &[&str] = &[
    "list",
    "-mod=readonly",
    "-m",
    "-f",
    "{{if .Indirect}}{{.Path}}{{end}}",
    "all",
];
const ROOT_ARGS: &[&str] = &["list", "-m"];

/// Runs the `go` command in a project directory.
///
/// Each call is a single blocking invocation whose output is fully
/// buffered. Nothing is cached between calls.
#[derive(Debug, Clone)]
pub struct GoToolchain {
    binary: PathBuf,
    workdir: PathBuf,
}

impl GoToolchain {
    /// Name of the toolchain binary looked up on `PATH` by default.
    pub const DEFAULT_BINARY: &'static str = "go";

    /// Creates a toolchain runner for the module in `workdir`.
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            binary: PathBuf::from(Self::DEFAULT_BINARY),
            workdir: workdir.into(),
        }
    }

    /// Uses a specific `go` executable instead of the one on `PATH`.
    pub fn with_binary(mut self, binary: impl Into<PathBuf>) -> Self {
        self.binary = binary.into();
        self
    }

    /// The directory commands run in.
    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    fn describe(&self, args: &[&str]) -> String {
        let mut command = self.binary.display().to_string();
        for arg in args {
            command.push(' ');
            command.push_str(arg);
        }
        command
    }

    fn run(&self, args: &[&str]) -> SourceResult<String> {
        let command = self.describe(args);
        debug!(%command, workdir = %self.workdir.display(), "running go toolchain");

        let output = Command::new(&self.binary)
            .args(args)
            .current_dir(&self.workdir)
            .output()
            .map_err(|source| SourceError::Spawn {
                command: command.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(SourceError::Failed {
                command,
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stdout = String::from_utf8(output.stdout).map_err(|source| {
            SourceError::InvalidOutput {
                command: command.clone(),
                source,
            }
        })?;

        debug!(%command, bytes = stdout.len(), "go toolchain finished");
        Ok(stdout)
    }
}

impl GraphSource for GoToolchain {
    fn edges(&self) -> SourceResult<Vec<Edge>> {
        self.run(MOD_GRAPH_ARGS).map(|out| parse_edges(&out))
    }

    fn indirect_modules(&self) -> SourceResult<HashSet<String>> {
        self.run(INDIRECT_ARGS).map(|out| parse_module_list(&out))
    }

    fn root_module(&self) -> SourceResult<String> {
        let out = self.run(ROOT_ARGS)?;

        // In a workspace `go list -m` prints every module; the first is the main one
        out.lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .map(str::to_string)
            .ok_or_else(|| SourceError::EmptyRoot {
                command: self.describe(ROOT_ARGS),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_command() {
        let go = GoToolchain::new(".");
        assert_eq!(go.describe(MOD_GRAPH_ARGS), "go mod graph");
        assert_eq!(go.describe(ROOT_ARGS), "go list -m");
    }

    #[test]
    fn test_with_binary() {
        let go = GoToolchain::new("/tmp").with_binary("/opt/go/bin/go");
        assert_eq!(go.describe(ROOT_ARGS), "/opt/go/bin/go list -m");
        assert_eq!(go.workdir(), Path::new("/tmp"));
    }

    #[test]
    fn test_missing_binary_is_spawn_error() {
        let go = GoToolchain::new(".").with_binary("/nonexistent/modtree-test-go");
        let err = go.edges().unwrap_err();
        assert!(matches!(err, SourceError::Spawn { .. }));
        assert!(err.to_string().contains("go mod graph"));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_zero_exit_is_failure() {
        let go = GoToolchain::new(".").with_binary("false");
        let err = go.root_module().unwrap_err();
        assert!(matches!(err, SourceError::Failed { .. }));
    }
}
