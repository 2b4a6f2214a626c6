use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use modtree::cli::Cli;
use modtree::export;
use modtree::logging::init_logging;
use modtree::query::run_query;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbosity());

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let source = cli.toolchain();
    let report = run_query(&source, &cli.query_options())
        .with_context(|| format!("failed to load module graph in {}", cli.path.display()))?;

    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());
    export::export(cli.format, &report, &mut writer).context("failed to write output")?;
    writer.flush().context("failed to write output")?;
    Ok(())
}
