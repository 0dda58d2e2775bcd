use std::path::PathBuf;

use crate::cli::Cli;

/// Everything a command needs, resolved from the command line.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub topuniverse: String,
    pub simfile: PathBuf,
    pub dry_run: bool,
    pub quiet: bool,
    pub verbosity: u8,
}

pub fn build_options(cli: Cli) -> RunOptions {
    RunOptions {
        topuniverse: cli.topuniverse,
        simfile: cli.simfile,
        dry_run: cli.dry_run,
        quiet: cli.quiet,
        verbosity: cli.verbose,
    }
}
