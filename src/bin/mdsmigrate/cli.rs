use std::path::PathBuf;

use clap::{ArgAction, Parser};

const LONG_ABOUT: &str = "\
Make an MDSynthesis 0.6.0 Sim from a pre-release Sim.

Prior to the first official release of MDSynthesis, a Sim could carry multiple
universe definitions. This was removed in favor of a Sim having only a single
universe, and the schema for the state file of a Sim changed as well.

Given a universe name and a single Sim state file, this produces a Sim with
that named universe as its defined universe. Additional Sims are nested within
for each additional universe definition in the original. A Sim \"ADK\" with
universe definitions \"main\", \"fitted\" and \"no water\", converted with

  mdsmigrate main ADK/Sim.<uuid>.json

goes from

  ADK/
      Sim.<uuid>.json

to

  ADK/
      Sim.<uuid>.json
      Sim.<uuid>.json.old
      fitted/
          Sim.<uuid>.json
      no water/
          Sim.<uuid>.json

The top-level Sim features the universe \"main\"; the nested ones carry the
other universe definitions. Universe names must be valid directory names.

The original state file is kept with \".old\" appended in case the conversion
fails. Atom selections of each universe are placed in the corresponding Sim.";

#[derive(Parser)]
#[command(
    name = "mdsmigrate",
    about = "Convert a pre-release MDSynthesis Sim to the 0.6.0 layout",
    long_about = LONG_ABOUT,
    version,
    before_help = crate::display::banner_for_help()
)]
pub struct Cli {
    /// Name of universe definition to use for the top-level Sim
    #[arg(value_name = "TOPUNIVERSE")]
    pub topuniverse: String,

    /// JSON state file of the Sim to convert
    #[arg(value_name = "SIMFILE")]
    pub simfile: PathBuf,

    /// Show where each universe would go without touching any file
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Suppress banner, progress and summary output (for scripting)
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

pub fn parse() -> Cli {
    Cli::parse()
}
