use anyhow::{Context, Result};

use mds_migrate::plan_file;

use crate::config::RunOptions;
use crate::display::{Context as DisplayContext, print_plan};

pub fn run_plan(opts: &RunOptions, ctx: DisplayContext) -> Result<()> {
    let plan = plan_file(&opts.topuniverse, &opts.simfile)
        .with_context(|| format!("Cannot convert '{}'", opts.simfile.display()))?;

    if ctx.interactive {
        print_plan(&plan);
    } else {
        for target in plan.targets() {
            println!("{}\t{}", target.universe, target.dir.display());
        }
    }

    Ok(())
}
