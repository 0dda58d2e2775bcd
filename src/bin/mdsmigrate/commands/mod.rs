mod plan;
mod run;

use plan::run_plan;
use run::run_migration;

use anyhow::Result;

use crate::config::RunOptions;
use crate::display::Context;

pub fn dispatch(opts: RunOptions, ctx: Context) -> Result<()> {
    if opts.dry_run {
        run_plan(&opts, ctx)
    } else {
        run_migration(&opts, ctx)
    }
}
