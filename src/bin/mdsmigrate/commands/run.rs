use anyhow::{Context, Result};
use tracing::warn;

use mds_migrate::{Migration, MigrationPlan, basedir_of, build_sim, commit, load_legacy, take_backup};

use crate::config::RunOptions;
use crate::display::{Context as DisplayContext, Progress, print_migration};
use crate::util::path::display_name;
use crate::util::text::count;

const TOTAL_STEPS: u8 = 4;

pub fn run_migration(opts: &RunOptions, ctx: DisplayContext) -> Result<()> {
    let simfile = &opts.simfile;
    let basedir = basedir_of(simfile)?;

    let mut progress = Progress::new(ctx.interactive, TOTAL_STEPS);

    progress.step("Backing up state file");
    let backup = take_backup(simfile).context("Failed to back up the original state file")?;
    progress.complete_step(
        "Backing up state file",
        &[format!("Moved to {}", display_name(&backup))],
    );

    progress.step("Reading pre-release state");
    let legacy = load_legacy(&backup).context("Failed to read the original state file")?;
    let plan = MigrationPlan::new(legacy, &opts.topuniverse, &basedir)
        .context("The original state file cannot be converted")?;
    progress.complete_step(
        "Reading pre-release state",
        &[
            count(plan.len(), "universe"),
            format!("Top-level universe: {}", plan.top().universe),
            format!("{} shared by every Sim", count(plan.tags().len(), "tag")),
        ],
    );

    progress.step("Building Sims");
    let mut sims = Vec::with_capacity(plan.len());
    for target in plan.targets() {
        sims.push(build_sim(&plan, target)?);
    }
    let build_substeps: Vec<String> = sims
        .iter()
        .map(|s| format!("{} ({})", s.universe, count(s.selections, "selection")))
        .collect();
    progress.complete_step("Building Sims", &build_substeps);

    progress.step("Committing top-level Sim");
    let top = &mut sims[plan.top_index()];
    if let Err(e) = commit(&top.statefile, simfile) {
        warn!(
            statefile = %top.statefile.display(),
            "top-level Sim was built but not renamed into place"
        );
        return Err(e).context("Failed to move the top-level state file into place");
    }
    top.statefile = simfile.clone();
    progress.complete_step(
        "Committing top-level Sim",
        &[format!("Wrote {}", display_name(simfile))],
    );

    progress.finish();

    if ctx.interactive {
        print_migration(&Migration {
            backup,
            statefile: simfile.clone(),
            sims,
        });
    }

    Ok(())
}
