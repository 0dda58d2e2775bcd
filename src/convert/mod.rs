//! Conversion of a pre-release Sim into one 0.6.0 Sim per universe.
//!
//! [`convert`] runs the whole pipeline. Its stages are public so a caller
//! can report progress between them:
//!
//! 1. [`take_backup`] renames the state file to `<name>.old`.
//! 2. [`load_legacy`] parses the backup.
//! 3. [`MigrationPlan::new`] validates the requested top-level universe and
//!    assigns every universe a directory.
//! 4. [`build_sim`] creates and fills one Sim per planned target.
//! 5. [`commit`] renames the top-level Sim's state file to the original
//!    file name. Until this happens the migration is not visible under the
//!    expected name.

use std::ffi::OsString;
use std::fs;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

mod error;
mod plan;

pub use error::Error;
pub use plan::{MigrationPlan, PlannedSim};

use crate::model::legacy::LegacyState;
use crate::sim::Sim;

/// Suffix appended to the original state file before conversion.
pub const BACKUP_SUFFIX: &str = ".old";

pub type Result<T> = std::result::Result<T, Error>;

/// Outcome of a completed conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Migration {
    /// The renamed original state file.
    pub backup: PathBuf,
    /// State file of the top-level Sim, at the original path.
    pub statefile: PathBuf,
    /// Every Sim built, in processing order.
    pub sims: Vec<BuiltSim>,
}

impl Migration {
    pub fn top(&self) -> Option<&BuiltSim> {
        self.sims.iter().find(|s| s.is_top)
    }
}

/// A Sim built from one universe definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltSim {
    pub universe: String,
    pub dir: PathBuf,
    pub statefile: PathBuf,
    pub is_top: bool,
    pub selections: usize,
    pub has_resnums: bool,
}

/// Converts the pre-release Sim state file `simfile`, promoting the universe
/// named `topuniverse` to the top-level Sim.
///
/// On success the top-level Sim's state file sits at `simfile`, every other
/// universe lives in a Sim in a same-named subdirectory next to it, and the
/// original file is kept as `simfile.old`.
pub fn convert(topuniverse: &str, simfile: impl AsRef<Path>) -> Result<Migration> {
    let simfile = simfile.as_ref();
    let basedir = basedir_of(simfile)?;

    let backup = take_backup(simfile)?;
    let legacy = load_legacy(&backup)?;
    let plan = MigrationPlan::new(legacy, topuniverse, &basedir)?;

    info!(
        universes = plan.len(),
        top = topuniverse,
        "converting Sim in {}",
        basedir.display()
    );

    let mut sims = Vec::with_capacity(plan.len());
    for target in plan.targets() {
        sims.push(build_sim(&plan, target)?);
    }

    let top = &mut sims[plan.top_index()];
    commit(&top.statefile, simfile)?;
    top.statefile = simfile.to_path_buf();

    Ok(Migration {
        backup,
        statefile: simfile.to_path_buf(),
        sims,
    })
}

/// Reads and validates `simfile` without touching the filesystem.
pub fn plan_file(topuniverse: &str, simfile: impl AsRef<Path>) -> Result<MigrationPlan> {
    let simfile = simfile.as_ref();
    let basedir = basedir_of(simfile)?;
    let legacy = load_legacy(simfile)?;
    MigrationPlan::new(legacy, topuniverse, &basedir)
}

/// Path the original state file is moved to: `simfile` with `.old` appended.
pub fn backup_path(simfile: &Path) -> Result<PathBuf> {
    let name = simfile
        .file_name()
        .ok_or_else(|| Error::InvalidStateFile(simfile.to_path_buf()))?;

    let mut backup = OsString::from(name);
    backup.push(BACKUP_SUFFIX);
    Ok(simfile.with_file_name(backup))
}

/// Moves `simfile` out of the way so the new Sims can be built next to it.
///
/// Refuses to run when the backup already exists.
pub fn take_backup(simfile: &Path) -> Result<PathBuf> {
    let backup = backup_path(simfile)?;

    match fs::symlink_metadata(&backup) {
        Ok(_) => return Err(Error::BackupExists(backup)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(Error::io(&backup, e)),
    }

    fs::rename(simfile, &backup).map_err(|e| Error::io(simfile, e))?;
    info!(backup = %backup.display(), "moved original state file aside");
    Ok(backup)
}

/// Parses a pre-release state file.
pub fn load_legacy(path: &Path) -> Result<LegacyState> {
    let file = fs::File::open(path).map_err(|e| Error::io(path, e))?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| Error::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Creates the Sim for `target` and deposits everything it inherits from
/// the pre-release Sim.
pub fn build_sim(plan: &MigrationPlan, target: &PlannedSim) -> Result<BuiltSim> {
    let wrap = |e: crate::sim::Error| Error::sim(&target.universe, e);
    let def = &target.definition;

    let sim = Sim::new(&target.dir).map_err(wrap)?;

    sim.set_tags(plan.tags()).map_err(wrap)?;
    sim.set_categories(plan.categories()).map_err(wrap)?;

    let universedef = sim.universedef();
    universedef.set_topology(def.top.abs()).map_err(wrap)?;
    universedef
        .set_trajectory(def.trajectory_paths())
        .map_err(wrap)?;

    if let Some(resnums) = &def.resnums {
        universedef.set_resnums(resnums).map_err(wrap)?;
    }

    let selections = sim.atomselections();
    for (name, sel) in &def.sels {
        selections.insert(name, sel).map_err(wrap)?;
        debug!(universe = %target.universe, selection = %name, "copied atom selection");
    }

    info!(
        universe = %target.universe,
        top = target.is_top,
        path = %sim.filepath().display(),
        "built Sim"
    );

    Ok(BuiltSim {
        universe: target.universe.clone(),
        dir: sim.basedir().to_path_buf(),
        statefile: sim.filepath().to_path_buf(),
        is_top: target.is_top,
        selections: def.sels.len(),
        has_resnums: def.resnums.is_some(),
    })
}

/// Moves the top-level Sim's state file to the original file name.
pub fn commit(top_statefile: &Path, simfile: &Path) -> Result<()> {
    fs::rename(top_statefile, simfile).map_err(|e| Error::io(top_statefile, e))?;
    info!(path = %simfile.display(), "committed top-level state file");
    Ok(())
}

/// Absolute directory a state file lives in; the top-level Sim goes here.
pub fn basedir_of(simfile: &Path) -> Result<PathBuf> {
    let abs = std::path::absolute(simfile).map_err(|e| Error::io(simfile, e))?;
    match (abs.parent(), abs.file_name()) {
        (Some(parent), Some(_)) => Ok(parent.to_path_buf()),
        _ => Err(Error::InvalidStateFile(simfile.to_path_buf())),
    }
}
