//! Conversion of pre-release MDSynthesis Sims into 0.6.0 Sims.
//!
//! Before its first official release a Sim could carry several universe
//! definitions. From 0.6.0 on a Sim carries exactly one, and the schema of
//! its JSON state file changed as well. This crate takes one pre-release
//! state file plus the name of the universe that should define the top-level
//! Sim, and produces:
//!
//! ```text
//! ADK/
//!     Sim.<uuid>.json          top-level Sim, defined by the chosen universe
//!     Sim.<uuid>.json.old      the untouched original
//!     fitted/
//!         Sim.<uuid>.json      one nested Sim per remaining universe
//!     no water/
//!         Sim.<uuid>.json
//! ```
//!
//! Tags and categories of the original go to every new Sim. Atom selections
//! follow the universe they were defined for.
//!
//! # Quick Start
//!
//! ```no_run
//! use mds_migrate::convert;
//!
//! let migration = convert("main", "ADK/Sim.0f6c5b7e-2d1b-4a3f-9b9e-5f5d8f1e2a10.json")?;
//! for sim in &migration.sims {
//!     println!("{} -> {}", sim.universe, sim.dir.display());
//! }
//! # Ok::<(), mds_migrate::ConvertError>(())
//! ```
//!
//! # Module Organization
//!
//! - [`convert`](mod@convert) — The conversion pipeline and its stages
//! - [`sim`] — Directory-backed Sims whose state is written through their own setters
//! - [`model`] — Typed pre-release and 0.6.0 state file schemas

pub mod convert;
pub mod model;
pub mod sim;

pub use convert::{
    BuiltSim, Migration, MigrationPlan, PlannedSim, backup_path, basedir_of, build_sim, commit,
    convert, load_legacy, plan_file, take_backup,
};

pub use convert::Error as ConvertError;
pub use sim::Error as SimError;

pub use model::legacy::{LegacyMds, LegacyState, LegacyUniverse};
pub use model::state::{MdsState, SimState, UniverseDef};
pub use model::values::{Categories, Category, PathPair, ResNums, Selection, Selections, Tags};
pub use sim::{AtomSelections, Sim, UniverseDefinition};
