use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};

use super::Error;
use crate::model::legacy::{LegacyState, LegacyUniverse};
use crate::model::values::{Categories, Tags};

/// Where each universe of a pre-release Sim will end up.
///
/// Building a plan performs every check that can fail before a Sim is
/// created: the top-level universe must exist and every other universe name
/// must be usable as a subdirectory.
#[derive(Debug, Clone, PartialEq)]
pub struct MigrationPlan {
    basedir: PathBuf,
    tags: Tags,
    categories: Categories,
    targets: Vec<PlannedSim>,
    top: usize,
}

/// One Sim to be built from one universe definition.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedSim {
    pub universe: String,
    pub dir: PathBuf,
    pub is_top: bool,
    pub definition: LegacyUniverse,
}

impl MigrationPlan {
    /// Lays out `legacy` under `basedir`, promoting `topuniverse` to the
    /// top-level Sim.
    ///
    /// Targets are ordered by universe name.
    pub fn new(legacy: LegacyState, topuniverse: &str, basedir: &Path) -> Result<Self, Error> {
        if legacy.universe(topuniverse).is_none() {
            return Err(Error::UniverseNotFound {
                name: topuniverse.to_string(),
                available: legacy.universe_names().map(String::from).collect(),
            });
        }

        let LegacyState {
            tags,
            categories,
            mds,
        } = legacy;

        let mut targets = Vec::with_capacity(mds.universes.len());
        let mut top = 0;

        for (universe, definition) in mds.universes {
            let is_top = universe == topuniverse;
            let dir = if is_top {
                top = targets.len();
                basedir.to_path_buf()
            } else {
                validate_dir_name(&universe)?;
                basedir.join(&universe)
            };

            targets.push(PlannedSim {
                universe,
                dir,
                is_top,
                definition,
            });
        }

        Ok(Self {
            basedir: basedir.to_path_buf(),
            tags,
            categories,
            targets,
            top,
        })
    }

    #[inline]
    pub fn basedir(&self) -> &Path {
        &self.basedir
    }

    /// Tags every new Sim receives.
    #[inline]
    pub fn tags(&self) -> &Tags {
        &self.tags
    }

    /// Categories every new Sim receives.
    #[inline]
    pub fn categories(&self) -> &Categories {
        &self.categories
    }

    #[inline]
    pub fn targets(&self) -> &[PlannedSim] {
        &self.targets
    }

    #[inline]
    pub fn top_index(&self) -> usize {
        self.top
    }

    pub fn top(&self) -> &PlannedSim {
        &self.targets[self.top]
    }

    /// Planned Sims other than the top-level one.
    pub fn nested(&self) -> impl Iterator<Item = &PlannedSim> {
        self.targets.iter().filter(|t| !t.is_top)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

fn validate_dir_name(name: &str) -> Result<(), Error> {
    let invalid = || Error::InvalidUniverseName(name.to_string());

    if name.is_empty() || name.contains(['/', '\\']) {
        return Err(invalid());
    }

    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(part)), None) if part == OsStr::new(name) => Ok(()),
        _ => Err(invalid()),
    }
}
