use std::path::{Path, PathBuf};

use super::{Error, Result, Sim, relative_to};
use crate::model::state::UniverseDef;
use crate::model::values::{PathPair, ResNums};

/// Access to the universe definition stored in a [`Sim`]'s state file.
#[derive(Debug, Clone, Copy)]
pub struct UniverseDefinition<'a> {
    sim: &'a Sim,
}

impl<'a> UniverseDefinition<'a> {
    pub(super) fn new(sim: &'a Sim) -> Self {
        Self { sim }
    }

    pub fn get(&self) -> Result<UniverseDef> {
        Ok(self.sim.state()?.mdsynthesis.universedef)
    }

    pub fn set_topology(&self, path: impl AsRef<Path>) -> Result<()> {
        let pair = self.locate(path.as_ref())?;
        self.sim
            .update(|state| state.mdsynthesis.universedef.top = Some(pair))
    }

    pub fn set_trajectory<I, P>(&self, paths: I) -> Result<()>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let pairs = paths
            .into_iter()
            .map(|p| self.locate(p.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        self.sim
            .update(|state| state.mdsynthesis.universedef.traj = pairs)
    }

    pub fn set_resnums(&self, resnums: &ResNums) -> Result<()> {
        self.sim
            .update(|state| state.mdsynthesis.universedef.resnums = Some(resnums.clone()))
    }

    pub fn clear_resnums(&self) -> Result<()> {
        self.sim
            .update(|state| state.mdsynthesis.universedef.resnums = None)
    }

    fn locate(&self, path: &Path) -> Result<PathPair> {
        if !path.is_absolute() {
            return Err(Error::RelativePath(path.to_path_buf()));
        }
        let rel: PathBuf = relative_to(path, self.sim.basedir());
        Ok(PathPair::new(path, rel))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn topology_stores_both_paths() {
        let tmp = TempDir::new().unwrap();
        let sim = Sim::new(tmp.path().join("fitted")).unwrap();
        let top = tmp.path().join("adk.psf");

        sim.universedef().set_topology(&top).unwrap();

        let def = sim.universedef().get().unwrap();
        let pair = def.top.unwrap();
        assert_eq!(pair.abs(), top);
        assert_eq!(pair.rel(), Path::new("../adk.psf"));
    }

    #[test]
    fn trajectory_keeps_order() {
        let tmp = TempDir::new().unwrap();
        let sim = Sim::new(tmp.path()).unwrap();
        let trajs = [tmp.path().join("md2.dcd"), tmp.path().join("md1.dcd")];

        sim.universedef().set_trajectory(&trajs).unwrap();

        let def = sim.universedef().get().unwrap();
        let abs: Vec<_> = def.traj.iter().map(PathPair::abs).collect();
        assert_eq!(abs, [trajs[0].as_path(), trajs[1].as_path()]);
        assert_eq!(def.traj[0].rel(), Path::new("md2.dcd"));
    }

    #[test]
    fn relative_paths_are_rejected() {
        let tmp = TempDir::new().unwrap();
        let sim = Sim::new(tmp.path()).unwrap();

        let err = sim.universedef().set_topology("adk.psf").unwrap_err();
        assert!(matches!(err, Error::RelativePath(_)));
        assert!(!sim.universedef().get().unwrap().is_defined());
    }

    #[test]
    fn resnums_can_be_set_and_cleared() {
        let tmp = TempDir::new().unwrap();
        let sim = Sim::new(tmp.path()).unwrap();
        let resnums = vec![Some(1), Some(2), None];

        sim.universedef().set_resnums(&resnums).unwrap();
        assert_eq!(sim.universedef().get().unwrap().resnums, Some(resnums));

        sim.universedef().clear_resnums().unwrap();
        assert_eq!(sim.universedef().get().unwrap().resnums, None);
    }
}
