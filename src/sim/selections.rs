use super::{Result, Sim};
use crate::model::values::{Selection, Selections};

/// Access to the named atom selections stored in a [`Sim`]'s state file.
#[derive(Debug, Clone, Copy)]
pub struct AtomSelections<'a> {
    sim: &'a Sim,
}

impl<'a> AtomSelections<'a> {
    pub(super) fn new(sim: &'a Sim) -> Self {
        Self { sim }
    }

    /// Stores `selection` under `name`, replacing any previous definition.
    pub fn insert(&self, name: &str, selection: &Selection) -> Result<()> {
        self.sim.update(|state| {
            state
                .mdsynthesis
                .atomselections
                .insert(name.to_string(), selection.clone());
        })
    }

    pub fn get(&self, name: &str) -> Result<Option<Selection>> {
        Ok(self.all()?.remove(name))
    }

    /// Removes the selection stored under `name`, if any.
    pub fn remove(&self, name: &str) -> Result<()> {
        self.sim.update(|state| {
            state.mdsynthesis.atomselections.remove(name);
        })
    }

    pub fn names(&self) -> Result<Vec<String>> {
        Ok(self.all()?.into_keys().collect())
    }

    pub fn all(&self) -> Result<Selections> {
        Ok(self.sim.state()?.mdsynthesis.atomselections)
    }
}
