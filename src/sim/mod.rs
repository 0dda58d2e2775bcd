//! Directory-backed Sim containers.
//!
//! A [`Sim`] is a directory holding exactly one `Sim.<uuid>.json` state
//! file. The state file is never handed out as a plain value to be written
//! back by callers: every setter on [`Sim`], [`UniverseDefinition`] and
//! [`AtomSelections`] reads the current state from disk, applies one change
//! and persists it before returning.
//!
//! Writes go to a temporary file in the Sim's directory which is then
//! renamed over the state file, so a state file on disk is always complete.

use std::fs;
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

mod error;
mod path;
mod selections;
mod universedef;

pub use error::Error;
pub use path::{is_state_file_name, new_state_file_name, relative_to};
pub use selections::AtomSelections;
pub use universedef::UniverseDefinition;

use crate::model::state::SimState;
use crate::model::values::{Categories, Tags};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sim {
    basedir: PathBuf,
    filepath: PathBuf,
}

impl Sim {
    /// Opens the Sim in `dir`, creating the directory and a fresh state file
    /// when no Sim lives there yet.
    pub fn new(dir: impl AsRef<Path>) -> Result<Self> {
        let basedir = absolute(dir.as_ref())?;
        fs::create_dir_all(&basedir).map_err(|e| Error::io(&basedir, e))?;

        match find_state_file(&basedir)? {
            Some(filepath) => {
                debug!(path = %filepath.display(), "reopened existing Sim");
                Ok(Self { basedir, filepath })
            }
            None => Self::create_in(basedir),
        }
    }

    /// Opens an existing Sim without creating anything.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let basedir = absolute(dir.as_ref())?;
        let filepath = find_state_file(&basedir)?.ok_or_else(|| Error::NotFound(basedir.clone()))?;
        Ok(Self { basedir, filepath })
    }

    fn create_in(basedir: PathBuf) -> Result<Self> {
        let filepath = basedir.join(new_state_file_name());
        let sim = Self { basedir, filepath };
        sim.store(&SimState::default())?;
        debug!(path = %sim.filepath.display(), "created Sim state file");
        Ok(sim)
    }

    /// Absolute path of the Sim's state file.
    #[inline]
    pub fn filepath(&self) -> &Path {
        &self.filepath
    }

    /// Absolute path of the directory the Sim lives in.
    #[inline]
    pub fn basedir(&self) -> &Path {
        &self.basedir
    }

    /// Name of the Sim, which is the name of its directory.
    pub fn name(&self) -> String {
        self.basedir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Reads the full state back from disk.
    pub fn state(&self) -> Result<SimState> {
        let file = fs::File::open(&self.filepath).map_err(|e| Error::io(&self.filepath, e))?;
        serde_json::from_reader(BufReader::new(file)).map_err(|e| Error::state(&self.filepath, e))
    }

    pub fn tags(&self) -> Result<Tags> {
        Ok(self.state()?.tags)
    }

    pub fn categories(&self) -> Result<Categories> {
        Ok(self.state()?.categories)
    }

    /// Replaces all tags.
    pub fn set_tags(&self, tags: &Tags) -> Result<()> {
        self.update(|state| state.tags = tags.clone())
    }

    /// Replaces all categories.
    pub fn set_categories(&self, categories: &Categories) -> Result<()> {
        self.update(|state| state.categories = categories.clone())
    }

    pub fn universedef(&self) -> UniverseDefinition<'_> {
        UniverseDefinition::new(self)
    }

    pub fn atomselections(&self) -> AtomSelections<'_> {
        AtomSelections::new(self)
    }

    pub(crate) fn update(&self, apply: impl FnOnce(&mut SimState)) -> Result<()> {
        let mut state = self.state()?;
        apply(&mut state);
        self.store(&state)
    }

    fn store(&self, state: &SimState) -> Result<()> {
        let io_err = |e: std::io::Error| Error::io(&self.filepath, e);

        let mut tmp = NamedTempFile::new_in(&self.basedir).map_err(io_err)?;
        serde_json::to_writer_pretty(&mut tmp, state).map_err(|e| Error::state(&self.filepath, e))?;
        tmp.write_all(b"\n").map_err(io_err)?;
        tmp.as_file().sync_all().map_err(io_err)?;
        tmp.persist(&self.filepath).map_err(|e| io_err(e.error))?;

        debug!(path = %self.filepath.display(), "wrote Sim state file");
        Ok(())
    }
}

fn absolute(dir: &Path) -> Result<PathBuf> {
    std::path::absolute(dir).map_err(|e| Error::io(dir, e))
}

fn find_state_file(dir: &Path) -> Result<Option<PathBuf>> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(Error::io(dir, e)),
    };

    let mut found = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| Error::io(dir, e))?;
        let is_file = entry.file_type().map(|t| t.is_file()).unwrap_or(false);
        if is_file && is_state_file_name(&entry.file_name()) {
            found.push(entry.path());
        }
    }

    match found.len() {
        0 => Ok(None),
        1 => Ok(found.pop()),
        count => Err(Error::Ambiguous {
            dir: dir.to_path_buf(),
            count,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::values::Category;
    use tempfile::TempDir;

    #[test]
    fn new_creates_directory_and_state_file() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("adk").join("fitted");

        let sim = Sim::new(&dir).unwrap();

        assert!(dir.is_dir());
        assert!(sim.filepath().is_file());
        assert_eq!(sim.filepath().parent(), Some(dir.as_path()));
        assert_eq!(sim.name(), "fitted");
        assert_eq!(sim.state().unwrap(), SimState::default());
    }

    #[test]
    fn new_reopens_existing_sim() {
        let tmp = TempDir::new().unwrap();
        let first = Sim::new(tmp.path()).unwrap();
        let second = Sim::new(tmp.path()).unwrap();
        assert_eq!(first.filepath(), second.filepath());
    }

    #[test]
    fn new_ignores_backup_files() {
        let tmp = TempDir::new().unwrap();
        let backup = tmp.path().join("Sim.1234.json.old");
        fs::write(&backup, "{}").unwrap();

        let sim = Sim::new(tmp.path()).unwrap();
        assert_ne!(sim.filepath(), backup);
    }

    #[test]
    fn new_rejects_ambiguous_directory() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("Sim.a.json"), "{}").unwrap();
        fs::write(tmp.path().join("Sim.b.json"), "{}").unwrap();

        let err = Sim::new(tmp.path()).unwrap_err();
        assert!(matches!(err, Error::Ambiguous { count: 2, .. }));
    }

    #[test]
    fn open_requires_state_file() {
        let tmp = TempDir::new().unwrap();
        assert!(matches!(Sim::open(tmp.path()), Err(Error::NotFound(_))));

        let created = Sim::new(tmp.path()).unwrap();
        let opened = Sim::open(tmp.path()).unwrap();
        assert_eq!(created, opened);
    }

    #[test]
    fn tags_and_categories_persist() {
        let tmp = TempDir::new().unwrap();
        let sim = Sim::new(tmp.path()).unwrap();

        let tags: Tags = ["adk", "closed"].map(String::from).into();
        let mut categories = Categories::new();
        categories.insert("protein".into(), Category::from("adk"));
        categories.insert("temperature".into(), Category::Integer(300));

        sim.set_tags(&tags).unwrap();
        sim.set_categories(&categories).unwrap();

        let reopened = Sim::open(tmp.path()).unwrap();
        assert_eq!(reopened.tags().unwrap(), tags);
        assert_eq!(reopened.categories().unwrap(), categories);
    }

    #[test]
    fn state_reports_malformed_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("Sim.broken.json");
        fs::write(&path, "{ not json").unwrap();

        let sim = Sim::open(tmp.path()).unwrap();
        assert!(matches!(sim.state(), Err(Error::State { .. })));
    }

    #[test]
    fn store_leaves_no_temporary_files() {
        let tmp = TempDir::new().unwrap();
        let sim = Sim::new(tmp.path()).unwrap();
        sim.set_tags(&Tags::new()).unwrap();

        let entries: Vec<_> = fs::read_dir(tmp.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }
}
