//! Error types for the conversion pipeline.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while converting a pre-release Sim.
///
/// Every variant is fatal. Nothing is rolled back: the `.old` backup taken
/// at the start of a run stays on disk whatever fails afterwards.
#[derive(Debug, Error)]
pub enum Error {
    /// A rename or read on the state file failed.
    #[error("I/O operation failed on '{}': {source}", .path.display())]
    Io {
        /// The path being operated on.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The state file is not valid JSON or does not follow the pre-release schema.
    #[error("failed to parse pre-release state file '{}': {source}", .path.display())]
    Parse {
        /// The file that was read.
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The universe requested for the top-level Sim is not defined.
    #[error(
        "universe '{name}' not present in given Sim (available: {})",
        .available.join(", ")
    )]
    UniverseNotFound {
        /// The requested universe name.
        name: String,
        /// Universe names the Sim does define.
        available: Vec<String>,
    },

    /// A universe name cannot be used as a subdirectory name.
    #[error("universe name '{0}' is not a valid directory name")]
    InvalidUniverseName(String),

    /// The backup target exists already, so the Sim was most likely converted before.
    #[error("backup file '{}' already exists; the Sim appears to be converted already", .0.display())]
    BackupExists(PathBuf),

    /// The given path does not name a file inside a directory.
    #[error("'{}' does not name a Sim state file", .0.display())]
    InvalidStateFile(PathBuf),

    /// Building one of the new Sims failed.
    #[error("failed to build Sim for universe '{universe}': {source}")]
    Sim {
        /// The universe being converted.
        universe: String,
        #[source]
        source: crate::sim::Error,
    },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn sim(universe: impl Into<String>, source: crate::sim::Error) -> Self {
        Self::Sim {
            universe: universe.into(),
            source,
        }
    }
}
