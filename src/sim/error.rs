use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O operation failed on '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed Sim state file '{}': {source}", .path.display())]
    State {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("no Sim state file found in '{}'", .0.display())]
    NotFound(PathBuf),

    #[error("directory '{}' holds {count} Sim state files, expected at most one", .dir.display())]
    Ambiguous { dir: PathBuf, count: usize },

    #[error("path '{}' must be absolute", .0.display())]
    RelativePath(PathBuf),
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn state(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::State {
            path: path.into(),
            source,
        }
    }
}
