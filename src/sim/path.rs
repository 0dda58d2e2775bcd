use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};

use uuid::Uuid;

const STATE_PREFIX: &str = "Sim.";
const STATE_SUFFIX: &str = ".json";

/// Generates a fresh state file name of the form `Sim.<uuid>.json`.
pub fn new_state_file_name() -> String {
    format!("{}{}{}", STATE_PREFIX, Uuid::new_v4(), STATE_SUFFIX)
}

/// Returns `true` if `name` looks like a Sim state file.
///
/// A renamed backup such as `Sim.<uuid>.json.old` does not match.
pub fn is_state_file_name(name: &OsStr) -> bool {
    let Some(name) = name.to_str() else {
        return false;
    };
    name.len() > STATE_PREFIX.len() + STATE_SUFFIX.len()
        && name.starts_with(STATE_PREFIX)
        && name.ends_with(STATE_SUFFIX)
}

/// Expresses the absolute `path` relative to the absolute directory `base`.
///
/// Falls back to `path` itself when the two share no root (different
/// drives or prefixes).
pub fn relative_to(path: &Path, base: &Path) -> PathBuf {
    let path_parts: Vec<Component<'_>> = path.components().collect();
    let base_parts: Vec<Component<'_>> = base.components().collect();

    let common = path_parts
        .iter()
        .zip(&base_parts)
        .take_while(|(a, b)| a == b)
        .count();

    if common == 0 {
        return path.to_path_buf();
    }

    let mut rel = PathBuf::new();
    for _ in common..base_parts.len() {
        rel.push("..");
    }
    for part in &path_parts[common..] {
        rel.push(part.as_os_str());
    }

    if rel.as_os_str().is_empty() {
        rel.push(".");
    }
    rel
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_names_are_state_files() {
        let name = new_state_file_name();
        assert!(is_state_file_name(OsStr::new(&name)));
        assert_ne!(name, new_state_file_name());
    }

    #[test]
    fn backup_is_not_a_state_file() {
        assert!(!is_state_file_name(OsStr::new(
            "Sim.0f6c5b7e-2d1b-4a3f-9b9e-5f5d8f1e2a10.json.old"
        )));
        assert!(!is_state_file_name(OsStr::new("Sim..json")));
        assert!(!is_state_file_name(OsStr::new("Group.abc.json")));
    }

    #[test]
    fn relative_to_sibling_file() {
        let rel = relative_to(Path::new("/data/adk/adk.psf"), Path::new("/data/adk"));
        assert_eq!(rel, PathBuf::from("adk.psf"));
    }

    #[test]
    fn relative_to_parent_file() {
        let rel = relative_to(Path::new("/data/adk/md1.dcd"), Path::new("/data/adk/fitted"));
        assert_eq!(rel, PathBuf::from("../md1.dcd"));
    }

    #[test]
    fn relative_to_distant_file() {
        let rel = relative_to(
            Path::new("/scratch/runs/md1.dcd"),
            Path::new("/data/adk/no water"),
        );
        assert_eq!(rel, PathBuf::from("../../../scratch/runs/md1.dcd"));
    }

    #[test]
    fn relative_to_itself() {
        let rel = relative_to(Path::new("/data/adk"), Path::new("/data/adk"));
        assert_eq!(rel, PathBuf::from("."));
    }
}
