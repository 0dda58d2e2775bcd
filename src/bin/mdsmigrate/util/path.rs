use std::path::Path;

/// Last component of `path` for display, or the whole path if it has none.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_of_state_file() {
        assert_eq!(
            display_name(Path::new("/data/ADK/Sim.1234.json.old")),
            "Sim.1234.json.old"
        );
        assert_eq!(display_name(Path::new("/")), "/");
    }
}
