use std::io::{self, Write};

use anyhow::Error;

use crate::util::text::wrap;

#[rustfmt::skip]
pub fn print_error(err: &Error) {
    let mut stderr = io::stderr().lock();

    let _ = writeln!(stderr);
    let _ = writeln!(stderr, "   ╔══════════════════════════════════════════════════════════════╗");
    let _ = writeln!(stderr, "   ║  ✗ Error                                                     ║");
    let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");

    for line in wrap(&err.to_string(), 59) {
        let _ = writeln!(stderr, "   ║  {:<59} ║", line);
    }

    let mut source = err.source();
    while let Some(cause) = source {
        let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");
        let _ = writeln!(stderr, "   ║  Caused by:                                                  ║");
        for line in wrap(&cause.to_string(), 57) {
            let _ = writeln!(stderr, "   ║    {:<57} ║", line);
        }
        source = cause.source();
    }

    if let Some(hints) = HintCollector::collect(err) {
        let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");
        let _ = writeln!(stderr, "   ║  Hints:                                                      ║");
        for hint in hints {
            let wrapped = wrap(&hint, 55);
            if let Some((first, rest)) = wrapped.split_first() {
                let _ = writeln!(stderr, "   ║    • {:<55} ║", first);
                for line in rest {
                    let _ = writeln!(stderr, "   ║      {:<55} ║", line);
                }
            }
        }
    }

    let _ = writeln!(stderr, "   ╚══════════════════════════════════════════════════════════════╝");
    let _ = writeln!(stderr);
}

struct HintCollector {
    hints: Vec<String>,
    has_typed_hints: bool,
}

impl HintCollector {
    fn new() -> Self {
        Self {
            hints: Vec::new(),
            has_typed_hints: false,
        }
    }

    fn collect(err: &Error) -> Option<Vec<String>> {
        let mut collector = Self::new();

        collector.collect_convert_hints(err);

        if !collector.has_typed_hints {
            collector.collect_fallback_hints(err);
        }

        if collector.hints.is_empty() {
            None
        } else {
            Some(collector.hints)
        }
    }

    fn add(&mut self, hint: impl Into<String>) {
        self.hints.push(hint.into());
    }

    fn mark_typed(&mut self) {
        self.has_typed_hints = true;
    }

    fn collect_convert_hints(&mut self, err: &Error) {
        use mds_migrate::ConvertError;

        let Some(convert_err) = err.downcast_ref::<ConvertError>() else {
            return;
        };

        self.mark_typed();

        match convert_err {
            ConvertError::Io { source, .. } => {
                self.collect_std_io_hints(source);
                self.add_backup_hint();
            }

            ConvertError::Parse { source, .. } => {
                use serde_json::error::Category;

                match source.classify() {
                    Category::Data => {
                        self.add("The file is valid JSON but not a pre-release Sim state file");
                        self.add("Expected top-level keys: tags, categories, mds.universes");
                        self.add("A Sim that was already converted has 'mdsynthesis' instead of 'mds'");
                    }
                    Category::Syntax | Category::Eof => {
                        self.add(format!(
                            "JSON syntax error near line {}, column {}",
                            source.line(),
                            source.column()
                        ));
                        self.add("The file may be truncated or hand-edited");
                    }
                    Category::Io => {
                        self.add("The state file could not be read completely");
                    }
                }
                self.add_backup_hint();
            }

            ConvertError::UniverseNotFound { name, available } => {
                self.add(format!("No universe definition named '{}'", name));
                if available.is_empty() {
                    self.add("This Sim defines no universes at all");
                } else {
                    self.add(format!("Pick one of: {}", available.join(", ")));
                }
                self.add("Names are case-sensitive; quote names containing spaces");
                self.add_backup_hint();
            }

            ConvertError::InvalidUniverseName(name) => {
                self.add(format!(
                    "Universe '{}' would need a subdirectory of that name",
                    name
                ));
                self.add("Choose it as the top-level universe, or rename it in the .old file");
                self.add_backup_hint();
            }

            ConvertError::BackupExists(path) => {
                self.add("A previous run already moved the original state file aside");
                self.add(format!("Backup: {}", path.display()));
                self.add("Inspect the directory before running again");
            }

            ConvertError::InvalidStateFile(_) => {
                self.add("Pass the path of the Sim's JSON state file, not its directory");
            }

            ConvertError::Sim { universe, source } => {
                self.add(format!("Building the Sim for '{}' failed", universe));
                self.collect_sim_hints(source);
                self.add("Sims built before the failure were left on disk");
                self.add_backup_hint();
            }
        }
    }

    fn collect_sim_hints(&mut self, err: &mds_migrate::SimError) {
        use mds_migrate::SimError;

        match err {
            SimError::Io { source, .. } => self.collect_std_io_hints(source),

            SimError::State { .. } => {
                self.add("An existing Sim state file in the target directory is corrupt");
            }

            SimError::NotFound(_) => {
                self.add("The target directory holds no Sim state file");
            }

            SimError::Ambiguous { dir, .. } => {
                self.add(format!(
                    "Remove stray Sim.*.json files from {}",
                    dir.display()
                ));
            }

            SimError::RelativePath(_) => {
                self.add("Topology and trajectory paths in the original must be absolute");
            }
        }
    }

    fn collect_std_io_hints(&mut self, source: &std::io::Error) {
        use std::io::ErrorKind;

        match source.kind() {
            ErrorKind::NotFound => {
                self.add("File or directory not found");
                self.add("Check the path spelling and ensure the state file exists");
            }

            ErrorKind::PermissionDenied => {
                self.add("Permission denied accessing the Sim directory");
                self.add("Check directory permissions with `ls -la`");
            }

            ErrorKind::AlreadyExists => {
                self.add("A file with the target name already exists");
            }

            ErrorKind::StorageFull => {
                self.add("No space left on device");
            }

            _ => {
                self.add("I/O operation failed");
                self.add("Check file path, permissions, and disk space");
            }
        }
    }

    fn add_backup_hint(&mut self) {
        self.add("The original is kept as <SIMFILE>.old; rename it back to retry");
    }

    fn collect_fallback_hints(&mut self, err: &Error) {
        let msg = error_chain_text(err);

        if msg.contains("no such file") || msg.contains("not found") {
            self.add("Check that the file path is correct");
            return;
        }

        if msg.contains("permission denied") {
            self.add("Ensure you have the required access rights");
        }
    }
}

fn error_chain_text(err: &Error) -> String {
    let mut text = err.to_string();

    let mut source = err.source();
    while let Some(cause) = source {
        text.push('\n');
        text.push_str(&cause.to_string());
        source = cause.source();
    }

    text.to_lowercase()
}
