use std::io::{self, Write};
use std::path::Path;

use mds_migrate::{Migration, MigrationPlan, basedir_of};

use crate::util::path::display_name;
use crate::util::text::{count, truncate};

const INDENT: &str = "      ";

const BOX_INNER_WIDTH: usize = 62;
const SAFE_TABLE_WIDTH: usize = BOX_INNER_WIDTH - INDENT.len();

struct Row {
    universe: String,
    location: String,
    selections: usize,
    resnums: bool,
}

pub fn print_plan(plan: &MigrationPlan) {
    let stderr = io::stderr();
    let mut out = stderr.lock();

    let rows = vec![
        ("Directory", plan.basedir().display().to_string()),
        ("Top universe", plan.top().universe.clone()),
        ("Nested Sims", format!("{}", plan.nested().count())),
        ("Tags", format!("{}", plan.tags().len())),
        ("Categories", format!("{}", plan.categories().len())),
    ];
    print_kv_table(&mut out, "Migration Plan (dry run)", &rows);

    let universes: Vec<Row> = plan
        .targets()
        .iter()
        .map(|t| Row {
            universe: t.universe.clone(),
            location: location(plan.basedir(), &t.dir),
            selections: t.definition.sels.len(),
            resnums: t.definition.resnums.is_some(),
        })
        .collect();
    print_universe_table(&mut out, "Universes", &universes);
}

pub fn print_migration(migration: &Migration) {
    let stderr = io::stderr();
    let mut out = stderr.lock();

    let basedir = basedir_of(&migration.statefile).unwrap_or_default();

    let rows = vec![
        ("State file", display_name(&migration.statefile)),
        ("Backup", display_name(&migration.backup)),
        ("Sims built", count(migration.sims.len(), "Sim")),
    ];
    print_kv_table(&mut out, "Migration Summary", &rows);

    let universes: Vec<Row> = migration
        .sims
        .iter()
        .map(|s| Row {
            universe: s.universe.clone(),
            location: if s.is_top {
                ".".to_string()
            } else {
                location(&basedir, &s.dir)
            },
            selections: s.selections,
            resnums: s.has_resnums,
        })
        .collect();
    print_universe_table(&mut out, "Universes", &universes);
}

fn location(basedir: &Path, dir: &Path) -> String {
    match dir.strip_prefix(basedir) {
        Ok(rel) if rel.as_os_str().is_empty() => ".".to_string(),
        Ok(rel) => format!("{}/", rel.display()),
        Err(_) => dir.display().to_string(),
    }
}

fn print_universe_table(out: &mut impl Write, title: &str, rows: &[Row]) {
    let sels_w = 5usize;
    let res_w = 7usize;
    let sep_overhead = 11;
    let name_w = (SAFE_TABLE_WIDTH - sels_w - res_w - sep_overhead) / 2;
    let loc_w = SAFE_TABLE_WIDTH - sels_w - res_w - sep_overhead - name_w;

    let rule = |left: &str, mid: &str, right: &str| {
        format!(
            "{}{left}{}{mid}{}{mid}{}{mid}{}{right}",
            INDENT,
            "─".repeat(name_w + 2),
            "─".repeat(loc_w + 2),
            "─".repeat(sels_w + 2),
            "─".repeat(res_w + 2),
        )
    };

    let _ = writeln!(
        out,
        "{}┌─ {} ─┐",
        INDENT,
        truncate(title, SAFE_TABLE_WIDTH - 6)
    );
    let _ = writeln!(out, "{}", rule("┌", "┬", "┐"));
    let _ = writeln!(
        out,
        "{}│ {:<name_w$} │ {:<loc_w$} │ {:>sels_w$} │ {:^res_w$} │",
        INDENT, "Universe", "Location", "Sels", "Resnums",
    );
    let _ = writeln!(out, "{}", rule("├", "┼", "┤"));

    for row in rows {
        let _ = writeln!(
            out,
            "{}│ {:<name_w$} │ {:<loc_w$} │ {:>sels_w$} │ {:^res_w$} │",
            INDENT,
            truncate(&row.universe, name_w),
            truncate(&row.location, loc_w),
            row.selections,
            if row.resnums { "✓" } else { "–" },
        );
    }

    let _ = writeln!(out, "{}", rule("└", "┴", "┘"));
}

fn print_kv_table(out: &mut impl Write, title: &str, rows: &[(&str, String)]) {
    let key_w = 14usize;
    let sep_overhead = 6;
    let val_w = SAFE_TABLE_WIDTH.saturating_sub(key_w + sep_overhead);

    let _ = writeln!(
        out,
        "{}┌─ {} ─┐",
        INDENT,
        truncate(title, SAFE_TABLE_WIDTH - 6)
    );
    let _ = writeln!(
        out,
        "{}┌{k_line}┬{v_line}┐",
        INDENT,
        k_line = "─".repeat(key_w + 2),
        v_line = "─".repeat(val_w + 2)
    );

    for (key, val) in rows {
        let _ = writeln!(
            out,
            "{}│ {:<key_w$} │ {:>val_w$} │",
            INDENT,
            truncate(key, key_w),
            truncate(val, val_w),
        );
    }

    let _ = writeln!(
        out,
        "{}└{k_line}┴{v_line}┘",
        INDENT,
        k_line = "─".repeat(key_w + 2),
        v_line = "─".repeat(val_w + 2)
    );
}
