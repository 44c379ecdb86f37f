//! Hygiene — enforces coding standards at test time
//!
//! Scans the wire crate's production sources for antipatterns that must stay
//! out of codec code. Every budget is zero: a codec that panics or silently
//! drops errors takes the whole client down with it.

use std::fs;
use std::path::Path;

/// Pattern, budget, and why the pattern is banned here.
const BUDGETS: &[(&str, usize, &str)] = &[
    (".unwrap()", 0, "panics on malformed wire input"),
    (".expect(", 0, "panics on malformed wire input"),
    ("panic!(", 0, "crashes the process"),
    ("unreachable!(", 0, "crashes the process"),
    ("todo!(", 0, "unfinished codepath"),
    ("unimplemented!(", 0, "unfinished codepath"),
    ("let _ =", 0, "discards a result without inspecting it"),
    (".ok()", 0, "discards an error without inspecting it"),
    ("#[allow(dead_code)]", 0, "hides unused code"),
];

struct SourceFile {
    path: String,
    content: String,
}

/// Collect production `.rs` files from `wire/src/`, excluding test files.
fn source_files() -> Vec<SourceFile> {
    let mut files = Vec::new();
    collect_rs_files(Path::new("src"), &mut files);
    files
}

fn collect_rs_files(dir: &Path, out: &mut Vec<SourceFile>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_rs_files(&path, out);
        } else if path.extension().is_some_and(|e| e == "rs") {
            let path_str = path.to_string_lossy().to_string();
            if path_str.ends_with("_test.rs") {
                continue;
            }
            if let Ok(content) = fs::read_to_string(&path) {
                out.push(SourceFile { path: path_str, content });
            }
        }
    }
}

fn hits_for(files: &[SourceFile], pattern: &str) -> Vec<(String, usize)> {
    files
        .iter()
        .filter_map(|file| {
            let count = file
                .content
                .lines()
                .filter(|line| line.contains(pattern))
                .count();
            if count > 0 {
                Some((file.path.clone(), count))
            } else {
                None
            }
        })
        .collect()
}

#[test]
fn codec_sources_stay_within_antipattern_budgets() {
    let files = source_files();
    assert!(!files.is_empty(), "no sources found; run from the crate root");

    for (pattern, budget, reason) in BUDGETS {
        let hits = hits_for(&files, pattern);
        let count: usize = hits.iter().map(|(_, c)| c).sum();
        let listing = hits
            .iter()
            .map(|(path, count)| format!("  {path}: {count}"))
            .collect::<Vec<_>>()
            .join("\n");
        assert!(
            count <= *budget,
            "`{pattern}` budget exceeded ({reason}): found {count}, max {budget}.\n{listing}"
        );
    }
}
