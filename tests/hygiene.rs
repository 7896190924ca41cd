//! Hygiene: scans the editor's production sources for patterns that panic,
//! swallow errors, or bypass `tracing`.
//!
//! Every pattern has a budget of zero. `*_test.rs` files are exempt.

use std::fs;
use std::path::Path;

/// `(pattern, why it is banned)`.
const BANNED: &[(&str, &str)] = &[
    (".unwrap()", "panics on None/Err"),
    (".expect(", "panics on None/Err"),
    ("panic!(", "crashes the host page"),
    ("unreachable!(", "crashes the host page"),
    ("todo!(", "unfinished code"),
    ("unimplemented!(", "unfinished code"),
    ("let _ =", "discards a value without inspecting it"),
    (".ok()", "discards the error"),
    ("#[allow(dead_code)]", "hides unused code"),
    ("println!(", "use tracing instead"),
    ("eprintln!(", "use tracing instead"),
    ("dbg!(", "debug leftovers"),
];

struct SourceFile {
    path: String,
    content: String,
}

/// Production `.rs` files under `src/`, excluding test files.
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
            continue;
        }
        let path_str = path.to_string_lossy().to_string();
        if !path_str.ends_with(".rs") || path_str.ends_with("_test.rs") {
            continue;
        }
        if let Ok(content) = fs::read_to_string(&path) {
            out.push(SourceFile { path: path_str, content });
        }
    }
}

fn hits_for(files: &[SourceFile], pattern: &str) -> Vec<String> {
    files
        .iter()
        .flat_map(|file| {
            file.content
                .lines()
                .enumerate()
                .filter(|(_, line)| line.contains(pattern))
                .map(move |(n, line)| format!("  {}:{}: {}", file.path, n + 1, line.trim()))
        })
        .collect()
}

#[test]
fn sources_are_found() {
    let files = source_files();
    assert!(files.iter().any(|f| f.path.ends_with("lib.rs")), "run from the crate root");
    assert!(files.iter().all(|f| !f.path.ends_with("_test.rs")));
}

#[test]
fn banned_patterns_budget() {
    let files = source_files();
    let report: Vec<String> = BANNED
        .iter()
        .filter_map(|(pattern, why)| {
            let hits = hits_for(&files, pattern);
            if hits.is_empty() {
                None
            } else {
                Some(format!("`{pattern}` ({why}): {} hit(s)\n{}", hits.len(), hits.join("\n")))
            }
        })
        .collect();
    assert!(report.is_empty(), "hygiene budget exceeded:\n{}", report.join("\n"));
}

#[test]
fn every_module_has_tests_or_is_a_backend() {
    // Modules without a sibling `_test.rs` must be listed here.
    const UNTESTED: &[&str] = &["lib.rs", "consts.rs", "mod.rs", "web.rs"];
    let missing: Vec<String> = source_files()
        .into_iter()
        .filter(|file| {
            let name = Path::new(&file.path).file_name().map(|n| n.to_string_lossy().to_string()).unwrap_or_default();
            !UNTESTED.contains(&name.as_str())
        })
        .filter(|file| {
            let test_path = file.path.replace(".rs", "_test.rs");
            !Path::new(&test_path).exists()
        })
        .map(|file| file.path)
        .collect();
    assert!(missing.is_empty(), "modules without a _test.rs sibling:\n{}", missing.join("\n"));
}
