// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

mod helpers;

use gitsplain::error::Error;
use gitsplain::services::git::{GitService, parse_untracked, unquote_path};
use helpers::TestRepo;
use proptest::prelude::*;

fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

// ─── Path validation ─────────────────────────────────────────────────────────

#[test]
fn missing_path_is_not_a_directory() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("does-not-exist");
    let err = GitService::open(&missing).err().unwrap();
    assert!(
        matches!(err, Error::NotADirectory { ref path } if *path == missing),
        "expected NotADirectory, got: {err:?}"
    );
}

#[test]
fn plain_directory_is_not_a_repository() {
    let dir = tempfile::tempdir().unwrap();
    let err = GitService::open(dir.path()).err().unwrap();
    assert!(
        matches!(err, Error::NotARepository { .. }),
        "expected NotARepository, got: {err:?}"
    );
}

// ─── Diff ────────────────────────────────────────────────────────────────────

#[test]
fn diff_against_head_shows_modification() {
    let repo = TestRepo::with_commit();
    repo.write("tracked.txt", "original line\nadded line\n");

    let git = GitService::open(repo.path()).unwrap();
    let diff = git.diff(&args(&["HEAD"])).unwrap().unwrap();

    assert!(diff.starts_with("diff --git a/tracked.txt b/tracked.txt"));
    assert!(diff.contains("+added line"));
    assert_eq!(diff, diff.trim(), "diff output should be trimmed");
}

#[test]
fn diff_passes_staged_flag_through() {
    let repo = TestRepo::with_commit();
    repo.write("tracked.txt", "staged change\n");
    repo.git(&["add", "tracked.txt"]);
    repo.write("tracked.txt", "staged change\nunstaged change\n");

    let git = GitService::open(repo.path()).unwrap();
    let staged = git.diff(&args(&["--staged"])).unwrap().unwrap();

    assert!(staged.contains("+staged change"));
    assert!(!staged.contains("unstaged change"));
}

#[test]
fn clean_tree_has_empty_diff() {
    let repo = TestRepo::with_commit();
    let git = GitService::open(repo.path()).unwrap();
    assert_eq!(git.diff(&args(&["HEAD"])).unwrap(), Some(String::new()));
}

#[test]
fn failing_diff_is_soft() {
    // No commits yet, so HEAD does not resolve
    let repo = TestRepo::init();
    let git = GitService::open(repo.path()).unwrap();
    assert_eq!(git.diff(&args(&["HEAD"])).unwrap(), None);
}

// ─── Untracked files ─────────────────────────────────────────────────────────

#[test]
fn lists_untracked_files_only() {
    let repo = TestRepo::with_commit();
    repo.write("tracked.txt", "modified\n");
    repo.write("notes.md", "new\n");
    repo.write("src/new.rs", "fn main() {}\n");

    let git = GitService::open(repo.path()).unwrap();
    let mut untracked = git.untracked_files().unwrap().unwrap();
    untracked.sort();

    assert_eq!(untracked, vec!["notes.md", "src/new.rs"]);
}

#[test]
fn ignored_files_are_not_listed() {
    let repo = TestRepo::with_commit();
    repo.write(".gitignore", "*.log\n");
    repo.git(&["add", ".gitignore"]);
    repo.git(&["commit", "-q", "-m", "ignore logs"]);
    repo.write("debug.log", "noise\n");

    let git = GitService::open(repo.path()).unwrap();
    assert_eq!(git.untracked_files().unwrap(), Some(vec![]));
}

#[test]
fn quoted_non_ascii_name_is_decoded() {
    let repo = TestRepo::with_commit();
    repo.write("naïve file.txt", "hi\n");

    let git = GitService::open(repo.path()).unwrap();
    let untracked = git.untracked_files().unwrap().unwrap();

    assert_eq!(untracked, vec!["naïve file.txt"]);
}

#[test]
fn escaped_status_line_decodes_to_literal_name() {
    let porcelain = "?? \"caf\\303\\251 menu.txt\"\n";
    insta::assert_snapshot!(parse_untracked(porcelain).join("|"), @"café menu.txt");
}

// ─── Collect ─────────────────────────────────────────────────────────────────

#[test]
fn collect_in_repo_without_commits_keeps_untracked() {
    let repo = TestRepo::init();
    repo.write("first.txt", "hello\n");

    let git = GitService::open(repo.path()).unwrap();
    let changes = git.collect(&args(&["HEAD"])).unwrap();

    assert!(!changes.has_diff());
    assert_eq!(changes.untracked, vec!["first.txt"]);
}

#[test]
fn collect_clean_repo_is_empty() {
    let repo = TestRepo::with_commit();
    let git = GitService::open(repo.path()).unwrap();
    assert!(git.collect(&args(&["HEAD"])).unwrap().is_empty());
}

// ─── Properties ──────────────────────────────────────────────────────────────

/// Quote a path the way `git status` does with core.quotePath enabled
fn git_quote(name: &str) -> String {
    let mut out = String::from("\"");
    for byte in name.bytes() {
        match byte {
            b'"' => out.push_str("\\\""),
            b'\\' => out.push_str("\\\\"),
            b'\t' => out.push_str("\\t"),
            b'\n' => out.push_str("\\n"),
            0x20..=0x7e => out.push(byte as char),
            _ => out.push_str(&format!("\\{byte:03o}")),
        }
    }
    out.push('"');
    out
}

proptest! {
    #[test]
    fn unquote_inverts_git_quoting(name in "[a-zA-Z0-9 ._\\-\"\\\\\t\u{e9}\u{4e2d}\u{1f600}]{1,24}") {
        prop_assert_eq!(unquote_path(&git_quote(&name)), name);
    }

    #[test]
    fn unquote_never_panics(raw in ".*") {
        let _ = unquote_path(&raw);
    }
}
