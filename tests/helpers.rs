// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

/// Scratch git repository driven through the git CLI
#[allow(dead_code)]
pub struct TestRepo {
    pub dir: TempDir,
}

#[allow(dead_code)]
impl TestRepo {
    /// Empty repository without commits
    pub fn init() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp directory");
        let repo = Self { dir };
        repo.git(&["init", "-q"]);
        repo
    }

    /// Repository with one committed file, `tracked.txt`
    pub fn with_commit() -> Self {
        let repo = Self::init();
        repo.write("tracked.txt", "original line\n");
        repo.git(&["add", "tracked.txt"]);
        repo.git(&["commit", "-q", "-m", "initial"]);
        repo
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn write(&self, name: &str, content: &str) {
        let path = self.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent dir");
        }
        std::fs::write(path, content).expect("Failed to write file");
    }

    pub fn git(&self, args: &[&str]) -> String {
        let output = Command::new("git")
            .args([
                "-c",
                "user.name=Test User",
                "-c",
                "user.email=test@example.com",
                "-c",
                "commit.gpgsign=false",
            ])
            .args(args)
            .current_dir(self.path())
            .output()
            .expect("Failed to run git");
        assert!(
            output.status.success(),
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).to_string()
    }
}
