// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

/// Repository change state gathered for one invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    /// Trimmed `git diff` output, empty when nothing tracked changed
    pub diff: String,
    /// Repo-relative untracked paths, in `git status` order
    pub untracked: Vec<String>,
}

impl ChangeSet {
    pub fn new(diff: impl Into<String>, untracked: Vec<String>) -> Self {
        Self {
            diff: diff.into().trim().to_string(),
            untracked,
        }
    }

    pub fn has_diff(&self) -> bool {
        !self.diff.is_empty()
    }

    pub fn has_untracked(&self) -> bool {
        !self.untracked.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        !self.has_diff() && !self.has_untracked()
    }
}
