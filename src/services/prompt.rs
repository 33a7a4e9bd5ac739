// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

use crate::domain::{ChangeSet, PromptStyle};

pub const NO_DIFF_MARKER: &str =
    "There were no changes detected by `git diff` (no modifications to tracked files).";
pub const NO_UNTRACKED_MARKER: &str = "There were no new untracked files detected.";
pub const CLOSING_MARKER: &str = "Respond in Markdown. Begin your explanation now.";

const CONCISE_PREAMBLE: &str = "\
You are an expert Git assistant. Your task is to analyze the following Git changes and provide a clear, concise summary and explanation suitable for a developer reviewing these changes.

Please structure your response as follows:
1.  **High-Level Summary:** Briefly describe the overall purpose or nature of the changes (e.g., bug fix, feature implementation, refactoring, documentation update). Include mention of new files if any.
2.  **Detailed Changes:** For each significantly changed file (or group of related files), explain the key modifications. Focus on *what* changed and *why* (if the reason is apparent from the code changes). Use Markdown for readability (like bullet points or code formatting where appropriate).
3.  **New Files:** If there are new (untracked) files, list them and briefly describe their likely purpose based on their names or paths.";

const REVIEW_PREAMBLE: &str = "\
You are a senior software engineer performing a code review. Analyze the following Git changes and produce a thorough review a teammate can act on before merging.

Please structure your response with these Markdown sections:
1.  **Summary:** One short paragraph describing the overall intent of the changes.
2.  **Detailed Changes:** For each significantly changed file (or group of related files), explain what changed and why, citing functions or identifiers where useful.
3.  **New Files:** List any new (untracked) files and their likely purpose.
4.  **Code Quality:** A score from 1 to 10 followed by a short justification covering readability, structure and naming.
5.  **Risk Assessment:** Low, Medium or High, with the specific areas that could break.
6.  **Test Coverage:** Whether the changes appear to be tested, and which tests are missing.
7.  **Readiness:** One of `Ready to merge`, `Needs minor changes` or `Needs major changes`, with a one-line reason.
8.  **Suggestions:** A bulleted list of concrete improvements, most important first.";

const CONCISE_SYSTEM: &str = "You are an expert Git assistant providing clear summaries and explanations of git diffs and new files.";

const REVIEW_SYSTEM: &str = "You are a meticulous senior code reviewer. You explain git changes, rate their quality and judge whether they are ready to merge.";

impl PromptStyle {
    pub fn preamble(self) -> &'static str {
        match self {
            Self::Concise => CONCISE_PREAMBLE,
            Self::Review => REVIEW_PREAMBLE,
        }
    }

    /// System message sent alongside the prompt
    pub fn system_prompt(self) -> &'static str {
        match self {
            Self::Concise => CONCISE_SYSTEM,
            Self::Review => REVIEW_SYSTEM,
        }
    }
}

pub struct PromptBuilder;

impl PromptBuilder {
    pub fn build(changes: &ChangeSet, style: PromptStyle) -> String {
        let mut parts: Vec<String> = vec![style.preamble().to_string()];

        if changes.has_diff() {
            parts.push("\nHere is the Git diff output for modified/deleted files:".into());
            parts.push("```diff".into());
            parts.push(changes.diff.clone());
            parts.push("```".into());
        } else {
            parts.push(format!("\n{NO_DIFF_MARKER}"));
        }

        if changes.has_untracked() {
            parts.push("\nAdditionally, the following files are newly created and untracked:".into());
            parts.extend(changes.untracked.iter().map(|f| format!("- `{f}`")));
            parts.push("\nPlease include these new files in your summary and explanation.".into());
        } else {
            parts.push(format!("\n{NO_UNTRACKED_MARKER}"));
        }

        parts.push(format!("\n{CLOSING_MARKER}"));
        parts.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sections_appear_in_order() {
        let changes = ChangeSet::new("diff --git a/a b/a\n+x", vec!["new.rs".into()]);
        let prompt = PromptBuilder::build(&changes, PromptStyle::Concise);

        let preamble = prompt.find("expert Git assistant").unwrap();
        let fence = prompt.find("```diff").unwrap();
        let list = prompt.find("- `new.rs`").unwrap();
        let closing = prompt.find(CLOSING_MARKER).unwrap();
        assert!(preamble < fence && fence < list && list < closing);
        assert!(prompt.ends_with(CLOSING_MARKER));
    }

    #[test]
    fn review_style_only_changes_instructions() {
        let changes = ChangeSet::new("+line", vec!["x.txt".into()]);
        let concise = PromptBuilder::build(&changes, PromptStyle::Concise);
        let review = PromptBuilder::build(&changes, PromptStyle::Review);

        assert!(review.contains("**Readiness:**"));
        assert!(!concise.contains("**Readiness:**"));
        assert_eq!(
            concise.strip_prefix(CONCISE_PREAMBLE),
            review.strip_prefix(REVIEW_PREAMBLE)
        );
    }
}
