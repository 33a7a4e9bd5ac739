// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{CommandFactory, Parser};

use crate::domain::PromptStyle;

const EXAMPLES: &str = "\
Examples:
  # Explain all current changes (tracked & untracked) vs HEAD
  gitsplain

  # Explain staged changes only
  gitsplain --staged

  # Explain changes between two commits
  gitsplain HEAD~1 HEAD

  # Show diff AND explain all current changes vs HEAD
  gitsplain --with-diff

  # Only show diff for changes vs HEAD
  gitsplain --diff-only HEAD

  # Specify a different repository and model
  gitsplain -d /path/to/my/repo --model gpt-4o-mini

  # Store the API key in the config file
  gitsplain --set-api-key";

#[derive(Parser, Debug)]
#[command(name = "gitsplain")]
#[command(version)]
#[command(about = "Make your git diffs make sense", long_about = None)]
#[command(after_help = EXAMPLES)]
pub struct Cli {
    /// Path to the git repository directory
    #[arg(short = 'd', long, default_value = ".")]
    pub repo_dir: PathBuf,

    /// Arguments passed to `git diff` (commits, paths, --staged). Default: HEAD
    ///
    /// gitsplain's own flags are recognised anywhere; put git arguments after
    /// `--` when they collide with one of them.
    #[arg(value_name = "DIFF_ARGS")]
    pub diff_args: Vec<String>,

    /// OpenAI model used for the explanation
    #[arg(short, long)]
    pub model: Option<String>,

    /// Prompt style
    #[arg(short, long, value_enum)]
    pub style: Option<PromptStyle>,

    /// Show the original diff before the explanation
    #[arg(long, conflicts_with = "diff_only")]
    pub with_diff: bool,

    /// Show only the original diff, skip the explanation
    #[arg(long)]
    pub diff_only: bool,

    /// Show the prompt sent to the API
    #[arg(long)]
    pub show_prompt: bool,

    /// Prompt for the OpenAI API key and store it in the config file
    #[arg(long)]
    pub set_api_key: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Parse process arguments, letting unknown flags through to `git diff`
    pub fn parse_args<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        Self::parse_from(split_passthrough(args))
    }

    /// Arguments for `git diff`, falling back to `HEAD`
    pub fn effective_diff_args(&self) -> Vec<String> {
        if self.diff_args.is_empty() {
            vec!["HEAD".to_string()]
        } else {
            self.diff_args.clone()
        }
    }
}

/// Reorder `args` so clap only sees gitsplain's own flags before `--`.
///
/// Anything clap does not know (commits, paths, `--staged`, `-U5`) moves
/// behind a `--` in its original order, so own flags may appear anywhere.
fn split_passthrough<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let command = Cli::command();
    let known = |arg: &clap::Arg, long: Option<&str>, short: Option<char>| {
        (long.is_some() && arg.get_long() == long) || (short.is_some() && arg.get_short() == short)
    };
    // `Some(takes_value)` for an own flag, `None` for a passthrough token
    let lookup = |long: Option<&str>, short: Option<char>| -> Option<bool> {
        if matches!(long, Some("help" | "version")) || matches!(short, Some('h' | 'V')) {
            return Some(false);
        }
        command
            .get_arguments()
            .filter(|arg| !arg.is_positional())
            .find(|arg| known(arg, long, short))
            .map(|arg| arg.get_action().takes_values())
    };

    let mut args = args.into_iter().map(Into::<OsString>::into);
    let mut own: Vec<OsString> = args.next().into_iter().collect();
    let mut passthrough = Vec::new();

    while let Some(token) = args.next() {
        let Some(text) = token.to_str() else {
            passthrough.push(token);
            continue;
        };

        if text == "--" {
            passthrough.extend(args.by_ref());
            break;
        }

        let takes_value = if let Some(long) = text.strip_prefix("--") {
            let (name, inline) = match long.split_once('=') {
                Some((name, _)) => (name, true),
                None => (long, false),
            };
            lookup(Some(name), None).map(|takes| takes && !inline)
        } else if let Some(short) = text.strip_prefix('-') {
            let mut chars = short.chars();
            match (chars.next(), chars.as_str()) {
                (Some(c), rest) => lookup(None, Some(c)).map(|takes| takes && rest.is_empty()),
                (None, _) => None,
            }
        } else {
            None
        };

        match takes_value {
            Some(takes_value) => {
                own.push(token);
                if takes_value && let Some(value) = args.next() {
                    own.push(value);
                }
            }
            None => passthrough.push(token),
        }
    }

    if !passthrough.is_empty() {
        own.push("--".into());
        own.extend(passthrough);
    }
    own
}
