// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tracing::{debug, warn};

use crate::domain::ChangeSet;
use crate::error::{Error, Result};

pub struct GitService {
    work_dir: PathBuf,
}

impl GitService {
    /// Validate `path` before any git process is spawned.
    pub fn open(path: &Path) -> Result<Self> {
        if !path.is_dir() {
            return Err(Error::NotADirectory {
                path: path.to_path_buf(),
            });
        }

        // `.git` is a file for worktrees and submodules
        if !path.join(".git").exists() {
            return Err(Error::NotARepository {
                path: path.to_path_buf(),
            });
        }

        let work_dir = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        Ok(Self { work_dir })
    }

    /// Diff text plus untracked files. Fails only when neither could be read.
    pub fn collect(&self, diff_args: &[String]) -> Result<ChangeSet> {
        let diff = self.diff(diff_args)?;
        let untracked = self.untracked_files()?;

        if diff.is_none() && untracked.is_none() {
            return Err(Error::Git("failed to get information from git".into()));
        }

        Ok(ChangeSet::new(
            diff.unwrap_or_default(),
            untracked.unwrap_or_default(),
        ))
    }

    /// Run `git diff <args>`.
    ///
    /// A non-zero exit is logged and whatever stdout git produced is still
    /// returned; `None` means git failed without printing anything.
    pub fn diff(&self, args: &[String]) -> Result<Option<String>> {
        let mut command = vec!["diff".to_string(), "--no-ext-diff".to_string()];
        command.extend(args.iter().cloned());

        let output = self.run(&command)?;
        let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();

        if !output.status.success() {
            let failure = Error::VcsCommandFailed {
                command: format!("git {}", command.join(" ")),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            };
            warn!("{failure}");
            return Ok((!stdout.is_empty()).then_some(stdout));
        }

        Ok(Some(stdout))
    }

    /// Untracked files in `git status` order. `None` when git status fails.
    pub fn untracked_files(&self) -> Result<Option<Vec<String>>> {
        let command = ["status", "--porcelain=v1", "--untracked-files=all"].map(String::from);
        let output = self.run(&command)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!(status = %output.status, "'git status' failed: {}", stderr.trim());
            return Ok(None);
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(Some(parse_untracked(&stdout)))
    }

    fn run(&self, args: &[String]) -> Result<Output> {
        debug!(
            command = %format!("git {}", args.join(" ")),
            dir = %self.work_dir.display(),
            "running git"
        );

        Command::new("git")
            .args(args)
            .current_dir(&self.work_dir)
            .output()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => Error::ToolNotFound,
                _ => Error::Io(e),
            })
    }
}

/// Extract `??` entries from `git status --porcelain=v1` output.
pub fn parse_untracked(porcelain: &str) -> Vec<String> {
    porcelain
        .lines()
        .filter_map(|line| line.strip_prefix("?? "))
        .map(|path| unquote_path(path.trim_end_matches('\r')))
        .collect()
}

/// Undo git's C-style path quoting (`core.quotePath`).
///
/// Unquoted input is returned as is. Octal escapes are raw bytes, so a
/// UTF-8 name arrives as several `\ooo` sequences that only decode together.
pub fn unquote_path(raw: &str) -> String {
    let Some(inner) = raw
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
    else {
        return raw.to_string();
    };

    let bytes = inner.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        if b != b'\\' || i + 1 >= bytes.len() {
            out.push(b);
            i += 1;
            continue;
        }

        let next = bytes[i + 1];
        let simple = match next {
            b'a' => Some(0x07),
            b'b' => Some(0x08),
            b't' => Some(b'\t'),
            b'n' => Some(b'\n'),
            b'v' => Some(0x0b),
            b'f' => Some(0x0c),
            b'r' => Some(b'\r'),
            b'"' => Some(b'"'),
            b'\\' => Some(b'\\'),
            _ => None,
        };

        if let Some(decoded) = simple {
            out.push(decoded);
            i += 2;
            continue;
        }

        match octal_byte(&bytes[i + 1..]) {
            Some(decoded) => {
                out.push(decoded);
                i += 4;
            }
            None => {
                // Unknown escape, keep it literally
                out.push(b);
                i += 1;
            }
        }
    }

    String::from_utf8_lossy(&out).into_owned()
}

fn octal_byte(digits: &[u8]) -> Option<u8> {
    let digits = digits.get(..3)?;
    if !digits.iter().all(|d| (b'0'..=b'7').contains(d)) {
        return None;
    }
    let value = digits
        .iter()
        .fold(0u16, |acc, d| acc * 8 + u16::from(d - b'0'));
    u8::try_from(value).ok()
}
