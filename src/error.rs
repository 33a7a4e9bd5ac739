// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

// miette's Diagnostic derive generates code that triggers this false positive
#![allow(unused_assignments)]

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    #[error("Path '{}' is not a directory", path.display())]
    #[diagnostic(
        code(gitsplain::git::not_dir),
        help("Pass an existing directory with --repo-dir")
    )]
    NotADirectory { path: PathBuf },

    #[error("Path '{}' is not a git repository", path.display())]
    #[diagnostic(
        code(gitsplain::git::not_repo),
        help("Run this command inside a git repository or pass --repo-dir")
    )]
    NotARepository { path: PathBuf },

    #[error("Git is not installed or not found in PATH")]
    #[diagnostic(
        code(gitsplain::git::not_found),
        help("Install git and make sure it is on your PATH")
    )]
    ToolNotFound,

    /// Non-zero exit from `git diff`. Logged, never fatal.
    #[error("Git command `{command}` exited with {status}: {stderr}")]
    #[diagnostic(code(gitsplain::git::command_failed))]
    VcsCommandFailed {
        command: String,
        status: String,
        stderr: String,
    },

    #[error("Git error: {0}")]
    #[diagnostic(code(gitsplain::git::error))]
    Git(String),

    #[error("OpenAI API key not found")]
    #[diagnostic(
        code(gitsplain::credential::missing),
        help(
            "Set the OPENAI_API_KEY environment variable or store a key with: gitsplain --set-api-key"
        )
    )]
    MissingCredential,

    #[error("No API key entered")]
    #[diagnostic(code(gitsplain::credential::empty))]
    EmptyCredential,

    #[error("Failed to write config file {}: {message}", path.display())]
    #[diagnostic(
        code(gitsplain::credential::write),
        help("Fix or delete the config file, then run: gitsplain --set-api-key")
    )]
    CredentialWrite { path: PathBuf, message: String },

    #[error("OpenAI API key is invalid or missing")]
    #[diagnostic(
        code(gitsplain::api::auth),
        help("Check your OPENAI_API_KEY environment variable or run: gitsplain --set-api-key")
    )]
    AuthenticationFailed,

    #[error("OpenAI API rate limit exceeded")]
    #[diagnostic(
        code(gitsplain::api::rate_limited),
        help("Check your OpenAI plan and usage, or wait before trying again")
    )]
    RateLimited,

    #[error("Failed to connect to OpenAI API: {0}")]
    #[diagnostic(code(gitsplain::api::connection))]
    ConnectionFailed(String),

    #[error("OpenAI API request timed out")]
    #[diagnostic(
        code(gitsplain::api::timeout),
        help("Raise timeout_secs in the config file or GITSPLAIN_TIMEOUT_SECS")
    )]
    Timeout,

    #[error("OpenAI API returned an error status: {status} - {body}")]
    #[diagnostic(code(gitsplain::api::status))]
    ServiceError { status: u16, body: String },

    #[error("An unexpected error occurred during OpenAI API call: {0}")]
    #[diagnostic(code(gitsplain::api::unexpected))]
    Unexpected(String),

    #[error("Configuration error: {0}")]
    #[diagnostic(code(gitsplain::config::error))]
    Config(String),

    #[error("Dialog error: {0}")]
    Dialog(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<dialoguer::Error> for Error {
    fn from(e: dialoguer::Error) -> Self {
        Error::Dialog(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
