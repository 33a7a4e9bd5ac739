// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

use std::io::{BufRead, IsTerminal};
use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use crate::cli::Cli;
use crate::config::{Config, ConfigPaths, HostOs};
use crate::domain::ChangeSet;
use crate::error::{Error, Result};
use crate::services::{
    credentials::{self, API_KEY_ENV, CredentialStore, EnvSource},
    git::GitService,
    llm,
    prompt::PromptBuilder,
    render,
};

const SEPARATOR_WIDTH: usize = 60;

pub struct App {
    cli: Cli,
    paths: ConfigPaths,
}

impl App {
    pub fn new(cli: Cli) -> Result<Self> {
        let paths = ConfigPaths::resolve(HostOs::current())?;
        Ok(Self::with_paths(cli, paths))
    }

    pub fn with_paths(cli: Cli, paths: ConfigPaths) -> Self {
        debug!(config_file = %paths.config_file.display(), "config path resolved");
        Self { cli, paths }
    }

    pub async fn run(&self) -> Result<()> {
        if self.cli.set_api_key {
            return self.set_api_key();
        }

        let config = Config::load(&self.cli, &self.paths)?;
        debug!(
            model = %config.model,
            style = %config.style,
            timeout_secs = config.timeout_secs,
            "config loaded"
        );

        self.explain_changes(&config).await
    }

    async fn explain_changes(&self, config: &Config) -> Result<()> {
        // Step 1: Collect tracked diff and untracked files
        let git = GitService::open(&self.cli.repo_dir)?;
        let changes = git.collect(&self.cli.effective_diff_args())?;
        debug!(
            diff_chars = changes.diff.len(),
            untracked = changes.untracked.len(),
            "changes collected"
        );

        if config.clear_screen && std::io::stdout().is_terminal() {
            console::Term::stdout().clear_screen().ok();
        }

        if changes.is_empty() {
            println!("No changes (tracked or untracked) found.");
            return Ok(());
        }

        // Step 2: Raw diff, if asked for
        if self.cli.with_diff || self.cli.diff_only {
            self.print_diff(&changes);
        }

        if self.cli.diff_only {
            return Ok(());
        }

        // Step 3: Credential, checked before any request is built
        let store = CredentialStore::new(&self.paths);
        let env = EnvSource::new(API_KEY_ENV);
        let api_key = credentials::resolve(&[&env, &store]).ok_or(Error::MissingCredential)?;

        // Step 4: Prompt
        let prompt = PromptBuilder::build(&changes, config.style);
        debug!(prompt_chars = prompt.len(), "prompt built");

        if self.cli.show_prompt {
            eprintln!("{}", style("--- PROMPT ---").dim());
            eprintln!("{}", prompt);
            eprintln!("{}", style("--- END PROMPT ---").dim());
        }

        // Step 5: Explanation
        let provider = llm::create_provider(config, api_key)?;
        let spinner = Self::spinner(&format!(
            "Asking {} ({}) for an explanation...",
            provider.name(),
            provider.model()
        ));
        let result = provider.explain(&prompt).await;
        spinner.finish_and_clear();

        let explanation = match result {
            Ok(text) => text,
            Err(e) => {
                eprintln!("\n{}", style("Failed to get AI explanation.").red().bold());
                return Err(e);
            }
        };

        // Step 6: Present
        println!("{}", style("--- Gitsplain ---").cyan().bold());
        println!("{}", style("--- AI Explanation ---").cyan());
        print!(
            "{}",
            render::render_markdown(&explanation, console::colors_enabled())
        );
        Ok(())
    }

    fn print_diff(&self, changes: &ChangeSet) {
        println!("{}", style("--- Original Git Diff ---").bold());
        if changes.has_diff() {
            println!(
                "{}",
                render::render_diff(&changes.diff, console::colors_enabled())
            );
        } else {
            println!("(No changes detected in tracked files for the specified diff command)");
        }

        if self.cli.with_diff {
            print!("\n{}\n", "=".repeat(SEPARATOR_WIDTH));
        }
    }

    fn set_api_key(&self) -> Result<()> {
        let key = if std::io::stdin().is_terminal() {
            dialoguer::Password::new()
                .with_prompt("Enter your OpenAI API key")
                .allow_empty_password(true)
                .interact()?
        } else {
            eprint!("Enter your OpenAI API key: ");
            let mut line = String::new();
            std::io::stdin().lock().read_line(&mut line)?;
            line
        };

        let key = key.trim();
        if key.is_empty() {
            return Err(Error::EmptyCredential);
        }

        let path = CredentialStore::new(&self.paths).write(key)?;
        eprintln!(
            "{} API key successfully stored in {}",
            style("✓").green().bold(),
            path.display()
        );
        Ok(())
    }

    fn spinner(message: &str) -> ProgressBar {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(Duration::from_millis(100));
        spinner
    }
}
