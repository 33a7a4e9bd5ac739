// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

use std::path::{Path, PathBuf};

use directories::BaseDirs;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use toml::{Table, Value};
use tracing::{debug, warn};

use crate::cli::Cli;
use crate::domain::PromptStyle;
use crate::error::{Error, Result};

/// Section of the config file owned by gitsplain. Settings and the API key both live here.
pub const CONFIG_SECTION: &str = "gitsplain";

const APP_DIR: &str = "gitsplain";
const CONFIG_FILE: &str = "config";

/// Operating system family, used to pick the config file convention
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostOs {
    Windows,
    MacOs,
    Unix,
}

impl HostOs {
    pub fn current() -> Self {
        Self::from_id(std::env::consts::OS)
    }

    /// Map an OS identifier as reported by `std::env::consts::OS`
    pub fn from_id(id: &str) -> Self {
        match id {
            "windows" => Self::Windows,
            "macos" => Self::MacOs,
            _ => Self::Unix,
        }
    }
}

/// Location of the config file for `os`, relative to the user's home directory
pub fn config_path(os: HostOs, home: &Path) -> PathBuf {
    let dir = match os {
        HostOs::Windows => home.join("AppData").join("Roaming"),
        HostOs::MacOs => home.join("Library").join("Application Support"),
        HostOs::Unix => home.join(".config"),
    };
    dir.join(APP_DIR).join(CONFIG_FILE)
}

/// How the config file on disk is written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Toml,
    /// INI-style `[section]` headers with unquoted `key = value` lines
    KeyValue,
}

/// Parse config file content, trying TOML first and the INI-style layout second.
///
/// Key-value files yield string values only. The error carries the TOML parse
/// failure, which is the more useful message for a hand-edited file.
pub fn parse_config_file(content: &str) -> std::result::Result<(Table, FileFormat), String> {
    match content.parse::<Table>() {
        Ok(table) => Ok((table, FileFormat::Toml)),
        Err(toml_err) => parse_key_value(content)
            .map(|table| (table, FileFormat::KeyValue))
            .map_err(|_| toml_err.to_string()),
    }
}

fn parse_key_value(content: &str) -> std::result::Result<Table, String> {
    let mut table = Table::new();
    let mut section: Option<String> = None;

    for (index, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }

        if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            let name = name.trim().to_string();
            table
                .entry(name.clone())
                .or_insert(Value::Table(Table::new()));
            section = Some(name);
            continue;
        }

        let Some(name) = section.as_deref() else {
            return Err(format!("line {}: entry outside of a section", index + 1));
        };
        let Some((key, value)) = line.split_once(['=', ':']) else {
            return Err(format!("line {}: expected 'key = value'", index + 1));
        };
        let key = key.trim().to_lowercase();
        if key.is_empty() {
            return Err(format!("line {}: empty key", index + 1));
        }

        if let Some(Value::Table(entries)) = table.get_mut(name) {
            entries.insert(key, Value::String(value.trim().to_string()));
        }
    }

    Ok(table)
}

/// Resolved once per invocation and handed to everything that touches the config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigPaths {
    pub config_file: PathBuf,
}

impl ConfigPaths {
    pub fn resolve(os: HostOs) -> Result<Self> {
        let base = BaseDirs::new()
            .ok_or_else(|| Error::Config("Cannot determine home directory".into()))?;
        Ok(Self::for_home(os, base.home_dir()))
    }

    pub fn for_home(os: HostOs, home: &Path) -> Self {
        Self {
            config_file: config_path(os, home),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default)]
    pub style: PromptStyle,

    /// Request timeout in seconds (default 300)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Base URL for OpenAI-compatible APIs (default: https://api.openai.com/v1)
    #[serde(default)]
    pub openai_base_url: Option<String>,

    /// Clear the terminal before printing results (default: true)
    #[serde(default = "default_true")]
    pub clear_screen: bool,
}

fn default_model() -> String {
    "gpt-4-turbo".into()
}
fn default_timeout_secs() -> u64 {
    300
}
fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: default_model(),
            style: PromptStyle::default(),
            timeout_secs: default_timeout_secs(),
            openai_base_url: None,
            clear_screen: true,
        }
    }
}

impl Config {
    /// Load with priority: CLI > ENV > config file `[gitsplain]` section > defaults
    pub fn load(cli: &Cli, paths: &ConfigPaths) -> Result<Self> {
        let mut config = Self::figment(&paths.config_file)
            .extract::<Config>()
            .map_err(|e| Error::Config(e.to_string()))?;

        config.apply_cli(cli);
        config.validate()?;
        Ok(config)
    }

    fn figment(config_file: &Path) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        // Top-level tables are profiles; only ours is selected, so foreign
        // sections in the same file are ignored.
        if let Some(content) = Self::read_settings(config_file) {
            figment = figment.merge(Toml::string(&content).nested());
        }

        // GITSPLAIN_MODEL, GITSPLAIN_TIMEOUT_SECS, ...
        figment
            .merge(Env::prefixed("GITSPLAIN_").global())
            .select(CONFIG_SECTION)
    }

    /// TOML content of the config file, or `None` when there are no settings to read.
    /// A damaged file is logged and skipped.
    fn read_settings(config_file: &Path) -> Option<String> {
        if !config_file.exists() {
            return None;
        }

        let content = match std::fs::read_to_string(config_file) {
            Ok(content) => content,
            Err(e) => {
                warn!(path = %config_file.display(), error = %e, "could not read config file, using defaults");
                return None;
            }
        };

        match parse_config_file(&content) {
            Ok((_, FileFormat::Toml)) => Some(content),
            Ok((_, FileFormat::KeyValue)) => {
                debug!(path = %config_file.display(), "key-value config file, settings not read");
                None
            }
            Err(e) => {
                warn!(path = %config_file.display(), error = %e, "config file is not valid TOML, using defaults");
                None
            }
        }
    }

    fn apply_cli(&mut self, cli: &Cli) {
        if let Some(ref m) = cli.model {
            self.model = m.clone();
        }
        if let Some(style) = cli.style {
            self.style = style;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.model.trim().is_empty() {
            return Err(Error::Config("model cannot be empty".into()));
        }

        if !(1..=3600).contains(&self.timeout_secs) {
            return Err(Error::Config(format!(
                "timeout_secs must be 1–3600, got {}",
                self.timeout_secs
            )));
        }

        if let Some(ref base) = self.openai_base_url {
            let parsed = url::Url::parse(base).map_err(|e| {
                Error::Config(format!("openai_base_url is not a valid URL '{base}': {e}"))
            })?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(Error::Config(format!(
                    "openai_base_url must start with http:// or https://, got '{base}'"
                )));
            }
        }

        Ok(())
    }
}
