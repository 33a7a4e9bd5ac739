// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use secrecy::SecretString;
use tempfile::NamedTempFile;
use toml::{Table, Value};
use tracing::{debug, warn};

use crate::config::{CONFIG_SECTION, ConfigPaths, FileFormat, parse_config_file};
use crate::error::{Error, Result};

pub const API_KEY_ENV: &str = "OPENAI_API_KEY";
const API_KEY_FIELD: &str = "api_key";

/// One place a credential may come from.
pub trait CredentialSource {
    fn name(&self) -> &str;
    fn fetch(&self) -> Option<String>;
}

/// Environment variable source
pub struct EnvSource {
    var: &'static str,
}

impl EnvSource {
    pub fn new(var: &'static str) -> Self {
        Self { var }
    }
}

impl CredentialSource for EnvSource {
    fn name(&self) -> &str {
        self.var
    }

    fn fetch(&self) -> Option<String> {
        std::env::var(self.var).ok()
    }
}

/// Walk `sources` in order and return the first non-blank value.
pub fn resolve(sources: &[&dyn CredentialSource]) -> Option<SecretString> {
    sources.iter().find_map(|source| {
        let value = source.fetch()?;
        let value = value.trim();
        if value.is_empty() {
            return None;
        }
        debug!(source = source.name(), "credential resolved");
        Some(SecretString::from(value.to_string()))
    })
}

/// API key persisted in the `[gitsplain]` section of the config file.
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    pub fn new(paths: &ConfigPaths) -> Self {
        Self::at(paths.config_file.clone())
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored key, if any. A missing file is silent; an unreadable one warns.
    ///
    /// INI-style files with an unquoted `api_key = ...` line are read too.
    pub fn read(&self) -> Option<String> {
        if !self.path.exists() {
            return None;
        }

        let table = match Self::load(&self.path) {
            Ok((table, _)) => table,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "could not read config file");
                return None;
            }
        };

        table
            .get(CONFIG_SECTION)?
            .get(API_KEY_FIELD)?
            .as_str()
            .map(str::to_string)
    }

    /// Store `secret`, keeping every other section and key in the file.
    ///
    /// A key-value file is rewritten as TOML; its values are kept as strings.
    pub fn write(&self, secret: &str) -> Result<PathBuf> {
        let fail = |message: String| Error::CredentialWrite {
            path: self.path.clone(),
            message,
        };

        let dir = self
            .path
            .parent()
            .ok_or_else(|| fail("config path has no parent directory".into()))?;
        fs::create_dir_all(dir).map_err(|e| fail(e.to_string()))?;

        let mut table = if self.path.exists() {
            let (table, format) = Self::load(&self.path).map_err(fail)?;
            if format == FileFormat::KeyValue {
                debug!(path = %self.path.display(), "converting key-value config file to TOML");
            }
            table
        } else {
            Table::new()
        };

        let section = table
            .entry(CONFIG_SECTION)
            .or_insert(Value::Table(Table::new()))
            .as_table_mut()
            .ok_or_else(|| fail(format!("'{CONFIG_SECTION}' is not a table")))?;
        section.insert(API_KEY_FIELD.into(), Value::String(secret.to_string()));

        let content = toml::to_string(&table).map_err(|e| fail(e.to_string()))?;

        // Write next to the target and rename so a failed write never truncates the old file
        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| fail(e.to_string()))?;
        tmp.write_all(content.as_bytes())
            .map_err(|e| fail(e.to_string()))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(tmp.path(), fs::Permissions::from_mode(0o600))
                .map_err(|e| fail(e.to_string()))?;
        }

        tmp.persist(&self.path)
            .map_err(|e| fail(e.error.to_string()))?;

        debug!(path = %self.path.display(), "api key stored");
        Ok(self.path.clone())
    }

    fn load(path: &Path) -> std::result::Result<(Table, FileFormat), String> {
        let content = fs::read_to_string(path).map_err(|e| e.to_string())?;
        parse_config_file(&content)
    }
}

impl CredentialSource for CredentialStore {
    fn name(&self) -> &str {
        "config file"
    }

    fn fetch(&self) -> Option<String> {
        self.read()
    }
}
