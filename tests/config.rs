// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

use clap::Parser;
use gitsplain::cli::Cli;
use gitsplain::config::{Config, ConfigPaths, HostOs};
use gitsplain::domain::PromptStyle;
use gitsplain::error::Error;

fn write_config(home: &tempfile::TempDir, content: &str) -> ConfigPaths {
    let paths = ConfigPaths::for_home(HostOs::Unix, home.path());
    std::fs::create_dir_all(paths.config_file.parent().unwrap()).unwrap();
    std::fs::write(&paths.config_file, content).unwrap();
    paths
}

// ─── Default values ──────────────────────────────────────────────────────────

#[test]
fn default_config_values() {
    let config = Config::default();
    assert_eq!(config.model, "gpt-4-turbo");
    assert_eq!(config.style, PromptStyle::Concise);
    assert_eq!(config.timeout_secs, 300);
    assert!(config.openai_base_url.is_none());
    assert!(config.clear_screen);
}

// ─── TOML deserialization ────────────────────────────────────────────────────

#[test]
fn load_from_valid_toml() {
    let toml_str = r#"
model = "gpt-4o"
style = "review"
timeout_secs = 60
openai_base_url = "http://localhost:8080/v1"
clear_screen = false
"#;
    let config: Config = toml::from_str(toml_str).unwrap();
    assert_eq!(config.model, "gpt-4o");
    assert_eq!(config.style, PromptStyle::Review);
    assert_eq!(config.timeout_secs, 60);
    assert_eq!(
        config.openai_base_url.as_deref(),
        Some("http://localhost:8080/v1")
    );
    assert!(!config.clear_screen);
}

#[test]
fn empty_toml_uses_all_defaults() {
    let config: Config = toml::from_str("").unwrap();
    let default = Config::default();
    assert_eq!(config.model, default.model);
    assert_eq!(config.style, default.style);
    assert_eq!(config.timeout_secs, default.timeout_secs);
}

#[test]
fn unknown_style_is_rejected() {
    let result: std::result::Result<Config, _> = toml::from_str(r#"style = "haiku""#);
    assert!(result.is_err());
}

// ─── Layered loading ─────────────────────────────────────────────────────────

#[test]
fn missing_file_loads_defaults() {
    let home = tempfile::tempdir().unwrap();
    let paths = ConfigPaths::for_home(HostOs::Unix, home.path());
    let cli = Cli::parse_from(["gitsplain"]);

    let config = Config::load(&cli, &paths).unwrap();
    assert_eq!(config.model, Config::default().model);
}

#[test]
fn file_section_is_applied_and_api_key_ignored() {
    let home = tempfile::tempdir().unwrap();
    let paths = write_config(
        &home,
        "[gitsplain]\napi_key = \"sk-secret\"\nmodel = \"gpt-4o-mini\"\nstyle = \"review\"\n\n[unrelated]\nmodel = \"nope\"\n",
    );
    let cli = Cli::parse_from(["gitsplain"]);

    let config = Config::load(&cli, &paths).unwrap();
    assert_eq!(config.model, "gpt-4o-mini");
    assert_eq!(config.style, PromptStyle::Review);
}

#[test]
fn cli_overrides_file() {
    let home = tempfile::tempdir().unwrap();
    let paths = write_config(&home, "[gitsplain]\nmodel = \"gpt-4o-mini\"\n");
    let cli = Cli::parse_from(["gitsplain", "--model", "gpt-4.1", "--style", "concise"]);

    let config = Config::load(&cli, &paths).unwrap();
    assert_eq!(config.model, "gpt-4.1");
    assert_eq!(config.style, PromptStyle::Concise);
}

#[test]
fn invalid_file_values_fail_validation() {
    let home = tempfile::tempdir().unwrap();
    let paths = write_config(&home, "[gitsplain]\ntimeout_secs = 0\n");
    let cli = Cli::parse_from(["gitsplain"]);

    assert!(matches!(
        Config::load(&cli, &paths),
        Err(Error::Config(_))
    ));
}

#[test]
fn unparsable_file_falls_back_to_defaults() {
    let home = tempfile::tempdir().unwrap();
    let paths = write_config(&home, "[gitsplain\nmodel =");
    let cli = Cli::parse_from(["gitsplain", "--model", "gpt-4o-mini"]);

    let config = Config::load(&cli, &paths).unwrap();
    assert_eq!(config.model, "gpt-4o-mini");
    assert_eq!(config.timeout_secs, Config::default().timeout_secs);
}

#[test]
fn key_value_file_loads_defaults() {
    let home = tempfile::tempdir().unwrap();
    let paths = write_config(&home, "[gitsplain]\napi_key = sk-legacy\n");
    let cli = Cli::parse_from(["gitsplain"]);

    let config = Config::load(&cli, &paths).unwrap();
    assert_eq!(config.model, Config::default().model);
    assert_eq!(config.style, PromptStyle::Concise);
}

#[test]
fn wrongly_typed_value_is_a_config_error() {
    let home = tempfile::tempdir().unwrap();
    let paths = write_config(&home, "[gitsplain]\ntimeout_secs = \"soon\"\n");
    let cli = Cli::parse_from(["gitsplain"]);

    assert!(matches!(
        Config::load(&cli, &paths),
        Err(Error::Config(_))
    ));
}
