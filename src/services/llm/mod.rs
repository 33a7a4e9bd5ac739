// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

use async_trait::async_trait;
use secrecy::SecretString;

pub mod openai;

use crate::config::Config;
use crate::error::Result;

/// Returned in place of a blank completion
pub const EMPTY_RESPONSE: &str = "AI returned an empty response.";

#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// One request, no retry. Returns trimmed text or a classified failure.
    async fn explain(&self, prompt: &str) -> Result<String>;

    fn name(&self) -> &str;

    fn model(&self) -> &str;
}

pub fn create_provider(config: &Config, api_key: SecretString) -> Result<Box<dyn LlmProvider>> {
    Ok(Box::new(openai::OpenAiProvider::new(config, api_key)?))
}

/// Trim a completion, substituting the placeholder for blank output
pub fn finish_text(content: Option<&str>) -> String {
    match content.map(str::trim) {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => EMPTY_RESPONSE.to_string(),
    }
}
