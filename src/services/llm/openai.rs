// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{LlmProvider, finish_text};
use crate::config::Config;
use crate::domain::PromptStyle;
use crate::error::{Error, Result};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Longest error body kept in a `ServiceError`
const MAX_ERROR_BODY: usize = 500;

pub struct OpenAiProvider {
    client: Client,
    base_url: String,
    model: String,
    api_key: SecretString,
    style: PromptStyle,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    stream: bool,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

impl OpenAiProvider {
    /// Fails when the HTTP client cannot be built, so a request never runs without its timeout.
    pub fn new(config: &Config, api_key: SecretString) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config
                .openai_base_url
                .clone()
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            model: config.model.clone(),
            api_key,
            style: config.style,
        })
    }

    fn classify_transport(e: &reqwest::Error) -> Error {
        if e.is_timeout() {
            Error::Timeout
        } else if e.is_connect() || e.is_request() {
            Error::ConnectionFailed(e.to_string())
        } else {
            Error::Unexpected(e.to_string())
        }
    }

    fn classify_status(status: StatusCode, body: String) -> Error {
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Error::AuthenticationFailed,
            StatusCode::TOO_MANY_REQUESTS => Error::RateLimited,
            _ => Error::ServiceError {
                status: status.as_u16(),
                body: body.chars().take(MAX_ERROR_BODY).collect(),
            },
        }
    }
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    async fn explain(&self, prompt: &str) -> Result<String> {
        let url = format!("{}/chat/completions", self.base_url);
        debug!(url = %url, model = %self.model, prompt_chars = prompt.len(), "sending request");

        let response = self
            .client
            .post(&url)
            .bearer_auth(self.api_key.expose_secret())
            .json(&ChatRequest {
                model: &self.model,
                messages: vec![
                    Message {
                        role: "system",
                        content: self.style.system_prompt(),
                    },
                    Message {
                        role: "user",
                        content: prompt,
                    },
                ],
                stream: false,
            })
            .send()
            .await
            .map_err(|e| Self::classify_transport(&e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Self::classify_status(status, body));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| Self::classify_transport(&e))?;
        let parsed: ChatResponse = serde_json::from_slice(&body)
            .map_err(|e| Error::Unexpected(format!("malformed response: {e}")))?;

        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| Error::Unexpected("response contained no choices".into()))?;

        debug!("explanation received");
        Ok(finish_text(choice.message.content.as_deref()))
    }

    fn name(&self) -> &str {
        "openai"
    }

    fn model(&self) -> &str {
        &self.model
    }
}
