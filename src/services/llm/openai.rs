// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

use std::time::Duration;

use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::config::Config;
use crate::error::Result;

use super::{ResponseSchema, SYSTEM_PROMPT, TEMPERATURE, generation_error, request_error};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const NAME: &str = "openai";

pub struct OpenAiProvider {
    client: Client,
    base_url: String,
    model: String,
    api_key: SecretString,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    temperature: f32,
    response_format: ResponseFormat<'a>,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct ResponseFormat<'a> {
    #[serde(rename = "type")]
    format_type: &'static str,
    json_schema: JsonSchemaFormat<'a>,
}

#[derive(Serialize)]
struct JsonSchemaFormat<'a> {
    name: &'a str,
    description: &'a str,
    strict: bool,
    schema: &'a Value,
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
    refusal: Option<String>,
}

impl OpenAiProvider {
    pub fn new(config: &Config, api_key: SecretString) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_default();

        Self {
            client,
            base_url: config
                .base_url
                .clone()
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            model: config.model.clone(),
            api_key,
        }
    }

    pub async fn generate_structured(
        &self,
        prompt: &str,
        schema: &ResponseSchema,
    ) -> Result<Value> {
        let url = format!("{}/chat/completions", self.base_url);
        debug!(model = %self.model, prompt_chars = prompt.len(), "openai request");

        let response = self
            .client
            .post(&url)
            .header(
                "Authorization",
                format!("Bearer {}", self.api_key.expose_secret()),
            )
            .json(&ChatRequest {
                model: &self.model,
                messages: vec![
                    Message {
                        role: "system",
                        content: SYSTEM_PROMPT,
                    },
                    Message {
                        role: "user",
                        content: prompt,
                    },
                ],
                temperature: TEMPERATURE,
                response_format: ResponseFormat {
                    format_type: "json_schema",
                    json_schema: JsonSchemaFormat {
                        name: schema.name,
                        description: schema.description,
                        strict: true,
                        schema: &schema.schema,
                    },
                },
            })
            .send()
            .await
            .map_err(|e| request_error(NAME, e))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(generation_error(NAME, format!("HTTP {status}: {body}")));
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| generation_error(NAME, format!("malformed response: {e}")))?;

        let Some(choice) = body.choices.into_iter().next() else {
            return Err(generation_error(NAME, "response contained no choices"));
        };

        if let Some(refusal) = choice.message.refusal {
            return Err(generation_error(NAME, format!("model refused: {refusal}")));
        }

        let content = choice
            .message
            .content
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| generation_error(NAME, "response contained no content"))?;

        debug!(content_chars = content.len(), "openai response");

        serde_json::from_str(&content)
            .map_err(|e| generation_error(NAME, format!("response is not valid JSON: {e}")))
    }

    pub fn name(&self) -> &str {
        NAME
    }
}
