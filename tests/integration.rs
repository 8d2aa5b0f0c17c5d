// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

//! Integration tests for the suggestion pipeline against mocked providers.
//!
//! Uses `wiremock` so no real API keys or network access are needed.

mod helpers;

use std::time::Duration;

use serde_json::{Value, json};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use gitmoji_msg::config::{Config, Provider};
use gitmoji_msg::domain::ChangeFactSheet;
use gitmoji_msg::error::Error;
use gitmoji_msg::services::analyzer::ChangeAnalyzer;
use gitmoji_msg::services::suggest::{MAX_SUGGESTIONS, SuggestionRequester, truncate_diff};

use helpers::file_diff;

// ─── Test helpers ────────────────────────────────────────────────────────────

fn openai_config(server_url: &str) -> Config {
    Config {
        provider: Provider::OpenAI,
        model: "gpt-4o-mini".into(),
        base_url: Some(server_url.to_string()),
        api_key: Some("test-key".into()),
        timeout_secs: 5,
        ..Config::default()
    }
}

fn anthropic_config(server_url: &str) -> Config {
    Config {
        provider: Provider::Anthropic,
        model: "claude-3-5-haiku-latest".into(),
        base_url: Some(format!("{server_url}/v1")),
        api_key: Some("test-key".into()),
        timeout_secs: 5,
        ..Config::default()
    }
}

fn sample_sheet() -> ChangeFactSheet {
    ChangeAnalyzer::analyze(&file_diff(
        "src/auth.rs",
        &["pub fn login(user: &str) -> Token {", "    mint_token(user)", "}"],
        &["// TODO login"],
    ))
    .unwrap()
}

fn suggestions() -> Value {
    json!({
        "suggestions": [
            {
                "gitmoji": "✨",
                "gitmojiCode": ":sparkles:",
                "scope": "auth",
                "message": "add login endpoint",
                "description": "Issues a token for the given user.",
                "confidence": 92
            },
            {
                "gitmoji": "♻️",
                "gitmojiCode": ":recycle:",
                "scope": null,
                "message": "restructure auth module",
                "description": "  ",
                "confidence": 40
            }
        ]
    })
}

fn openai_body(content: &str) -> Value {
    json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content, "refusal": null },
            "finish_reason": "stop"
        }]
    })
}

fn anthropic_body(input: Value) -> Value {
    json!({
        "id": "msg_1",
        "type": "message",
        "role": "assistant",
        "content": [
            { "type": "text", "text": "Here are the suggestions." },
            { "type": "tool_use", "id": "toolu_1", "name": "commit_suggestions", "input": input }
        ],
        "stop_reason": "tool_use"
    })
}

fn assert_generation_error(err: Error, provider: &str, needle: &str) {
    match err {
        Error::Generation {
            provider: p,
            message,
        } => {
            assert_eq!(p, provider);
            assert!(
                message.contains(needle),
                "expected '{needle}' in message, got: {message}"
            );
        }
        other => panic!("expected Generation error, got: {other:?}"),
    }
}

// ─── OpenAI ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn openai_returns_ranked_candidates() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_partial_json(json!({
            "model": "gpt-4o-mini",
            "response_format": {
                "type": "json_schema",
                "json_schema": { "name": "commit_suggestions", "strict": true }
            }
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(openai_body(&suggestions().to_string())),
        )
        .expect(1)
        .mount(&server)
        .await;

    let requester = SuggestionRequester::from_config(&openai_config(&server.uri())).unwrap();
    assert_eq!(requester.provider_name(), "openai");

    let candidates = requester.request(&sample_sheet()).await.unwrap();

    assert_eq!(candidates.len(), 2);
    assert_eq!(candidates[0].gitmoji_code, ":sparkles:");
    assert_eq!(candidates[0].scope.as_deref(), Some("auth"));
    assert_eq!(candidates[0].confidence, 92);
    assert_eq!(candidates[1].message, "restructure auth module");
    assert!(candidates[1].scope.is_none());
    assert!(
        candidates[1].description.is_none(),
        "blank description is normalized away"
    );
}

#[tokio::test]
async fn openai_http_error_carries_status_and_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
        .mount(&server)
        .await;

    let requester = SuggestionRequester::from_config(&openai_config(&server.uri())).unwrap();
    let err = requester.request(&sample_sheet()).await.unwrap_err();

    assert_generation_error(err, "openai", "401");
}

#[tokio::test]
async fn openai_refusal_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{
                "message": {
                    "role": "assistant",
                    "content": null,
                    "refusal": "I can't help with that."
                }
            }]
        })))
        .mount(&server)
        .await;

    let requester = SuggestionRequester::from_config(&openai_config(&server.uri())).unwrap();
    let err = requester.request(&sample_sheet()).await.unwrap_err();

    assert_generation_error(err, "openai", "refused");
}

#[tokio::test]
async fn openai_non_json_content_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(openai_body("✨ add stuff")))
        .mount(&server)
        .await;

    let requester = SuggestionRequester::from_config(&openai_config(&server.uri())).unwrap();
    let err = requester.request(&sample_sheet()).await.unwrap_err();

    assert_generation_error(err, "openai", "not valid JSON");
}

#[tokio::test]
async fn openai_malformed_envelope_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
        .mount(&server)
        .await;

    let requester = SuggestionRequester::from_config(&openai_config(&server.uri())).unwrap();
    let err = requester.request(&sample_sheet()).await.unwrap_err();

    assert_generation_error(err, "openai", "malformed response");
}

#[tokio::test]
async fn openai_timeout_is_reported() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(openai_body(&suggestions().to_string()))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let config = Config {
        timeout_secs: 1,
        ..openai_config(&server.uri())
    };
    let requester = SuggestionRequester::from_config(&config).unwrap();
    let err = requester.request(&sample_sheet()).await.unwrap_err();

    assert_generation_error(err, "openai", "timed out");
}

// ─── Anthropic ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn anthropic_reads_forced_tool_input() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .and(header("x-api-key", "test-key"))
        .and(header("anthropic-version", "2023-06-01"))
        .and(body_partial_json(json!({
            "model": "claude-3-5-haiku-latest",
            "tool_choice": { "type": "tool", "name": "commit_suggestions" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(anthropic_body(suggestions())))
        .expect(1)
        .mount(&server)
        .await;

    let requester = SuggestionRequester::from_config(&anthropic_config(&server.uri())).unwrap();
    assert_eq!(requester.provider_name(), "anthropic");

    let candidates = requester.request(&sample_sheet()).await.unwrap();
    assert_eq!(candidates.len(), 2);
    assert_eq!(candidates[0].gitmoji, "✨");
}

#[tokio::test]
async fn anthropic_without_tool_call_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": [{ "type": "text", "text": "✨ add login" }]
        })))
        .mount(&server)
        .await;

    let requester = SuggestionRequester::from_config(&anthropic_config(&server.uri())).unwrap();
    let err = requester.request(&sample_sheet()).await.unwrap_err();

    assert_generation_error(err, "anthropic", "no tool call");
}

#[tokio::test]
async fn anthropic_server_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(529).set_body_string("overloaded"))
        .mount(&server)
        .await;

    let requester = SuggestionRequester::from_config(&anthropic_config(&server.uri())).unwrap();
    let err = requester.request(&sample_sheet()).await.unwrap_err();

    assert_generation_error(err, "anthropic", "overloaded");
}

#[tokio::test]
async fn anthropic_schema_mismatch_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(anthropic_body(json!({ "suggestions": [{ "message": "x" }] }))),
        )
        .mount(&server)
        .await;

    let requester = SuggestionRequester::from_config(&anthropic_config(&server.uri())).unwrap();
    let err = requester.request(&sample_sheet()).await.unwrap_err();

    assert_generation_error(err, "anthropic", "does not match schema");
}

#[test]
fn unsupported_provider_never_builds_a_client() {
    let config = Config {
        unsupported_provider: Some("gemini".into()),
        ..openai_config("http://127.0.0.1:9")
    };
    let Err(err) = SuggestionRequester::from_config(&config) else {
        panic!("expected an error");
    };
    assert!(matches!(err, Error::UnsupportedProvider(ref p) if p == "gemini"));
}

// ─── Candidate validation ────────────────────────────────────────────────────

#[test]
fn empty_suggestion_list_is_rejected() {
    let err = SuggestionRequester::parse_candidates("openai", json!({ "suggestions": [] }))
        .unwrap_err();
    assert_generation_error(err, "openai", "no suggestions");
}

#[test]
fn more_than_three_suggestions_are_rejected() {
    let one = suggestions()["suggestions"][0].clone();
    let value = json!({ "suggestions": [one.clone(), one.clone(), one.clone(), one] });

    let err = SuggestionRequester::parse_candidates("openai", value).unwrap_err();
    assert_generation_error(err, "openai", "at most 3");
}

#[test]
fn out_of_range_confidence_is_rejected() {
    let mut value = suggestions();
    value["suggestions"][0]["confidence"] = json!(150);

    let err = SuggestionRequester::parse_candidates("openai", value).unwrap_err();
    assert_generation_error(err, "openai", "150");
}

#[test]
fn blank_message_is_rejected() {
    let mut value = suggestions();
    value["suggestions"][1]["message"] = json!("   ");

    let err = SuggestionRequester::parse_candidates("openai", value).unwrap_err();
    assert_generation_error(err, "openai", "empty message");
}

#[test]
fn missing_optional_fields_default_to_none() {
    let value = json!({
        "suggestions": [{
            "gitmoji": "🐛",
            "gitmojiCode": ":bug:",
            "message": "fix crash on empty input",
            "confidence": 80
        }]
    });

    let candidates = SuggestionRequester::parse_candidates("anthropic", value).unwrap();
    assert!(candidates[0].scope.is_none());
    assert!(candidates[0].description.is_none());
}

// ─── Schema and prompt ───────────────────────────────────────────────────────

#[test]
fn response_schema_is_strict_compatible() {
    let schema = SuggestionRequester::response_schema();
    assert_eq!(schema.name, "commit_suggestions");

    let list = &schema.schema["properties"]["suggestions"];
    assert_eq!(list["minItems"], 1);
    assert_eq!(list["maxItems"], MAX_SUGGESTIONS);

    let item = &list["items"];
    let properties = item["properties"].as_object().unwrap();
    let required = item["required"].as_array().unwrap();
    assert_eq!(properties.len(), required.len(), "strict mode requires every property");
    assert_eq!(item["additionalProperties"], false);
}

#[test]
fn prompt_embeds_reference_table_and_fact_sheet() {
    let prompt = SuggestionRequester::build_prompt(&sample_sheet());

    assert!(prompt.contains("✨ :sparkles:: Introduce new features."));
    assert!(prompt.contains("FILES CHANGED: src/auth.rs"));
    assert!(prompt.contains("FILE TYPES: rs"));
    assert!(prompt.contains("SUMMARY: Modified 1 file with 3 additions and 1 deletion"));
    assert!(prompt.contains("DETECTED SIGNALS: modified files, feature"));
    assert!(prompt.contains("+pub fn login(user: &str) -> Token {"));
}

#[test]
fn truncate_diff_keeps_short_input() {
    assert_eq!(truncate_diff("a\nb\n", 100), "a\nb\n");
}

#[test]
fn truncate_diff_cuts_at_line_boundary() {
    let diff = "line one\nline two\nline three\n";
    insta::assert_snapshot!(truncate_diff(diff, 12), @r"
    line one
    ... (diff truncated, 21 more characters)
    ");
}

#[test]
fn truncate_diff_keeps_input_of_exactly_max_chars() {
    assert_eq!(truncate_diff("ééé", 3), "ééé");
}

#[test]
fn truncate_diff_counts_characters_not_bytes() {
    insta::assert_snapshot!(truncate_diff("ééééé", 3), @r"
    ééé
    ... (diff truncated, 2 more characters)
    ");

    // 11 characters but 21 bytes before the cut
    let diff = "ééééé\nééééé\nxyz\n";
    insta::assert_snapshot!(truncate_diff(diff, 13), @r"
    ééééé
    ééééé
    ... (diff truncated, 5 more characters)
    ");
}
