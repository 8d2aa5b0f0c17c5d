// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Binary isolated from the caller's config and keys
fn gitmoji_msg(config_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("gitmoji-msg").unwrap();
    cmd.env("GITMOJI_MSG_CONFIG", config_dir.path().join("config.json"))
        .env("NO_COLOR", "1")
        .env_remove("OPENAI_API_KEY")
        .env_remove("ANTHROPIC_API_KEY")
        .env_remove("GITMOJI_MSG_PROVIDER")
        .env_remove("GITMOJI_MSG_MODEL")
        .env_remove("GITMOJI_MSG_INTERACTIVE")
        .env_remove("GITMOJI_MSG_SCOPE")
        .env_remove("RUST_LOG");
    cmd
}

/// Fresh repository with nothing staged
fn empty_repo() -> TempDir {
    let repo = TempDir::new().unwrap();
    let status = std::process::Command::new("git")
        .args(["init", "-q"])
        .current_dir(repo.path())
        .status()
        .unwrap();
    assert!(status.success());
    repo
}

// ─── list ────────────────────────────────────────────────────────────────────

#[test]
fn list_shows_all_gitmojis() {
    let dir = TempDir::new().unwrap();
    gitmoji_msg(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("📋 Available Gitmojis"))
        .stdout(predicate::str::contains("✨ :sparkles:"))
        .stdout(predicate::str::contains("Introduce new features."));
}

#[test]
fn list_codes_replaces_emoji() {
    let dir = TempDir::new().unwrap();
    gitmoji_msg(&dir)
        .args(["list", "--codes", "--search", "sparkles"])
        .assert()
        .success()
        .stdout(predicate::str::contains(":sparkles: :sparkles:"));
}

#[test]
fn list_without_matches() {
    let dir = TempDir::new().unwrap();
    gitmoji_msg(&dir)
        .args(["list", "-s", "zzzz-nothing"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No gitmojis found"));
}

#[test]
fn list_unknown_category_fails() {
    let dir = TempDir::new().unwrap();
    gitmoji_msg(&dir)
        .args(["list", "--category", "astrology"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown category 'astrology'"));
}

// ─── config ──────────────────────────────────────────────────────────────────

#[test]
fn config_list_reports_defaults_and_missing_key() {
    let dir = TempDir::new().unwrap();
    gitmoji_msg(&dir)
        .args(["config", "--list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Provider: openai"))
        .stdout(predicate::str::contains("Model: gpt-4o-mini"))
        .stdout(predicate::str::contains("❌ Not set"));
}

#[test]
fn config_set_then_get() {
    let dir = TempDir::new().unwrap();
    gitmoji_msg(&dir)
        .args(["config", "model", "gpt-4o"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Set model to gpt-4o"));

    gitmoji_msg(&dir)
        .args(["config", "model"])
        .assert()
        .success()
        .stdout(predicate::str::contains("model: gpt-4o"));

    let stored = std::fs::read_to_string(dir.path().join("config.json")).unwrap();
    assert!(stored.contains("\"model\": \"gpt-4o\""));
}

#[test]
fn config_get_unset_scope_fails() {
    let dir = TempDir::new().unwrap();
    gitmoji_msg(&dir)
        .args(["config", "scope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not set"));
}

#[test]
fn config_rejects_unknown_key() {
    let dir = TempDir::new().unwrap();
    gitmoji_msg(&dir)
        .args(["config", "temperature", "1"])
        .assert()
        .failure();
}

#[test]
fn config_rejects_unsupported_provider() {
    let dir = TempDir::new().unwrap();
    gitmoji_msg(&dir)
        .args(["config", "provider", "ollama"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported AI provider: ollama"));
}

#[test]
fn config_keeps_file_with_unsupported_provider() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    let stored = r#"{ "provider": "gemini", "apiKey": "sk-stored" }"#;
    std::fs::write(&path, stored).unwrap();

    gitmoji_msg(&dir)
        .args(["config", "provider"])
        .assert()
        .success()
        .stdout(predicate::str::contains("provider: gemini"));

    gitmoji_msg(&dir)
        .args(["config", "model", "gpt-4o"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported AI provider: gemini"));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), stored);
}

// ─── generate ────────────────────────────────────────────────────────────────

#[test]
fn generate_rejects_unsupported_provider_flag() {
    let dir = TempDir::new().unwrap();
    gitmoji_msg(&dir)
        .args(["generate", "--provider", "bogus"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn generate_without_key_fails_before_git() {
    let dir = TempDir::new().unwrap();
    gitmoji_msg(&dir)
        .current_dir(dir.path())
        .arg("generate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No API key found for openai"))
        .stderr(predicate::str::contains("Not a git repository").not());
}

#[test]
fn generate_outside_repository_fails() {
    let dir = TempDir::new().unwrap();
    gitmoji_msg(&dir)
        .current_dir(dir.path())
        .env("OPENAI_API_KEY", "sk-test")
        .env("GIT_CEILING_DIRECTORIES", dir.path())
        .arg("generate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not a git repository"));
}

#[test]
fn generate_without_staged_changes_fails() {
    let dir = TempDir::new().unwrap();
    let repo = empty_repo();
    std::fs::write(repo.path().join("untracked.txt"), "not staged\n").unwrap();

    gitmoji_msg(&dir)
        .current_dir(repo.path())
        .env("OPENAI_API_KEY", "sk-test")
        .arg("generate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No staged changes found"));
}

#[test]
fn generate_with_unsupported_provider_in_config_fails() {
    let dir = TempDir::new().unwrap();
    let repo = empty_repo();
    std::fs::write(
        dir.path().join("config.json"),
        r#"{ "provider": "gemini", "apiKey": "sk-stored" }"#,
    )
    .unwrap();

    gitmoji_msg(&dir)
        .current_dir(repo.path())
        .arg("generate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported AI provider: gemini"))
        .stderr(predicate::str::contains("No staged changes").not());
}

#[test]
fn generate_with_unsupported_provider_in_environment_fails() {
    let dir = TempDir::new().unwrap();
    let repo = empty_repo();

    gitmoji_msg(&dir)
        .current_dir(repo.path())
        .env("OPENAI_API_KEY", "sk-test")
        .env("GITMOJI_MSG_PROVIDER", "gemini")
        .arg("generate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported AI provider: gemini"));
}

#[test]
fn provider_flag_replaces_unsupported_stored_provider() {
    let dir = TempDir::new().unwrap();
    let repo = empty_repo();
    std::fs::write(dir.path().join("config.json"), r#"{ "provider": "gemini" }"#).unwrap();

    gitmoji_msg(&dir)
        .current_dir(repo.path())
        .env("ANTHROPIC_API_KEY", "sk-ant")
        .args(["generate", "--provider", "anthropic"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No staged changes found"));
}

// ─── completions ─────────────────────────────────────────────────────────────

#[test]
fn completions_for_bash() {
    let dir = TempDir::new().unwrap();
    gitmoji_msg(&dir)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("gitmoji-msg"));
}
