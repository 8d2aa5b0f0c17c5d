// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

// miette's Diagnostic derive generates code that triggers this false positive
#![allow(unused_assignments)]

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    #[error("No staged changes found")]
    #[diagnostic(
        code(gitmoji_msg::git::no_staged),
        help("Stage your changes first with: git add <files>")
    )]
    NoStagedChanges,

    #[error("Not a git repository")]
    #[diagnostic(
        code(gitmoji_msg::git::not_repo),
        help("Initialize git first with: git init")
    )]
    NotAGitRepo,

    #[error("Operation cancelled by user")]
    Cancelled,

    #[error("Configuration error:\n{}", errors.join("\n"))]
    #[diagnostic(
        code(gitmoji_msg::config::invalid),
        help("Run `gitmoji-msg config --interactive` or set the provider's API key variable")
    )]
    InvalidConfig { errors: Vec<String> },

    #[error("Unsupported AI provider: {0}")]
    #[diagnostic(
        code(gitmoji_msg::config::provider),
        help("Supported providers: openai, anthropic")
    )]
    UnsupportedProvider(String),

    #[error("Unknown configuration key '{0}'")]
    #[diagnostic(
        code(gitmoji_msg::config::key),
        help("Known keys: provider, model, interactive, autoCommit, scope")
    )]
    UnknownConfigKey(String),

    #[error("Unknown category '{category}'. Available categories: {}", available.join(", "))]
    #[diagnostic(code(gitmoji_msg::gitmoji::category))]
    UnknownCategory {
        category: String,
        available: Vec<String>,
    },

    #[error("AI generation failed ({provider}): {message}")]
    #[diagnostic(code(gitmoji_msg::provider::generation))]
    Generation { provider: String, message: String },

    #[error("Configuration error: {0}")]
    #[diagnostic(code(gitmoji_msg::config::error))]
    Config(String),

    #[error("Git error: {0}")]
    #[diagnostic(code(gitmoji_msg::git::error))]
    Git(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("Dialog error: {0}")]
    Dialog(String),
}

impl From<dialoguer::Error> for Error {
    fn from(e: dialoguer::Error) -> Self {
        Error::Dialog(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
