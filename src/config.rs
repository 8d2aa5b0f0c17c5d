// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

use directories::BaseDirs;
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, warn};

use crate::error::{Error, Result};

const CONFIG_FILE_NAME: &str = ".gitmoji-msg.json";
const CONFIG_PATH_ENV: &str = "GITMOJI_MSG_CONFIG";
const ENV_PREFIX: &str = "GITMOJI_MSG_";

/// Keys accepted by `config <key> <value>`
pub const CONFIG_KEYS: &[&str] = &["provider", "model", "interactive", "autoCommit", "scope"];

#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    #[default]
    #[value(name = "openai")]
    OpenAI,
    #[value(name = "anthropic")]
    Anthropic,
}

impl Provider {
    pub const ALL: &'static [Provider] = &[Provider::OpenAI, Provider::Anthropic];

    /// Environment variable consulted when no key is stored in the config file
    pub fn api_key_env(&self) -> &'static str {
        match self {
            Self::OpenAI => "OPENAI_API_KEY",
            Self::Anthropic => "ANTHROPIC_API_KEY",
        }
    }

    /// Model used when none is configured for this provider
    pub fn default_model(&self) -> &'static str {
        match self {
            Self::OpenAI => "gpt-4o-mini",
            Self::Anthropic => "claude-haiku-4-5",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenAI => "openai",
            Self::Anthropic => "anthropic",
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "openai" => Ok(Self::OpenAI),
            "anthropic" => Ok(Self::Anthropic),
            _ => Err(Error::UnsupportedProvider(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub provider: Provider,

    #[serde(default = "default_model")]
    pub model: String,

    /// Offer a choice when the model returns more than one suggestion
    #[serde(default = "default_true")]
    pub interactive: bool,

    #[serde(default)]
    pub auto_commit: bool,

    /// Default scope, overrides any scope the model suggests
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Base URL for OpenAI-compatible or proxied endpoints
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Request timeout in seconds (default 60)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Provider name found in the file or environment that is not supported.
    /// `provider` holds the default while this is set.
    #[serde(skip)]
    pub unsupported_provider: Option<String>,
}

fn default_model() -> String {
    Provider::default().default_model().into()
}
fn default_true() -> bool {
    true
}
fn default_timeout_secs() -> u64 {
    60
}

impl Default for Config {
    fn default() -> Self {
        Self {
            provider: Provider::default(),
            model: default_model(),
            interactive: true,
            auto_commit: false,
            scope: None,
            api_key: None,
            base_url: None,
            timeout_secs: default_timeout_secs(),
            unsupported_provider: None,
        }
    }
}

/// Partial configuration; `None` leaves the current value untouched.
///
/// Used both for command-line overrides and for edits written back to disk.
/// An empty `scope` clears the stored scope.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigUpdate {
    pub provider: Option<Provider>,
    pub model: Option<String>,
    pub interactive: Option<bool>,
    pub auto_commit: Option<bool>,
    pub scope: Option<String>,
}

impl ConfigUpdate {
    /// Build an update from a `config <key> <value>` pair.
    pub fn from_key_value(key: &str, value: &str) -> Result<Self> {
        let mut update = Self::default();
        match key {
            "provider" => update.provider = Some(value.parse()?),
            "model" => update.model = Some(value.to_string()),
            "interactive" => update.interactive = Some(parse_flag(value)),
            "autoCommit" => update.auto_commit = Some(parse_flag(value)),
            "scope" => update.scope = Some(value.to_string()),
            other => return Err(Error::UnknownConfigKey(other.to_string())),
        }
        Ok(update)
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

fn parse_flag(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case("true")
}

impl Config {
    /// Path of the per-user config file (`GITMOJI_MSG_CONFIG` wins)
    pub fn default_path() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_PATH_ENV) {
            return Some(PathBuf::from(path));
        }
        BaseDirs::new().map(|dirs| dirs.home_dir().join(CONFIG_FILE_NAME))
    }

    /// Load with priority: ENV > config file > defaults.
    ///
    /// A corrupt file is reported and ignored rather than aborting the run.
    pub fn load(path: &Path) -> Self {
        // GITMOJI_MSG_MODEL, GITMOJI_MSG_PROVIDER, ...
        let figment = Self::file_figment(path)
            .merge(Env::prefixed(ENV_PREFIX).only(&["provider", "model", "interactive", "scope"]));

        Self::extract_or_default(figment, path)
    }

    /// Load only what is stored on disk, merged over defaults
    pub fn load_file(path: &Path) -> Self {
        Self::extract_or_default(Self::file_figment(path), path)
    }

    fn file_figment(path: &Path) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));
        if path.exists() {
            figment = figment.merge(Json::file(path));
        }
        figment
    }

    fn extract_or_default(figment: Figment, path: &Path) -> Self {
        // An unknown provider must not discard the rest of the file
        let raw_provider = figment.extract_inner::<String>("provider").ok();
        let parsed = raw_provider.as_deref().map(str::parse::<Provider>);
        let (figment, unsupported_provider) = match parsed {
            Some(Ok(provider)) => (
                figment.merge(Serialized::default("provider", provider)),
                None,
            ),
            Some(Err(_)) => (
                figment.merge(Serialized::default("provider", Provider::default())),
                raw_provider,
            ),
            None => (figment, None),
        };

        match figment.extract::<Config>() {
            Ok(mut config) => {
                config.unsupported_provider = unsupported_provider;
                config.align_model();
                debug!(
                    path = %path.display(),
                    provider = config.provider_label(),
                    "config loaded"
                );
                config
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "could not load config, using defaults");
                Config {
                    unsupported_provider,
                    ..Config::default()
                }
            }
        }
    }

    /// Another provider's default model is swapped for this provider's default
    fn align_model(&mut self) {
        let foreign_default = Provider::ALL
            .iter()
            .any(|p| *p != self.provider && self.model == p.default_model());
        if foreign_default {
            self.model = self.provider.default_model().to_string();
        }
    }

    /// Provider name as configured, including an unsupported one
    pub fn provider_label(&self) -> &str {
        self.unsupported_provider
            .as_deref()
            .unwrap_or(self.provider.as_str())
    }

    /// Apply a partial update, returning the new configuration
    pub fn merged(mut self, update: &ConfigUpdate) -> Self {
        if let Some(provider) = update.provider {
            self.provider = provider;
            self.unsupported_provider = None;
        }
        match update.model {
            Some(ref model) => self.model = model.clone(),
            None => self.align_model(),
        }
        if let Some(interactive) = update.interactive {
            self.interactive = interactive;
        }
        if let Some(auto_commit) = update.auto_commit {
            self.auto_commit = auto_commit;
        }
        if let Some(ref scope) = update.scope {
            let scope = scope.trim();
            self.scope = (!scope.is_empty()).then(|| scope.to_string());
        }
        self
    }

    /// Merge `update` over the stored config and write it back.
    ///
    /// Refuses to rewrite a file whose stored provider is unsupported unless
    /// the update replaces it.
    pub fn save(path: &Path, update: &ConfigUpdate) -> Result<Self> {
        let config = Self::load_file(path).merged(update);
        if let Some(raw) = config.unsupported_provider {
            return Err(Error::UnsupportedProvider(raw));
        }
        config.write(path)?;
        Ok(config)
    }

    /// Restore provider, model, interactive and autoCommit to their defaults.
    ///
    /// The stored API key, scope, base URL and timeout are kept.
    pub fn reset(path: &Path) -> Result<Self> {
        let defaults = Config::default();
        let config = Config {
            provider: defaults.provider,
            model: defaults.model,
            interactive: defaults.interactive,
            auto_commit: defaults.auto_commit,
            unsupported_provider: None,
            ..Self::load_file(path)
        };
        config.write(path)?;
        Ok(config)
    }

    fn write(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)?;
            }
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content + "\n")?;

        // API keys may live in this file
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(path)?.permissions();
            perms.set_mode(0o600);
            fs::set_permissions(path, perms)?;
        }

        debug!(path = %path.display(), "config saved");
        Ok(())
    }

    /// Value of a single key as displayed by `config <key>`
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        let value = match key {
            "provider" => Some(self.provider_label().to_string()),
            "model" => Some(self.model.clone()),
            "interactive" => Some(self.interactive.to_string()),
            "autoCommit" => Some(self.auto_commit.to_string()),
            "scope" => self.scope.clone(),
            other => return Err(Error::UnknownConfigKey(other.to_string())),
        };
        Ok(value)
    }

    /// Stored key first, then the provider's environment variable
    pub fn resolve_api_key(&self) -> Option<SecretString> {
        self.resolve_api_key_with(|name| std::env::var(name).ok())
    }

    pub fn resolve_api_key_with(
        &self,
        env: impl Fn(&str) -> Option<String>,
    ) -> Option<SecretString> {
        self.api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| env(self.provider.api_key_env()).filter(|k| !k.trim().is_empty()))
            .map(SecretString::from)
    }

    pub(crate) fn missing_key_message(&self) -> String {
        format!(
            "No API key found for {}. Set {} environment variable or configure it with \
             'gitmoji-msg config'.",
            self.provider,
            self.provider.api_key_env()
        )
    }

    /// Check everything needed before touching git or the network.
    ///
    /// All problems are reported together.
    pub fn validate(&self) -> Result<()> {
        self.validate_with(|name| std::env::var(name).ok())
    }

    pub fn validate_with(&self, env: impl Fn(&str) -> Option<String>) -> Result<()> {
        let mut errors = Vec::new();

        if let Some(ref raw) = self.unsupported_provider {
            errors.push(format!(
                "Unsupported AI provider: {raw}. Supported providers: {}",
                Provider::ALL
                    .iter()
                    .map(Provider::as_str)
                    .collect::<Vec<_>>()
                    .join(", ")
            ));
        } else if self.resolve_api_key_with(env).is_none() {
            errors.push(self.missing_key_message());
        }

        if self.model.trim().is_empty() {
            errors.push("model cannot be empty".into());
        }

        if !(1..=600).contains(&self.timeout_secs) {
            errors.push(format!(
                "timeoutSecs must be 1–600, got {}",
                self.timeout_secs
            ));
        }

        if let Some(ref base_url) = self.base_url {
            match url::Url::parse(base_url) {
                Ok(url) if matches!(url.scheme(), "http" | "https") => {}
                Ok(url) => errors.push(format!(
                    "baseUrl must use http or https, got '{}'",
                    url.scheme()
                )),
                Err(e) => errors.push(format!("baseUrl is not a valid URL: {e}")),
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(Error::InvalidConfig { errors })
        }
    }
}
