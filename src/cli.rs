// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

use clap::Parser;
use clap::builder::PossibleValuesParser;

use crate::config::{CONFIG_KEYS, ConfigUpdate, Provider};

#[derive(Parser, Debug)]
#[command(name = "gitmoji-msg")]
#[command(version)]
#[command(about = "AI-powered gitmoji commit message generator", long_about = None)]
pub struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Flags shared by `generate` and `run`
#[derive(clap::Args, Debug, Clone, Default)]
pub struct GenerationArgs {
    /// AI provider to use
    #[arg(short, long, value_enum)]
    pub provider: Option<Provider>,

    /// AI model to use
    #[arg(short, long)]
    pub model: Option<String>,

    /// Add scope to commit message (e.g., "api", "ui")
    #[arg(short, long)]
    pub scope: Option<String>,

    /// Choose from multiple suggestions
    #[arg(short, long, overrides_with = "no_interactive")]
    pub interactive: bool,

    /// Always take the top-ranked suggestion
    #[arg(long, overrides_with = "interactive")]
    pub no_interactive: bool,
}

impl GenerationArgs {
    /// Overrides applied on top of the loaded config
    pub fn to_update(&self) -> ConfigUpdate {
        let interactive = if self.no_interactive {
            Some(false)
        } else if self.interactive {
            Some(true)
        } else {
            None
        };

        ConfigUpdate {
            provider: self.provider,
            model: self.model.clone(),
            interactive,
            auto_commit: None,
            scope: self.scope.clone(),
        }
    }
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Manage configuration settings
    Config {
        /// Configuration key to get/set
        #[arg(value_parser = PossibleValuesParser::new(CONFIG_KEYS))]
        key: Option<String>,

        /// Configuration value to set
        value: Option<String>,

        /// Configure settings interactively
        #[arg(short, long)]
        interactive: bool,

        /// List current configuration
        #[arg(short, long)]
        list: bool,

        /// Reset configuration to defaults
        #[arg(short, long)]
        reset: bool,
    },

    /// List available gitmojis with their descriptions
    List {
        /// Search gitmojis by description, code or name
        #[arg(short, long)]
        search: Option<String>,

        /// Filter by category (feature, bug, docs, ...)
        #[arg(short, long)]
        category: Option<String>,

        /// Show gitmoji codes instead of emojis
        #[arg(long)]
        codes: bool,
    },

    /// Generate gitmoji commit messages from staged changes
    Generate {
        #[command(flatten)]
        args: GenerationArgs,

        /// Commit with the generated message
        #[arg(short, long)]
        commit: bool,

        /// Print the message only, never commit
        #[arg(long)]
        dry_run: bool,
    },

    /// Add all changes, generate a gitmoji commit message, and commit
    Run {
        #[command(flatten)]
        args: GenerationArgs,

        /// Show what would be committed without staging or committing
        #[arg(short, long)]
        dry: bool,
    },

    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}
