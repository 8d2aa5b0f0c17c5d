// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

use std::io::IsTerminal;
use std::path::PathBuf;
use std::time::Duration;

use console::style;
use dialoguer::{Confirm, Input, Select};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use crate::cli::{Cli, Commands, GenerationArgs};
use crate::config::{Config, ConfigUpdate, Provider};
use crate::domain::{Candidate, ChangeFactSheet, gitmoji};
use crate::error::{Error, Result};
use crate::services::{
    analyzer::ChangeAnalyzer, formatter::CommitFormatter, git::GitService,
    suggest::SuggestionRequester,
};

/// Files listed before "... and N more"
const STATUS_PREVIEW_LIMIT: usize = 10;

pub struct App {
    cli: Cli,
    config_path: PathBuf,
}

impl App {
    pub fn new(cli: Cli) -> Result<Self> {
        let config_path = Config::default_path()
            .ok_or_else(|| Error::Config("Cannot determine home directory".into()))?;
        debug!(path = %config_path.display(), "config path resolved");
        Ok(Self { cli, config_path })
    }

    pub async fn run(&mut self) -> Result<()> {
        match &self.cli.command {
            Commands::Config {
                key,
                value,
                interactive,
                list,
                reset,
            } => {
                if *reset {
                    self.config_reset()
                } else if *interactive {
                    self.config_interactive()
                } else if *list || key.is_none() {
                    self.config_list();
                    Ok(())
                } else if let (Some(key), Some(value)) = (key, value) {
                    self.config_set(key, value)
                } else if let Some(key) = key {
                    self.config_get(key)
                } else {
                    Ok(())
                }
            }
            Commands::List {
                search,
                category,
                codes,
            } => self.list_gitmojis(search.as_deref(), category.as_deref(), *codes),
            Commands::Generate {
                args,
                commit,
                dry_run,
            } => self.generate(args, *commit, *dry_run).await,
            Commands::Run { args, dry } => self.run_workflow(args, *dry).await,
            Commands::Completions { shell } => {
                let mut cmd = <Cli as clap::CommandFactory>::command();
                clap_complete::generate(*shell, &mut cmd, "gitmoji-msg", &mut std::io::stdout());
                Ok(())
            }
        }
    }

    fn load_config(&self, args: &GenerationArgs) -> Result<Config> {
        let config = Config::load(&self.config_path).merged(&args.to_update());
        debug!(
            provider = config.provider_label(),
            model = %config.model,
            interactive = config.interactive,
            auto_commit = config.auto_commit,
            "config resolved"
        );
        config.validate()?;
        Ok(config)
    }

    // ─── Generate ───

    async fn generate(&self, args: &GenerationArgs, commit: bool, dry_run: bool) -> Result<()> {
        let mut config = self.load_config(args)?;
        if commit {
            config.auto_commit = true;
        }

        let git = GitService::discover()?;

        self.print_status("🔍 Analyzing staged changes...");
        let sheet = ChangeAnalyzer::analyze_staged(&git).await?;
        self.print_found(&sheet);

        let candidates = self.request_suggestions(&config, &sheet).await?;
        let chosen = self.select_candidate(&config, &candidates)?;
        let scope = config.scope.as_deref();
        self.display_selection(chosen, scope);

        if config.auto_commit && !dry_run {
            git.commit(&CommitFormatter::full_message(chosen, scope))
                .await?;
            println!("\n{} Changes committed successfully!", style("✅").green());
        } else {
            println!("\n💡 To commit with this message, run:");
            println!("   {}", CommitFormatter::commit_command(chosen, scope));
        }

        Ok(())
    }

    // ─── Run ───

    async fn run_workflow(&self, args: &GenerationArgs, dry: bool) -> Result<()> {
        let config = self.load_config(args)?;
        let git = GitService::discover()?;

        self.print_status("📋 Checking repository status...");
        let status = git.status().await?;

        if status.is_empty() {
            println!("✅ No changes detected. Repository is clean.");
            return Ok(());
        }

        let staged: Vec<_> = status.iter().filter(|e| e.is_staged()).collect();
        let has_staged = !staged.is_empty();

        if has_staged {
            println!("📁 Found {} staged file(s):", staged.len());
            for entry in staged.iter().take(STATUS_PREVIEW_LIMIT) {
                println!("   ✅ {}", entry.path);
            }
            self.print_remaining(staged.len());
            println!("🎯 Using existing staged changes");
        } else {
            println!("📁 Found {} changed file(s):", status.len());
            for entry in status.iter().take(STATUS_PREVIEW_LIMIT) {
                println!("   {} {}", entry.indicator(), entry.path);
            }
            self.print_remaining(status.len());

            if dry {
                println!("🏃 Dry run mode - simulating git add .");
            } else {
                if !is_interactive_terminal() {
                    return Err(Error::Dialog(
                        "Not a terminal. Stage changes with `git add` first, or use --dry".into(),
                    ));
                }

                let confirm = Confirm::new()
                    .with_prompt("Add all changes and proceed with commit?")
                    .default(true)
                    .interact_opt()?;

                if confirm != Some(true) {
                    println!("❌ Operation cancelled");
                    return Ok(());
                }

                println!("➕ Adding all changes...");
                git.add_all().await?;
            }
        }

        self.print_status("🔍 Analyzing changes...");
        let sheet = if dry && !has_staged {
            ChangeAnalyzer::analyze(&git.working_diff().await?)?
        } else {
            ChangeAnalyzer::analyze_staged(&git).await?
        };
        self.print_found(&sheet);

        let candidates = self.request_suggestions(&config, &sheet).await?;
        let chosen = self.select_candidate(&config, &candidates)?;
        let scope = config.scope.as_deref();
        self.display_selection(chosen, scope);

        if dry {
            println!("\n🏃 Dry run mode - would execute:");
            println!("   {}", CommitFormatter::commit_command(chosen, scope));
            return Ok(());
        }

        println!("\n🚀 Committing changes...");
        git.commit(&CommitFormatter::full_message(chosen, scope))
            .await?;
        println!("{} Changes committed successfully!", style("✅").green());

        if let Some(hash) = git.head_short_hash().await {
            println!(
                "📋 Commit: {} \"{}\"",
                style(hash).yellow(),
                CommitFormatter::title(chosen, scope)
            );
        }

        Ok(())
    }

    // ─── Suggestions ───

    async fn request_suggestions(
        &self,
        config: &Config,
        sheet: &ChangeFactSheet,
    ) -> Result<Vec<Candidate>> {
        let requester = SuggestionRequester::from_config(config)?;

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.set_message(format!(
            "🤖 Generating gitmoji suggestions with {} ({})...",
            requester.provider_name(),
            config.model
        ));
        spinner.enable_steady_tick(Duration::from_millis(80));

        let result = requester.request(sheet).await;
        spinner.finish_and_clear();
        result
    }

    fn select_candidate<'a>(
        &self,
        config: &Config,
        candidates: &'a [Candidate],
    ) -> Result<&'a Candidate> {
        let interactive = config.interactive && is_interactive_terminal();
        let chosen = CommitFormatter::select(
            candidates,
            config.scope.as_deref(),
            interactive,
            |labels| {
                Select::new()
                    .with_prompt("🎨 Choose your commit message")
                    .items(labels)
                    .default(0)
                    .interact_opt()?
                    .ok_or(Error::Cancelled)
            },
        )?;
        debug!(
            candidates = candidates.len(),
            interactive,
            code = %chosen.gitmoji_code,
            "candidate selected"
        );
        Ok(chosen)
    }

    fn display_selection(&self, candidate: &Candidate, scope: Option<&str>) {
        println!("\n{}", style("✨ Generated commit message:").bold());
        println!(
            "   Title: {}",
            style(CommitFormatter::title(candidate, scope)).green()
        );
        if let Some(description) = &candidate.description {
            println!("   Description: {description}");
        }
        println!("   Confidence: {}%", candidate.confidence);
    }

    // ─── Config ───

    fn config_list(&self) {
        let config = Config::load(&self.config_path);

        println!("📋 Current Configuration:");
        println!("   Provider: {}", config.provider_label());
        println!("   Model: {}", config.model);
        println!("   Interactive: {}", config.interactive);
        println!("   Auto-commit: {}", config.auto_commit);
        if let Some(scope) = &config.scope {
            println!("   Default scope: {scope}");
        }
        let key_status = if config.resolve_api_key().is_some() {
            style("✅ Set").green()
        } else {
            style("❌ Not set").red()
        };
        println!("   API Key: {key_status}");
        println!("   Config file: {}", self.config_path.display());

        println!("\n💡 Tip: Use --interactive to change settings or set individual values:");
        println!("   gitmoji-msg config provider openai");
    }

    fn config_get(&self, key: &str) -> Result<()> {
        let config = Config::load(&self.config_path);
        match config.get(key)? {
            Some(value) => {
                println!("{key}: {value}");
                Ok(())
            }
            None => Err(Error::Config(format!("Configuration key '{key}' is not set"))),
        }
    }

    fn config_set(&self, key: &str, value: &str) -> Result<()> {
        let update = ConfigUpdate::from_key_value(key, value)?;
        Config::save(&self.config_path, &update)?;
        println!("{} Set {key} to {value}", style("✅").green());
        Ok(())
    }

    fn config_interactive(&self) -> Result<()> {
        let current = Config::load_file(&self.config_path);

        let providers: Vec<&str> = Provider::ALL.iter().map(Provider::as_str).collect();
        let provider_index = Provider::ALL
            .iter()
            .position(|p| *p == current.provider)
            .unwrap_or(0);

        let provider = Select::new()
            .with_prompt("AI Provider")
            .items(&providers)
            .default(provider_index)
            .interact_opt()?
            .ok_or(Error::Cancelled)?;

        let model: String = Input::new()
            .with_prompt("AI Model")
            .default(current.model.clone())
            .interact_text()?;

        let interactive = Confirm::new()
            .with_prompt("Enable interactive mode by default?")
            .default(current.interactive)
            .interact()?;

        let auto_commit = Confirm::new()
            .with_prompt("Auto-commit generated messages?")
            .default(current.auto_commit)
            .interact()?;

        let scope: String = Input::new()
            .with_prompt("Default scope (optional)")
            .default(current.scope.clone().unwrap_or_default())
            .allow_empty(true)
            .interact_text()?;

        let update = ConfigUpdate {
            provider: Some(Provider::ALL[provider]),
            model: Some(model),
            interactive: Some(interactive),
            auto_commit: Some(auto_commit),
            scope: Some(scope),
        };

        Config::save(&self.config_path, &update)?;
        println!("{} Configuration updated successfully!", style("✅").green());
        Ok(())
    }

    fn config_reset(&self) -> Result<()> {
        let confirm = Confirm::new()
            .with_prompt("Reset configuration to defaults? The API key and scope are kept")
            .default(false)
            .interact_opt()?;

        if confirm == Some(true) {
            Config::reset(&self.config_path)?;
            println!("{} Configuration reset to defaults", style("✅").green());
        } else {
            println!("❌ Reset cancelled");
        }
        Ok(())
    }

    // ─── List ───

    fn list_gitmojis(
        &self,
        search: Option<&str>,
        category: Option<&str>,
        codes: bool,
    ) -> Result<()> {
        let matches = gitmoji::filter(search, category)?;

        if matches.is_empty() {
            println!("No gitmojis found matching your criteria.");
            return Ok(());
        }

        println!(
            "📋 Available Gitmojis ({}/{}):\n",
            matches.len(),
            gitmoji::GITMOJIS.len()
        );

        let width = matches.iter().map(|g| g.code.len()).max().unwrap_or(0);
        for g in &matches {
            let display = if codes { g.code } else { g.emoji };
            println!("{display} {:<width$} - {}", g.code, g.description);
        }

        if search.is_some() || category.is_some() {
            println!("\n💡 Tip: Remove filters to see all available gitmojis");
        } else {
            println!("\n💡 Tip: Use --search or --category to filter results");
            println!("   Examples: --search bug, --category feature");
        }
        Ok(())
    }

    // ─── Output Helpers ───

    fn print_found(&self, sheet: &ChangeFactSheet) {
        self.print_info(&format!(
            "📊 Found changes in {} file(s): {}",
            sheet.file_paths.len(),
            sheet.file_types.join(", ")
        ));
        debug!(summary = %sheet.summary, "fact sheet");
    }

    fn print_remaining(&self, total: usize) {
        if total > STATUS_PREVIEW_LIMIT {
            println!("   ... and {} more files", total - STATUS_PREVIEW_LIMIT);
        }
    }

    fn print_status(&self, msg: &str) {
        println!("{} {}", style("→").cyan(), msg);
    }

    fn print_info(&self, msg: &str) {
        println!("{} {}", style("info:").cyan(), msg);
    }
}

fn is_interactive_terminal() -> bool {
    std::io::stdout().is_terminal() && std::io::stdin().is_terminal()
}
