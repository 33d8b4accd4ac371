// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Command dispatch and execution.

use std::path::Path;
use std::sync::Arc;

use console::style;

use crate::config::{default::example_config, HookwiseConfig};
use crate::error::{ConfigError, HookError, HookwiseError, Result, ResultExt};
use crate::hooks::{
    commit_msg, pre_commit, prepare_commit_msg, HookKind, HookManager, HookReporter, HookStatus,
};
use crate::process::ShellRunner;
use crate::rules::RuleEngine;

use super::args::{CheckArgs, Cli, Commands, HookCommand, HooksAction, InitArgs};

/// File written by `hookwise init`.
const CONFIG_FILE_NAME: &str = "hookwise.toml";

/// Run the CLI with the given arguments and return the process exit code.
pub async fn run(cli: Cli) -> Result<i32> {
    let config = match &cli.config {
        Some(config_path) => HookwiseConfig::load_from(config_path),
        None => HookwiseConfig::load(),
    };

    match &cli.command {
        Commands::Hook(args) => run_hook(&config, &args.hook).await,
        Commands::Check(args) => run_check(&cli, &config, args),
        Commands::Hooks(args) => run_hooks(&config, &args.action),
        Commands::Init(args) => run_init(args),
        Commands::Config => run_config(&config),
        Commands::Version => run_version(),
    }
}

/// Run one of the git hooks.
async fn run_hook(config: &HookwiseConfig, hook: &HookCommand) -> Result<i32> {
    let outcome = match hook {
        HookCommand::CommitMsg { file } => {
            let reporter = HookReporter::new(HookKind::CommitMsg);
            commit_msg::run(file, config, &reporter).await?
        }
        HookCommand::PreCommit => {
            let reporter = HookReporter::new(HookKind::PreCommit);
            let runner = Arc::new(ShellRunner::from_config(&config.pre_commit));
            pre_commit::run(&config.pre_commit, runner, &reporter).await
        }
        HookCommand::PrepareCommitMsg { file, source, sha } => {
            tracing::debug!("prepare-commit-msg source: {:?}, sha: {:?}", source, sha);
            let reporter = HookReporter::new(HookKind::PrepareCommitMsg);
            prepare_commit_msg::run(file, source.as_deref(), &reporter).await
        }
    };

    Ok(outcome.exit_code())
}

/// Run the check command.
fn run_check(cli: &Cli, config: &HookwiseConfig, args: &CheckArgs) -> Result<i32> {
    tracing::debug!("Running check command with args: {:?}", args);

    let engine = RuleEngine::new(&config.rules);

    let results = if let Some(ref file) = args.file {
        let text = std::fs::read_to_string(file).map_err(|e| HookError::MessageFile {
            path: file.clone(),
            message: e.to_string(),
        })?;
        vec![engine.validate_string(&text)]
    } else if args.range || args.target.contains("..") {
        engine.check_range(&args.target)?
    } else {
        vec![engine.check_commit(&args.target)?]
    };

    for result in &results {
        result.print(cli.format);
    }

    let invalid = results.iter().filter(|r| !r.is_valid()).count();
    if cli.format.is_none() && results.len() > 1 {
        println!();
        println!("{} of {} commits rejected", invalid, results.len());
    }

    Ok(if invalid == 0 { 0 } else { 1 })
}

/// Run the hooks command.
fn run_hooks(config: &HookwiseConfig, action: &HooksAction) -> Result<i32> {
    tracing::debug!("Running hooks command: {:?}", action);

    let manager = HookManager::new()?;

    match action {
        HooksAction::Install { hook, force } => {
            let kinds = selected_hooks(hook.as_deref(), HookKind::configured(&config.hooks))?;
            manager.install_all(&kinds, *force)?;
            for kind in &kinds {
                println!("{} Installed {} hook", style("✓").green(), kind);
            }
        }
        HooksAction::Uninstall { hook } => {
            let kinds = selected_hooks(hook.as_deref(), HookKind::all().to_vec())?;
            manager.uninstall_all(&kinds)?;
            for kind in &kinds {
                println!("{} Uninstalled {} hook", style("✓").green(), kind);
            }
        }
        HooksAction::Status => {
            println!("Hooks directory: {}", manager.hooks_dir().display());
            for (kind, status) in manager.status() {
                match status {
                    HookStatus::Installed => println!("{} {}", style("✓").green(), kind),
                    HookStatus::Foreign => {
                        println!("{} {} (not managed by hookwise)", style("!").yellow(), kind)
                    }
                    HookStatus::Missing => println!("{} {}", style("✗").red(), kind),
                }
            }
        }
    }

    Ok(0)
}

/// One named hook, or the given default set.
fn selected_hooks(hook: Option<&str>, all: Vec<HookKind>) -> Result<Vec<HookKind>> {
    match hook {
        Some(name) => Ok(vec![name.parse::<HookKind>()?]),
        None => Ok(all),
    }
}

/// Run the init command.
fn run_init(args: &InitArgs) -> Result<i32> {
    tracing::debug!("Running init command with args: {:?}", args);

    let config_path = Path::new(CONFIG_FILE_NAME);

    if config_path.exists() && !args.force {
        return Err(HookwiseError::Config(ConfigError::AlreadyExists {
            path: config_path.to_path_buf(),
        }));
    }

    std::fs::write(config_path, example_config()).context("Failed to write configuration")?;

    println!("{} Created {}", style("✓").green(), CONFIG_FILE_NAME);
    Ok(0)
}

/// Print the effective configuration and the patterns built from it.
fn run_config(config: &HookwiseConfig) -> Result<i32> {
    let toml = toml::to_string_pretty(config).context("Failed to serialize configuration")?;
    println!("{}", toml);

    let engine = RuleEngine::new(&config.rules);
    let patterns = engine.patterns();
    println!("# Generated patterns");
    println!("# subject:        {}", patterns.subject().as_str());
    println!("# body:           {}", patterns.body().as_str());
    println!("# footer keyword: {}", patterns.footer_keyword().as_str());
    println!("# footer:         {}", patterns.footer().as_str());

    Ok(0)
}

/// Run the version command.
fn run_version() -> Result<i32> {
    println!("hookwise {}", crate::version::version_string());

    if let Some(sha) = crate::version::GIT_SHA {
        println!("git commit: {}", sha);
    }
    if let Some(date) = crate::version::GIT_COMMIT_DATE {
        println!("commit date: {}", date);
    }
    if let Some(date) = crate::version::BUILD_DATE {
        println!("build date: {}", date);
    }

    Ok(0)
}
