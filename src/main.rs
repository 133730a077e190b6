//! webapp-qa - black-box scenario runner for a creator-commerce web app
//!
//! Drives the app's HTTP API and its pages in a headless browser, checks
//! each response or page against declared expectations, and reports a
//! pass/fail verdict per scenario.
//!
//! ## Usage
//!
//! ```bash
//! # Run everything against http://localhost:3000
//! webapp-qa run
//!
//! # Only the API scenarios, as JSON
//! webapp-qa run --kind api --format json
//!
//! # A single scenario with a visible browser
//! webapp-qa run -s TC010 --headed
//!
//! # List the catalog
//! webapp-qa list --detailed
//! ```

use std::path::Path;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing::{debug, info, warn};

mod assertions;
mod browser;
mod cli;
mod config;
mod executor;
mod http;
mod models;
mod output;
mod scenarios;
mod utils;

use cli::Args;
use config::{AppConfig, ConfigFile, EnvConfig, ScenarioProfile};
use executor::ScenarioRunner;
use models::{Category, ScenarioKind, Steps};
use output::{write_report_to_file, OutputFormat, ResultFormatter};
use scenarios::Selection;
use utils::logger::{init_logger, LogLevel};

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    let env = EnvConfig::load();

    let level = if args.verbose || env.verbose.unwrap_or(false) {
        LogLevel::Debug
    } else {
        LogLevel::from_str(&args.log_level).unwrap_or(LogLevel::Info)
    };
    init_logger(level);

    let result = match args.command {
        cli::Command::Run(run_args) => run_scenarios(run_args, args.config, &env).await,
        cli::Command::List(list_args) => {
            list_scenarios(list_args, args.config, &env);
            Ok(true)
        }
        cli::Command::Check(check_args) => check_app(check_args, args.config, &env).await,
        cli::Command::Config(config_args) => {
            manage_config(config_args, args.config, &env).map(|_| true)
        }
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Config file named on the command line, in the environment, or found in
/// the standard locations
fn load_config_file(explicit: Option<String>, env: &EnvConfig) -> Result<ConfigFile> {
    match explicit.or_else(|| env.config_file.clone()) {
        Some(path) => {
            debug!("Loading configuration from {}", path);
            ConfigFile::load(&path)
        }
        None => ConfigFile::load_default(),
    }
}

/// File settings overlaid with the environment
fn effective_config(file: &ConfigFile, env: &EnvConfig) -> AppConfig {
    let mut config = file.app.clone();
    config.apply_env(env);
    config
}

fn parse_kind(kind: Option<&str>) -> Result<Option<ScenarioKind>> {
    kind.map(|k| {
        ScenarioKind::from_str(k).ok_or_else(|| anyhow::anyhow!("Unknown kind: {k} (use api or ui)"))
    })
    .transpose()
}

fn parse_category(category: Option<&str>) -> Result<Option<Category>> {
    category
        .map(|c| {
            Category::from_str(c).ok_or_else(|| {
                let known: Vec<&str> = Category::all().iter().map(|c| c.name()).collect();
                anyhow::anyhow!("Unknown category: {c} (one of {})", known.join(", "))
            })
        })
        .transpose()
}

async fn run_scenarios(
    args: cli::RunArgs,
    config_path: Option<String>,
    env: &EnvConfig,
) -> Result<bool> {
    let file = load_config_file(config_path, env)?;
    let mut config = effective_config(&file, env);

    if let Some(base_url) = args.base_url {
        config.base_url = base_url;
    }
    if let Some(secret) = args.secret {
        config.test_secret = secret;
    }
    if let Some(timeout) = args.timeout {
        config.timeout_secs = timeout;
    }
    if let Some(format) = args.format {
        config.output_format = format;
    }
    if args.headed {
        config.browser.headless = false;
    }
    if args.include_known_issues {
        config.include_known_issues = true;
    }

    let format = OutputFormat::from_str(&config.output_format)
        .ok_or_else(|| anyhow::anyhow!("Unknown output format: {}", config.output_format))?;

    let filters = Selection {
        kind: parse_kind(args.kind.as_deref())?,
        category: parse_category(args.category.as_deref())?,
        skip: args.skip.as_deref().map(cli::parse_id_list).unwrap_or_default(),
        ..Selection::with_ids(args.scenarios)
    };

    let selection = match args.profile {
        Some(name) => {
            let profile = file
                .profile(&name)
                .ok_or_else(|| anyhow::anyhow!("Unknown profile: {name}"))?;
            info!("Using profile '{}'", profile.name);
            profile.selection().narrowed_by(filters)
        }
        None => filters,
    };

    let selected = scenarios::select(&selection);
    if selected.is_empty() {
        warn!("No scenarios match the selection");
    }

    let mut runner = ScenarioRunner::new(config)?;
    let summary = runner.run_all(&selected).await;
    runner.shutdown().await;

    let formatter = ResultFormatter::new(format);
    match summary.results.as_slice() {
        [only] => println!("{}", formatter.format_result(only)),
        _ => println!("{}", formatter.format_summary(&summary)),
    }

    if let Some(path) = args.output {
        write_report_to_file(&path, &summary, format)?;
        info!("Report written to {}", path);
    }

    Ok(!summary.has_failures())
}

fn list_scenarios(args: cli::ListArgs, config_path: Option<String>, env: &EnvConfig) {
    if args.profiles {
        list_profiles(config_path, env);
        return;
    }

    let catalog = scenarios::all();
    println!("\nScenarios ({} total)\n", catalog.len());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    for category in Category::all() {
        let in_category: Vec<_> = catalog.iter().filter(|s| s.category == category).collect();
        if in_category.is_empty() {
            continue;
        }

        println!("\n{category} Scenarios:");
        println!("──────────────────────────────────────────────────────────────────────");

        for scenario in in_category {
            let mark = if scenario.known_issue.is_some() { " (known issue)" } else { "" };
            println!(
                "  {:6} {:3} {}{} [{} steps]",
                scenario.id,
                scenario.kind().name(),
                scenario.name,
                mark,
                scenario.steps.len()
            );

            if args.detailed {
                if let Some(note) = &scenario.known_issue {
                    println!("         ! {note}");
                }
                match &scenario.steps {
                    Steps::Http(steps) => {
                        for (i, step) in steps.iter().enumerate() {
                            println!("         {}. {}", i + 1, step);
                        }
                    }
                    Steps::Ui(steps) => {
                        for (i, step) in steps.iter().enumerate() {
                            println!("         {}. {}", i + 1, step);
                        }
                    }
                }
            }
        }
    }

    println!("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");
}

fn list_profiles(config_path: Option<String>, env: &EnvConfig) {
    let mut profiles = ScenarioProfile::predefined();

    match load_config_file(config_path, env) {
        Ok(file) => {
            for profile in file.profiles {
                profiles.retain(|p| !p.name.eq_ignore_ascii_case(&profile.name));
                profiles.push(profile);
            }
        }
        Err(e) => warn!("Ignoring config file: {e:#}"),
    }

    println!("Scenario Profiles:");
    println!("{:-<60}", "");
    for profile in profiles {
        let count = scenarios::select(&profile.selection()).len();
        println!(
            "  {:12} - {} ({} scenarios)",
            profile.name, profile.description, count
        );
        if !profile.tags.is_empty() {
            println!("  {:12}   tags: {}", "", profile.tags.join(", "));
        }
    }
}

async fn check_app(
    args: cli::CheckArgs,
    config_path: Option<String>,
    env: &EnvConfig,
) -> Result<bool> {
    let file = load_config_file(config_path, env)?;
    let config = effective_config(&file, env);
    let base_url = args.base_url.unwrap_or(config.base_url);

    let client = http::HttpClient::with_timeout(&base_url, config.timeout_secs)?;
    info!("Checking {}", client.base_url());

    match client.get("/").await {
        Ok(response) if response.is_success() => {
            println!(
                "✓ {} is reachable (HTTP {}, {}ms)",
                client.base_url(),
                response.status_code,
                response.duration_ms
            );
            Ok(true)
        }
        Ok(response) => {
            println!("✗ {} answered HTTP {}", client.base_url(), response.status_code);
            Ok(false)
        }
        Err(e) => {
            println!("✗ {} is not reachable", client.base_url());
            println!("  Error: {e}");
            Ok(false)
        }
    }
}

fn manage_config(args: cli::ConfigArgs, config_path: Option<String>, env: &EnvConfig) -> Result<()> {
    match args.action {
        cli::ConfigAction::Show => {
            let file = load_config_file(config_path, env)?;
            let mut config = effective_config(&file, env);
            if config.test_secret != config::DEFAULT_TEST_SECRET {
                config.test_secret = "<set>".to_string();
            }
            println!("{}", serde_yaml::to_string(&config)?);
        }

        cli::ConfigAction::Init { path, force } => {
            if Path::new(&path).exists() && !force {
                anyhow::bail!("Configuration file already exists: {path}. Use --force to overwrite.");
            }

            ConfigFile::example().save(&path)?;
            println!("✓ Configuration file created: {path}");
            println!("\nEdit the file to customize your settings.");
        }

        cli::ConfigAction::Validate { path } => match ConfigFile::load(&path) {
            Ok(_) => println!("✓ Configuration file is valid: {path}"),
            Err(e) => {
                println!("✗ Configuration file is invalid: {path}");
                println!("  Error: {e:#}");
                return Err(e);
            }
        },

        cli::ConfigAction::Env => {
            config::print_env_help();
            if env.has_any() {
                println!();
                env.print_summary();
            }
        }
    }

    Ok(())
}
