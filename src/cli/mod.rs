//! CLI argument parsing
//!
//! Defines command-line interface using clap.

use clap::{Parser, Subcommand};

/// Black-box HTTP and browser scenario runner
#[derive(Parser, Debug)]
#[command(name = "webapp-qa")]
#[command(author = "hephaex@gmail.com")]
#[command(version = "0.1.0")]
#[command(about = "Run API and UI scenarios against a running web app")]
#[command(long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    /// Configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run scenarios
    Run(RunArgs),

    /// List available scenarios
    List(ListArgs),

    /// Check that the app is reachable
    Check(CheckArgs),

    /// Show or manage configuration
    Config(ConfigArgs),
}

/// Arguments for run command
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Scenario ids to run (repeatable, e.g. -s TC002 -s TC010)
    #[arg(short, long = "scenario")]
    pub scenarios: Vec<String>,

    /// Only run scenarios of this kind (api, ui)
    #[arg(short, long)]
    pub kind: Option<String>,

    /// Only run scenarios in this category
    #[arg(long)]
    pub category: Option<String>,

    /// Scenario profile (smoke, api, ui, signup, pages, all, or one from the config file)
    #[arg(short, long)]
    pub profile: Option<String>,

    /// Skip specific scenarios (comma-separated ids)
    #[arg(long)]
    pub skip: Option<String>,

    /// Base URL of the app under test
    #[arg(short, long)]
    pub base_url: Option<String>,

    /// Value for the X-Test-Secret header
    #[arg(long)]
    pub secret: Option<String>,

    /// HTTP timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Output format (table, json, json-pretty, csv, summary)
    #[arg(short, long)]
    pub format: Option<String>,

    /// Save the report to a file
    #[arg(short, long)]
    pub output: Option<String>,

    /// Show the browser window
    #[arg(long)]
    pub headed: bool,

    /// Run scenarios flagged with a known issue
    #[arg(long)]
    pub include_known_issues: bool,
}

/// Arguments for list command
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Show steps of each scenario
    #[arg(short, long)]
    pub detailed: bool,

    /// List scenario profiles instead
    #[arg(short, long)]
    pub profiles: bool,
}

/// Arguments for check command
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Base URL of the app under test
    #[arg(short, long)]
    pub base_url: Option<String>,
}

/// Arguments for config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Write an example configuration file
    Init {
        /// Destination (.yaml, .yml or .json)
        path: String,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Validate a configuration file
    Validate {
        /// File to validate
        path: String,
    },

    /// Describe the environment variables
    Env,
}

/// Split a comma-separated id list
pub fn parse_id_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect()
}
