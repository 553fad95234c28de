use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use log::LevelFilter;

use crate::config::{AppConfig, PresentationSetting};

/// Browse recipes from the command line.
#[derive(Debug, Parser)]
#[command(name = "recipe_app", version)]
pub struct Cli {
    /// RON configuration file. Defaults to `recipe_app.ron` if present.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Authorization header value, e.g. `Token abc123`.
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// API base url.
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Show failed loads as errors instead of the invalid-recipe placeholder.
    #[arg(long, global = true)]
    pub distinct_failures: bool,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Show one recipe. The id is taken as-is, like a navigation argument.
    Get { id: String },
    /// Search recipes.
    Search {
        query: String,
        /// Number of result pages to fetch.
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        pages: u32,
    },
}

impl Cli {
    pub fn apply_overrides(&self, mut config: AppConfig) -> AppConfig {
        if let Some(token) = &self.token {
            config.auth_token = token.clone();
        }
        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.clone();
        }
        if self.distinct_failures {
            config.failure_presentation = PresentationSetting::Distinct;
        }
        config
    }

    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}
