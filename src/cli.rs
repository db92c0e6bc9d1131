use clap::{CommandFactory, Parser};
use std::path::PathBuf;

use crate::config::{AppConfig, FailurePolicy};

#[derive(Parser, Debug)]
#[command(author, version, about = "start.gg Melee data-completeness crawler")]
pub struct Cli {
    /// start.gg API key
    pub api_key: Option<String>,

    /// Summary log; its last row is the resume checkpoint
    #[arg(long, default_value = "results.csv")]
    pub results: PathBuf,

    /// Directory receiving the `tournaments/` snapshot tree
    #[arg(long, default_value = ".")]
    pub output_dir: PathBuf,

    /// What to do when a tournament cannot be fetched
    #[arg(long, value_enum, default_value_t = FailurePolicy::Abort)]
    pub on_error: FailurePolicy,
}

impl Cli {
    pub fn usage() -> String {
        Cli::command().render_usage().to_string()
    }

    /// Default configuration with the command-line overrides applied
    pub fn to_config(&self) -> AppConfig {
        let mut config = AppConfig::new();
        config.crawl.results_path = self.results.clone();
        config.crawl.output_dir = self.output_dir.clone();
        config.crawl.failure_policy = self.on_error;
        config
    }
}
