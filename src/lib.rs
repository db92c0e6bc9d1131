pub mod api;
pub mod cache;
pub mod checkpoint;
pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod http;
pub mod pagination;
pub mod rate_limiter;
pub mod services;

use anyhow::Result;
use clap::Parser;
use cli::Cli;

use crate::services::CrawlService;

pub fn interpret() -> Cli {
    Cli::parse()
}

pub fn handle_crawl(cli: &Cli) -> Result<()> {
    let Some(api_key) = cli.api_key.as_deref() else {
        println!("{}", Cli::usage());
        return Ok(());
    };

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let service = CrawlService::new(cli.to_config(), api_key)?;
        service.run().await.map(|_| ())
    })
}
