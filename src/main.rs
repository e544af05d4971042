use crate::app::App;
use crate::cli::Cli;
use crate::config::Config;
use crate::runner::{Job, Progress, ScrapeRequest};
use clap::Parser;
use std::io::IsTerminal;
use tracing::{error, info};

pub mod app;
pub mod browser;
pub mod cli;
pub mod collect;
pub mod config;
pub mod errors;
pub mod event;
pub mod export;
pub mod extract;
pub mod logging;
pub mod runner;
pub mod sites;
pub mod text;
pub mod ui;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    let cli = Cli::parse();
    errors::init()?;

    let headless = cli.no_tui || !std::io::stdout().is_terminal();
    logging::init(headless)?;
    info!("Starting up");

    let config = Config::new()?;
    let output = cli
        .output
        .unwrap_or_else(|| export::default_path(&config.output_dir, cli.format));
    let job = Job {
        request: ScrapeRequest {
            sites: cli.sites,
            max_pages: cli.pages,
        },
        snapshot_dir: cli.snapshot_dir,
        output,
        format: cli.format,
    };

    let result = if headless {
        runner::execute(&config, &job, &Progress::silent())
            .await
            .map(|outcome| println!("{}", app::summarize(&outcome)))
    } else {
        let terminal = ratatui::init();
        let result = App::new().run(terminal, config, job).await;
        ratatui::restore();
        result
    };
    if let Err(ref err) = result {
        error!("Error: {:?}", err);
    }
    info!("Shutting down");
    result
}
